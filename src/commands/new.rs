//! New command implementation

use modelcards::error::Result;
use modelcards::error::card::invalid_argument;
use modelcards::template::parse_var;
use modelcards::{CardData, CardKind, HandlebarsRenderer, RepoCard, TemplateVars};

use crate::cli::NewArgs;
use crate::ui::display;

pub fn run(args: NewArgs) -> Result<()> {
    let kind = CardKind::from(args.kind);
    let data = card_data(kind, &args)?;
    let vars = template_vars(&args.vars)?;
    let renderer = HandlebarsRenderer::new();

    let card = match &args.template {
        Some(path) => RepoCard::from_template(kind, &data, path, &vars, &renderer)?,
        None => RepoCard::from_default_template(kind, &data, &vars, &renderer)?,
    };
    display::display_warnings(card.warnings());

    card.save(&args.output)?;
    display::display_success(&format!(
        "Created {} card at {}",
        kind,
        args.output.display()
    ));
    Ok(())
}

fn card_data(kind: CardKind, args: &NewArgs) -> Result<CardData> {
    let mut builder = CardData::builder_for(kind);
    if !args.languages.is_empty() {
        builder = builder.language(args.languages.clone());
    }
    if let Some(license) = &args.license {
        builder = builder.license(license.clone());
    }
    if let Some(library_name) = &args.library_name {
        builder = builder.library_name(library_name.clone());
    }
    if !args.tags.is_empty() {
        builder = builder.tags(args.tags.clone());
    }
    if !args.datasets.is_empty() {
        builder = builder.datasets(args.datasets.clone());
    }
    if !args.metrics.is_empty() {
        builder = builder.metrics(args.metrics.clone());
    }
    builder.build()
}

fn template_vars(raw: &[String]) -> Result<TemplateVars> {
    raw.iter()
        .map(|entry| {
            parse_var(entry).ok_or_else(|| {
                invalid_argument(format!("expected KEY=VALUE for --var, got `{entry}`"))
            })
        })
        .collect()
}
