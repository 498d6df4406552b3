//! Show command implementation

use modelcards::error::Result;
use modelcards::{CardKind, RepoCard};

use super::HubOptions;
use crate::cli::{ShowArgs, ShowFormat};
use crate::ui::display;

pub fn run(hub: &HubOptions, args: ShowArgs) -> Result<()> {
    let kind = CardKind::from(args.kind);
    let client = hub.client()?;
    let card = RepoCard::load(kind, &args.source, args.revision.as_deref(), &client)?;

    display::display_warnings(card.warnings());
    print!("{}", render(&args.source, &card, args.format)?);
    Ok(())
}

/// Text printed for `format`. Summary output is printed directly and yields nothing.
fn render(source: &str, card: &RepoCard, format: ShowFormat) -> Result<String> {
    match format {
        ShowFormat::Summary => {
            display::display_card_summary(source, card);
            Ok(String::new())
        }
        ShowFormat::Yaml => Ok(format!("{}\n", card.data.to_yaml()?)),
        ShowFormat::Json => Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(&card.data)?
        )),
    }
}
