//! Push command implementation

use modelcards::error::Result;
use modelcards::{CardKind, PushOptions, RepoCard};

use super::HubOptions;
use crate::cli::PushArgs;
use crate::ui::{self, display};

pub fn run(hub: &HubOptions, args: PushArgs) -> Result<()> {
    let kind = CardKind::from(args.kind);
    let card = RepoCard::from_path(kind, &args.path)?;
    display::display_warnings(card.warnings());

    let client = hub.client()?;
    let options = push_options(&args);

    let mut progress = ui::reporter();
    progress.step(&format!("Pushing {} to {}", args.path.display(), args.repo_id));
    let location = match card.push_to_hub(&client, &args.repo_id, &options) {
        Ok(location) => location,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };
    progress.finish();

    display::display_success(&format!("Pushed card to {}", location));
    Ok(())
}

fn push_options(args: &PushArgs) -> PushOptions {
    PushOptions {
        revision: args.revision.clone(),
        commit_message: args.commit_message.clone(),
        commit_description: args.commit_description.clone(),
        create_pr: args.create_pr,
    }
}
