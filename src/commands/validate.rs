//! Validate command implementation

use modelcards::error::Result;
use modelcards::{CardKind, RepoCard};

use super::HubOptions;
use crate::cli::ValidateArgs;
use crate::ui::{self, display};

pub fn run(hub: &HubOptions, args: ValidateArgs) -> Result<()> {
    let kind = CardKind::from(args.kind);
    let client = hub.client()?;
    let card = RepoCard::load(kind, &args.source, None, &client)?;
    display::display_warnings(card.warnings());

    let mut progress = ui::reporter();
    progress.step("Validating card metadata");
    if let Err(e) = card.validate(&client) {
        progress.abandon();
        return Err(e);
    }
    progress.finish();

    display::display_success(&format!("{} card metadata is valid", kind));
    Ok(())
}
