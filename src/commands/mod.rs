//! Command implementations for the modelcards CLI

pub mod new;
pub mod push;
pub mod show;
pub mod validate;

use modelcards::error::Result;
use modelcards::{HubClient, HubConfig};

/// Hub connection options shared by all commands
#[derive(Debug, Clone, Default)]
pub struct HubOptions {
    pub endpoint: Option<String>,
    pub token: Option<String>,
}

impl HubOptions {
    pub fn client(&self) -> Result<HubClient> {
        HubClient::new(HubConfig::resolve(
            self.endpoint.clone(),
            self.token.clone(),
        ))
    }
}
