//! Hub collaborators: download, upload and remote validation of cards.
//!
//! Cards only depend on the narrow traits below. [`HubClient`] implements all three
//! against the Hugging Face Hub HTTP API.

pub mod client;
pub mod config;

use std::path::Path;

use crate::card::CardKind;
use crate::error::Result;

pub use client::HubClient;
pub use config::HubConfig;

/// File name of a card inside a repository.
pub const README_FILENAME: &str = "README.md";

/// Default commit message for uploads.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Upload README.md with modelcards";

/// Which card to fetch.
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub repo_id: &'a str,
    pub kind: CardKind,
    pub revision: Option<&'a str>,
}

/// A staged file and where it goes.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Local file to upload.
    pub path: &'a Path,
    pub repo_id: &'a str,
    pub kind: CardKind,
    pub path_in_repo: &'a str,
    pub revision: Option<&'a str>,
    pub commit_message: &'a str,
    pub commit_description: Option<&'a str>,
    pub create_pr: bool,
}

/// Fetches the raw text of a remote card.
pub trait CardDownloader {
    fn download(&self, request: &DownloadRequest<'_>) -> Result<String>;
}

/// Writes a staged card to a repository and returns its location.
pub trait CardUploader {
    fn upload(&self, request: &UploadRequest<'_>) -> Result<String>;
}

/// Checks a serialized card against the registry's metadata schema.
pub trait CardValidator {
    fn validate(&self, content: &str, kind: CardKind) -> Result<()>;
}
