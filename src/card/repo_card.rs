//! A card document: typed metadata plus Markdown body.

use std::fmt;
use std::path::Path;

use serde_json::Value as JsonValue;
use serde_yaml::Mapping;

use super::frontmatter::{self, DELIMITER};
use super::{CardData, CardKind, CardWarning, Diagnostics};
use crate::error::Result;
use crate::error::fs::{not_found, read_failed, write_failed};
use crate::error::template;
use crate::hub::{
    CardDownloader, CardUploader, CardValidator, DEFAULT_COMMIT_MESSAGE, DownloadRequest,
    README_FILENAME, UploadRequest,
};
use crate::staging::staging_dir;
use crate::template::{CARD_DATA_VAR, TemplateRenderer, TemplateVars};

/// Options for [`RepoCard::push_to_hub`].
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Branch or ref to commit to, `main` when unset.
    pub revision: Option<String>,
    pub commit_message: Option<String>,
    pub commit_description: Option<String>,
    /// Open a pull request instead of committing directly.
    pub create_pr: bool,
}

/// A model or dataset card.
///
/// `data` and `text` are freely mutable; serialization always re-renders the front
/// matter from the current `data`.
#[derive(Debug, Clone)]
pub struct RepoCard {
    pub data: CardData,
    pub text: String,
    kind: CardKind,
    warnings: Vec<CardWarning>,
}

impl RepoCard {
    pub fn new(kind: CardKind, data: CardData, text: impl Into<String>) -> Self {
        Self {
            data,
            text: text.into(),
            kind,
            warnings: Vec::new(),
        }
    }

    /// Parse a card document.
    ///
    /// A missing metadata block yields empty data and a warning. A block that is not a
    /// mapping is an error.
    pub fn parse(kind: CardKind, content: &str) -> Result<Self> {
        let mut diagnostics = Diagnostics::new();
        let document = frontmatter::split(content);

        let mapping = match document.metadata {
            Some(metadata) => frontmatter::parse_metadata(metadata)?,
            None => {
                diagnostics.warn(CardWarning::MissingMetadata);
                Mapping::new()
            }
        };
        let data = CardData::from_mapping(kind, mapping, &mut diagnostics);

        Ok(Self {
            data,
            text: document.body.to_string(),
            kind,
            warnings: diagnostics.into_warnings(),
        })
    }

    /// Read and parse a local card file.
    pub fn from_path(kind: CardKind, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| read_failed(path.display().to_string(), e))?;
        Self::parse(kind, &content)
    }

    /// Load a card from a local path, or from the Hub when no such path exists.
    pub fn load(
        kind: CardKind,
        source: &str,
        revision: Option<&str>,
        downloader: &dyn CardDownloader,
    ) -> Result<Self> {
        let path = Path::new(source);
        if path.exists() {
            tracing::debug!("Loading {} card from {}", kind, path.display());
            return Self::from_path(kind, path);
        }

        tracing::debug!("Loading {} card for repo {}", kind, source);
        let content = downloader.download(&DownloadRequest {
            repo_id: source,
            kind,
            revision,
        })?;
        Self::parse(kind, &content)
    }

    /// Render the template at `template_path` and parse the result.
    ///
    /// The template sees `data` as YAML in `{{card_data}}` plus every entry of `vars`.
    pub fn from_template(
        kind: CardKind,
        data: &CardData,
        template_path: &Path,
        vars: &TemplateVars,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Self> {
        if !template_path.is_file() {
            return Err(template::not_found(template_path.display().to_string()));
        }
        let source = std::fs::read_to_string(template_path)
            .map_err(|e| read_failed(template_path.display().to_string(), e))?;
        Self::render(kind, data, &source, vars, renderer)
    }

    /// Render the bundled template for `kind` and parse the result.
    pub fn from_default_template(
        kind: CardKind,
        data: &CardData,
        vars: &TemplateVars,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Self> {
        Self::render(kind, data, kind.spec().default_template, vars, renderer)
    }

    fn render(
        kind: CardKind,
        data: &CardData,
        source: &str,
        vars: &TemplateVars,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Self> {
        let mut context = vars.clone();
        context.insert(
            CARD_DATA_VAR.to_string(),
            JsonValue::String(data.to_yaml()?),
        );
        let content = renderer.render(source, &context)?;
        Self::parse(kind, &content)
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Warnings recorded while this card was parsed.
    pub fn warnings(&self) -> &[CardWarning] {
        &self.warnings
    }

    /// The full document text.
    pub fn to_document(&self) -> Result<String> {
        Ok(format!(
            "{DELIMITER}\n{}\n{DELIMITER}\n{}",
            self.data.to_yaml()?,
            self.text
        ))
    }

    /// Write the document to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let document = self.to_document()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| write_failed(parent.display().to_string(), e))?;
        }
        std::fs::write(path, document).map_err(|e| write_failed(path.display().to_string(), e))?;
        tracing::debug!("Saved {} card to {}", self.kind, path.display());
        Ok(())
    }

    /// Check the document against the remote metadata schema.
    pub fn validate(&self, validator: &dyn CardValidator) -> Result<()> {
        validator.validate(&self.to_document()?, self.kind)
    }

    /// Validate, then upload the document as the repository's README.
    ///
    /// Nothing is uploaded when validation fails. The staged copy is removed before
    /// returning on every path.
    pub fn push_to_hub<H>(&self, hub: &H, repo_id: &str, options: &PushOptions) -> Result<String>
    where
        H: CardValidator + CardUploader + ?Sized,
    {
        let document = self.to_document()?;
        hub.validate(&document, self.kind)?;

        let staging = staging_dir()?;
        let path = staging.path().join(README_FILENAME);
        std::fs::write(&path, &document)
            .map_err(|e| write_failed(path.display().to_string(), e))?;

        let location = hub.upload(&UploadRequest {
            path: &path,
            repo_id,
            kind: self.kind,
            path_in_repo: README_FILENAME,
            revision: options.revision.as_deref(),
            commit_message: options
                .commit_message
                .as_deref()
                .unwrap_or(DEFAULT_COMMIT_MESSAGE),
            commit_description: options.commit_description.as_deref(),
            create_pr: options.create_pr,
        })?;
        tracing::info!("Pushed {} card to {}", self.kind, location);
        Ok(location)
    }
}

impl fmt::Display for RepoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.to_document().map_err(|_| fmt::Error)?;
        f.write_str(&document)
    }
}
