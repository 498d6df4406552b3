//! Blocking Hugging Face Hub client.
//!
//! Endpoints used:
//! - `GET  {endpoint}/{prefix}{repo_id}/resolve/{revision}/README.md` to download a card
//! - `POST {endpoint}/api/validate-yaml` to validate card metadata
//! - `POST {endpoint}/api/{models|datasets}/{repo_id}/commit/{revision}` to upload
//!
//! Non-2xx responses become [`crate::error::CardError::Transport`] unchanged, except a 400 from the
//! validation endpoint whose body is the schema diagnostic.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use super::{
    CardDownloader, CardUploader, CardValidator, DownloadRequest, HubConfig, README_FILENAME,
    UploadRequest,
};
use crate::card::CardKind;
use crate::error::fs::read_failed;
use crate::error::hub::validation_failed;
use crate::error::Result;

const DEFAULT_REVISION: &str = "main";

/// Client for the Hub endpoints cards need.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: Client,
    config: HubConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    commit_url: Option<String>,
    pull_request_url: Option<String>,
}

impl HubClient {
    pub fn new(config: HubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("modelcards/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// URL of the raw card file in a repository.
    pub fn resolve_url(&self, request: &DownloadRequest<'_>) -> String {
        format!(
            "{}/{}{}/resolve/{}/{}",
            self.config.endpoint,
            request.kind.spec().url_prefix,
            request.repo_id,
            encode_revision(request.revision),
            README_FILENAME
        )
    }

    pub fn validate_url(&self) -> String {
        format!("{}/api/validate-yaml", self.config.endpoint)
    }

    pub fn commit_url(&self, repo_id: &str, kind: CardKind, revision: Option<&str>) -> String {
        format!(
            "{}/api/{}/{}/commit/{}",
            self.config.endpoint,
            kind.spec().api_segment,
            repo_id,
            encode_revision(revision)
        )
    }

    fn blob_url(&self, request: &UploadRequest<'_>) -> String {
        format!(
            "{}/{}{}/blob/{}/{}",
            self.config.endpoint,
            request.kind.spec().url_prefix,
            request.repo_id,
            encode_revision(request.revision),
            request.path_in_repo
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn encode_revision(revision: Option<&str>) -> String {
    urlencoding::encode(revision.unwrap_or(DEFAULT_REVISION)).into_owned()
}

/// NDJSON body of a single-file commit.
pub fn commit_payload(request: &UploadRequest<'_>, content: &[u8]) -> Result<String> {
    let header = json!({
        "key": "header",
        "value": {
            "summary": request.commit_message,
            "description": request.commit_description.unwrap_or_default(),
        }
    });
    let file = json!({
        "key": "file",
        "value": {
            "content": STANDARD.encode(content),
            "path": request.path_in_repo,
            "encoding": "base64",
        }
    });
    Ok(format!(
        "{}\n{}\n",
        serde_json::to_string(&header)?,
        serde_json::to_string(&file)?
    ))
}

impl CardDownloader for HubClient {
    fn download(&self, request: &DownloadRequest<'_>) -> Result<String> {
        let url = self.resolve_url(request);
        tracing::debug!("Downloading card from {}", url);
        let response = self.authorize(self.http.get(&url)).send()?;
        Ok(response.error_for_status()?.text()?)
    }
}

impl CardValidator for HubClient {
    fn validate(&self, content: &str, kind: CardKind) -> Result<()> {
        let body = json!({
            "repoType": kind.spec().repo_type,
            "content": content,
        });
        let response = self
            .authorize(self.http.post(self.validate_url()))
            .json(&body)
            .send()?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(validation_failed(response.text()?));
        }
        response.error_for_status()?;
        Ok(())
    }
}

impl CardUploader for HubClient {
    fn upload(&self, request: &UploadRequest<'_>) -> Result<String> {
        let content = std::fs::read(request.path)
            .map_err(|e| read_failed(request.path.display().to_string(), e))?;
        let payload = commit_payload(request, &content)?;
        let url = self.commit_url(request.repo_id, request.kind, request.revision);
        tracing::debug!("Committing {} to {}", request.path_in_repo, url);

        let mut builder = self
            .authorize(self.http.post(&url))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload);
        if request.create_pr {
            builder = builder.query(&[("create_pr", "1")]);
        }

        let response: CommitResponse = builder.send()?.error_for_status()?.json()?;
        let location = if request.create_pr {
            response.pull_request_url.or(response.commit_url)
        } else {
            response.commit_url
        };
        Ok(location.unwrap_or_else(|| self.blob_url(request)))
    }
}
