//! Hub connection settings.
//!
//! Resolution order for each setting: explicit value, environment variable, token
//! file (token only), default.
//!
//! ```text
//! HF_ENDPOINT   Hub base URL            (default https://huggingface.co)
//! HF_TOKEN      access token
//! HF_HOME       directory holding the `token` file (default ~/.cache/huggingface)
//! ```

use std::path::PathBuf;
use std::time::Duration;

/// Default Hub base URL.
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENDPOINT_ENV: &str = "HF_ENDPOINT";
pub const TOKEN_ENV: &str = "HF_TOKEN";
pub const HOME_ENV: &str = "HF_HOME";

/// Connection settings for [`super::HubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Base URL without trailing slash.
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl HubConfig {
    /// Settings from the environment only.
    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }

    /// Settings from explicit values, falling back to the environment and token file.
    pub fn resolve(endpoint: Option<String>, token: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| env_non_empty(ENDPOINT_ENV))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| env_non_empty(TOKEN_ENV))
            .or_else(read_token_file);

        Self {
            endpoint,
            token,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Directory for Hub client state.
///
/// Returns `~/.cache/huggingface` unless `HF_HOME` is set.
pub fn hf_home() -> Option<PathBuf> {
    if let Some(home) = env_non_empty(HOME_ENV) {
        return Some(PathBuf::from(home));
    }
    dirs::home_dir().map(|home| home.join(".cache").join("huggingface"))
}

/// Path of the stored access token.
pub fn token_path() -> Option<PathBuf> {
    hf_home().map(|home| home.join("token"))
}

fn read_token_file() -> Option<String> {
    let path = token_path()?;
    let token = std::fs::read_to_string(&path).ok()?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    tracing::debug!("Using token from {}", path.display());
    Some(token.to_string())
}
