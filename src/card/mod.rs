//! Repo cards: YAML front matter plus Markdown body.
//!
//! - [`frontmatter`]: split a document into metadata text and body
//! - [`eval`]: evaluation results and the `model-index` codec
//! - [`data`]: typed card metadata
//! - [`repo_card`]: load, render, save, validate and push cards

pub mod data;
pub mod diagnostics;
pub mod eval;
pub mod frontmatter;
pub mod kind;
pub mod repo_card;

pub use data::{CardData, CardDataBuilder, IntoValues, MODEL_INDEX_KEY};
pub use diagnostics::{CardWarning, Diagnostics};
pub use eval::EvalResult;
pub use kind::CardKind;
pub use repo_card::{PushOptions, RepoCard};

use serde_yaml::Value;

/// String form of a YAML scalar; `None` for null, sequences and mappings.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
