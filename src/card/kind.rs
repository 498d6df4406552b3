//! Card subject kinds and the behavior keyed off them.

use std::fmt;
use std::str::FromStr;

use crate::error::CardError;
use crate::error::hub::config_invalid;

/// List fields recognized for every card kind.
pub const COMMON_LIST_FIELDS: &[&str] = &["language", "tags", "datasets", "metrics"];

/// What a card describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardKind {
    #[default]
    Model,
    Dataset,
}

/// Per-kind dispatch table.
#[derive(Debug)]
pub struct KindSpec {
    /// `repoType` sent to the validation endpoint.
    pub repo_type: &'static str,
    /// Prefix of repository URLs on the Hub (`""` or `"datasets/"`).
    pub url_prefix: &'static str,
    /// Path segment of the Hub API (`models` or `datasets`).
    pub api_segment: &'static str,
    /// List fields recognized in addition to [`COMMON_LIST_FIELDS`].
    pub list_fields: &'static [&'static str],
    /// Scalar string fields recognized in addition to the common ones.
    pub scalar_fields: &'static [&'static str],
    /// Bundled template used by `from_default_template`.
    pub default_template: &'static str,
}

const MODEL: KindSpec = KindSpec {
    repo_type: "model",
    url_prefix: "",
    api_segment: "models",
    list_fields: &["base_model"],
    scalar_fields: &[],
    default_template: include_str!("../templates/modelcard_template.md"),
};

const DATASET: KindSpec = KindSpec {
    repo_type: "dataset",
    url_prefix: "datasets/",
    api_segment: "datasets",
    list_fields: &[
        "annotations_creators",
        "language_creators",
        "multilinguality",
        "size_categories",
        "source_datasets",
        "task_categories",
        "task_ids",
    ],
    scalar_fields: &["pretty_name"],
    default_template: include_str!("../templates/datasetcard_template.md"),
};

impl CardKind {
    pub fn spec(self) -> &'static KindSpec {
        match self {
            CardKind::Model => &MODEL,
            CardKind::Dataset => &DATASET,
        }
    }

    /// Whether `field` is normalized to a list for this kind.
    pub fn is_list_field(self, field: &str) -> bool {
        COMMON_LIST_FIELDS.contains(&field) || self.spec().list_fields.contains(&field)
    }

    /// Whether `field` is a kind-specific scalar string field.
    pub fn is_scalar_field(self, field: &str) -> bool {
        self.spec().scalar_fields.contains(&field)
    }

    pub fn as_str(self) -> &'static str {
        self.spec().repo_type
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardKind {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "model" => Ok(CardKind::Model),
            "dataset" => Ok(CardKind::Dataset),
            other => Err(config_invalid(format!(
                "unknown card kind '{other}' (expected 'model' or 'dataset')"
            ))),
        }
    }
}
