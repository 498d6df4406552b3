//! Recoverable conditions met while reading a card.

use std::fmt;

/// A condition that degraded the loaded card instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardWarning {
    /// The document has no `---` delimited metadata block.
    MissingMetadata,
    /// The `model-index` could not be decoded; eval results were dropped.
    InvalidModelIndex { reason: String },
}

impl fmt::Display for CardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardWarning::MissingMetadata => f.write_str(
                "Repo card metadata block was not found. Setting CardData to empty.",
            ),
            CardWarning::InvalidModelIndex { reason } => write!(
                f,
                "Invalid model-index. Not loading eval results into CardData. ({reason})"
            ),
        }
    }
}

/// Collects warnings and mirrors each one to the `tracing` log.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<CardWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: CardWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[CardWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<CardWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.warn(CardWarning::MissingMetadata);
        diagnostics.warn(CardWarning::InvalidModelIndex {
            reason: "x".to_string(),
        });
        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(diagnostics.warnings()[0], CardWarning::MissingMetadata);
    }

    #[test]
    fn messages() {
        assert!(
            CardWarning::MissingMetadata
                .to_string()
                .contains("Repo card metadata block was not found. Setting CardData to empty.")
        );
        let invalid = CardWarning::InvalidModelIndex {
            reason: "result is missing `task`".to_string(),
        };
        assert!(
            invalid
                .to_string()
                .contains("Invalid model-index. Not loading eval results into CardData.")
        );
    }
}
