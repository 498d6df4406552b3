//! Template errors

use super::CardError;

/// Creates a template not found error
pub fn not_found(path: impl Into<String>) -> CardError {
    CardError::TemplateNotFound { path: path.into() }
}

/// Creates a template render failed error
pub fn render_failed(reason: impl ToString) -> CardError {
    CardError::TemplateRenderFailed {
        reason: reason.to_string(),
    }
}
