//! File system errors

use super::CardError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> CardError {
    CardError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> CardError {
    CardError::FileReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> CardError {
    CardError::FileWriteFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
