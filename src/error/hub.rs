//! Hub and configuration errors

use super::CardError;

/// Creates a remote validation failed error carrying the server's text unchanged
pub fn validation_failed(message: impl Into<String>) -> CardError {
    CardError::RemoteValidationFailed {
        message: message.into(),
    }
}

/// Creates an invalid configuration error
pub fn config_invalid(message: impl Into<String>) -> CardError {
    CardError::ConfigInvalid {
        message: message.into(),
    }
}
