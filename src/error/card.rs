//! Card metadata errors

use super::CardError;

/// Creates a malformed metadata error
pub fn malformed_metadata(message: impl Into<String>) -> CardError {
    CardError::MalformedMetadata {
        message: message.into(),
    }
}

/// Creates an invalid model-index error
pub fn invalid_model_index(message: impl Into<String>) -> CardError {
    CardError::InvalidModelIndex {
        message: message.into(),
    }
}

/// Creates an invalid argument error
pub fn invalid_argument(message: impl Into<String>) -> CardError {
    CardError::InvalidArgument {
        message: message.into(),
    }
}
