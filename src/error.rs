//! Error types for the data source and the favorites store

use thiserror::Error;

use crate::character::CharacterId;

/// Failure loading the character list
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network response was not ok: {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed character payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure talking to the favorites store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store used before `open()` or after `close()`
    #[error("favorites database is not open")]
    NotOpen,
    #[error("character {0} is already a favorite")]
    DuplicateKey(CharacterId),
    #[error("IndexedDB is not available in this context")]
    Unavailable,
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("stored record could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = SourceError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "network response was not ok: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_duplicate_message_names_id() {
        assert_eq!(
            StoreError::DuplicateKey(308).to_string(),
            "character 308 is already a favorite"
        );
    }
}
