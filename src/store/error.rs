//! Persistence errors.

use thiserror::Error;

/// Failure reading or writing stored tournaments.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a tournament backup (kind \"{kind}\", version {version})")]
    InvalidBackup { kind: String, version: u32 },
}

impl StoreError {
    /// Whether retrying the same call might succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_backup_message() {
        let err = StoreError::InvalidBackup {
            kind: "spreadsheet".into(),
            version: 1,
        };
        assert_eq!(err.to_string(), "Not a tournament backup (kind \"spreadsheet\", version 1)");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_is_recoverable() {
        let err = StoreError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "IO error: disk full");
    }
}
