use crate::error::TacticError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid profile name: {name:?}")]
    InvalidName { name: String },

    #[error("Snapshot too large: {size} bytes (limit {limit})")]
    DataTooLarge { size: usize, limit: usize },

    #[error("Restore failed: {0}")]
    Restore(#[from] TacticError),
}

impl SnapshotError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SnapshotError::Io(_) => true,
            SnapshotError::FileNotFound { .. } => true,
            SnapshotError::InvalidName { .. } => true,
            SnapshotError::Corrupted => false,
            SnapshotError::ChecksumMismatch => false,
            SnapshotError::VersionMismatch { .. } => false,
            SnapshotError::Restore(_) => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(SnapshotError::FileNotFound { path: "x".into() }.is_recoverable());
        assert!(!SnapshotError::ChecksumMismatch.is_recoverable());
        assert!(!SnapshotError::from(TacticError::InvalidSnapshot("bad".into())).is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = SnapshotError::DataTooLarge { size: 10, limit: 4 };
        assert_eq!(err.to_string(), "Snapshot too large: 10 bytes (limit 4)");
    }
}
