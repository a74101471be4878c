use std::path::PathBuf;

/// The stats file could not be read or written. Callers treat this as
/// retryable: the file may be locked, on a full disk, or mid-edit by hand.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("stats file {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stats file {path} is not valid stats JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("stats for {path} could not be encoded: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
