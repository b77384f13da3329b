use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures of the record store.
///
/// Logic failures (duplicate name, no unique match) are not errors here; the
/// store reports them as `Ok(false)` and callers must check the flag.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value for field '{field}': {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}
