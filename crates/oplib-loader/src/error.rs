use oplib_sdk::OpError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while locating or loading a shared operator library.
///
/// These propagate unmodified to the caller; there is no retry and no local
/// recovery at this layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Op library not found: {path}: {source}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load op library {path}: {source}")]
    Open {
        path: PathBuf,
        source: libloading::Error,
    },

    #[error("{path} is not an op library (no declaration symbol): {source}")]
    MissingSymbol {
        path: PathBuf,
        source: libloading::Error,
    },

    #[error("Op library {path} was built for ABI v{found}, this loader expects v{expected}")]
    AbiMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Op library {path} was built against SDK {found}, this loader uses {expected}")]
    SdkMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("Failed to register ops from {path}: {source}")]
    Register { path: PathBuf, source: OpError },

    #[error("Data file {name} not found; searched: {searched}")]
    DataFileNotFound { name: String, searched: String },
}
