//! Dataset loading for the conflict dashboard

pub mod config;
pub mod loader;
pub mod sources;

use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::DataConfig;
pub use loader::{load_with_fallback, LoadedDataset};
pub use sources::{DatasetSource, JsonFileSource, SyntheticSource};

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("No dataset available: {0}")]
    Unavailable(String),
}
