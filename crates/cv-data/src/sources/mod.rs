pub mod json_source;
pub mod synthetic;

use async_trait::async_trait;
use cv_core::Dataset;

use crate::DataError;

pub use json_source::JsonFileSource;
pub use synthetic::SyntheticSource;

/// Something that can produce the full dataset
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load events, conflicts and monthly aggregates
    async fn load(&self) -> Result<Dataset, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
