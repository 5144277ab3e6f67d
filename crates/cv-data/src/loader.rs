//! Startup loading with synthetic fallback

use cv_core::Dataset;

use crate::sources::DatasetSource;
use crate::DataError;

/// A dataset plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub source_name: String,
    /// Whether the fallback source was used
    pub from_fallback: bool,
}

/// Load from `primary`, falling back to `fallback` when it fails.
///
/// Only a failure of every available source is an error.
pub async fn load_with_fallback(
    primary: &dyn DatasetSource,
    fallback: Option<&dyn DatasetSource>,
) -> Result<LoadedDataset, DataError> {
    let primary_error = match primary.load().await {
        Ok(dataset) => {
            return Ok(LoadedDataset {
                dataset,
                source_name: primary.source_name().to_string(),
                from_fallback: false,
            })
        }
        Err(e) => e,
    };

    tracing::warn!("Error loading data files from {}: {}", primary.source_name(), primary_error);

    let Some(fallback) = fallback else {
        return Err(DataError::Unavailable(primary_error.to_string()));
    };

    tracing::info!("Falling back to {} data", fallback.source_name());
    match fallback.load().await {
        Ok(dataset) => Ok(LoadedDataset {
            dataset,
            source_name: fallback.source_name().to_string(),
            from_fallback: true,
        }),
        Err(fallback_error) => Err(DataError::Unavailable(format!(
            "{}; fallback {} failed: {}",
            primary_error,
            fallback.source_name(),
            fallback_error
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::sources::{JsonFileSource, SyntheticSource};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FailingSource;

    #[async_trait]
    impl DatasetSource for FailingSource {
        async fn load(&self) -> Result<Dataset, DataError> {
            Err(DataError::Unavailable("offline".to_string()))
        }

        fn source_name(&self) -> &str {
            "failing"
        }
    }

    fn missing_files() -> (TempDir, JsonFileSource) {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            data_dir: dir.path().join("nope"),
            ..DataConfig::default()
        };
        (dir, JsonFileSource::new(&config))
    }

    #[tokio::test]
    async fn test_fallback_on_missing_files() {
        let (_dir, primary) = missing_files();
        let fallback = SyntheticSource::new(Some(1));

        let loaded = load_with_fallback(&primary, Some(&fallback as &dyn DatasetSource))
            .await
            .unwrap();
        assert!(loaded.from_fallback);
        assert_eq!(loaded.source_name, "synthetic");
        assert_eq!(loaded.dataset.conflicts.len(), 20);
    }

    #[tokio::test]
    async fn test_no_fallback_is_unavailable() {
        let (_dir, primary) = missing_files();
        let error = load_with_fallback(&primary, None).await.unwrap_err();
        assert!(matches!(error, DataError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_both_sources_failing() {
        let error = load_with_fallback(&FailingSource, Some(&FailingSource as &dyn DatasetSource))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("fallback failing failed"));
    }

    #[tokio::test]
    async fn test_primary_success() {
        let primary = SyntheticSource::new(Some(3));
        let loaded = load_with_fallback(&primary, Some(&FailingSource as &dyn DatasetSource))
            .await
            .unwrap();
        assert!(!loaded.from_fallback);
    }
}
