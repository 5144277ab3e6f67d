use std::path::PathBuf;

use async_trait::async_trait;
use cv_core::data::{Conflict, Event, MonthlyAggregate};
use cv_core::Dataset;
use serde::de::DeserializeOwned;

use super::DatasetSource;
use crate::config::DataConfig;
use crate::DataError;

/// Reads the three preprocessed JSON resources from disk
pub struct JsonFileSource {
    name: String,
    conflicts_path: PathBuf,
    events_path: PathBuf,
    monthly_deaths_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(config: &DataConfig) -> Self {
        Self {
            name: config.data_dir.display().to_string(),
            conflicts_path: config.conflicts_path(),
            events_path: config.events_path(),
            monthly_deaths_path: config.monthly_deaths_path(),
        }
    }

    /// Read and parse one JSON array. Parsing runs off the async thread.
    async fn read_array<T>(path: PathBuf) -> Result<Vec<T>, DataError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let bytes = tokio::fs::read(&path).await.map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;

        tokio::task::spawn_blocking(move || {
            serde_json::from_slice::<Vec<T>>(&bytes)
                .map_err(|source| DataError::Json { path, source })
        })
        .await?
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        let (conflicts, events, monthly_deaths) = tokio::try_join!(
            Self::read_array::<Conflict>(self.conflicts_path.clone()),
            Self::read_array::<Event>(self.events_path.clone()),
            Self::read_array::<MonthlyAggregate>(self.monthly_deaths_path.clone()),
        )?;

        tracing::info!("Loaded {} conflicts", conflicts.len());
        tracing::info!("Loaded {} events", events.len());

        let mut dataset = Dataset {
            events,
            conflicts,
            monthly_deaths,
        };
        dataset.fill_short_names();
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_core::ViolenceType;
    use std::fs;
    use tempfile::TempDir;

    const CONFLICTS: &str = r#"[
        {"id": 1, "name": "Government of Syria - IS", "violence_type": 1,
         "low": 700, "best": 1000, "high": 1300, "civilian_deaths": 600,
         "combatant_deaths": 400, "civilian_ratio": 0.6, "start_year": 2013,
         "end_year": 2019, "event_count": 12}
    ]"#;

    const EVENTS: &str = r#"[
        {"id": 10, "date": "2014-03-02T00:00:00.000Z", "latitude": 33.5, "longitude": 36.3,
         "type_of_violence": 1, "best": 25, "civilian_deaths": 20, "combatant_deaths": 5,
         "conflict_id": 1, "country": "Syria", "region": "Aleppo"}
    ]"#;

    const MONTHLY: &str = r#"[
        {"year": 2014, "month": 3, "type": 1, "deaths": 25},
        {"year": 2014, "month": 3, "type": 3, "deaths": 4}
    ]"#;

    fn write_fixture(conflicts: &str, events: &str, monthly: &str) -> (TempDir, DataConfig) {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            data_dir: dir.path().to_path_buf(),
            ..DataConfig::default()
        };
        fs::write(config.conflicts_path(), conflicts).unwrap();
        fs::write(config.events_path(), events).unwrap();
        fs::write(config.monthly_deaths_path(), monthly).unwrap();
        (dir, config)
    }

    #[tokio::test]
    async fn test_load_json_files() {
        let (_dir, config) = write_fixture(CONFLICTS, EVENTS, MONTHLY);
        let dataset = JsonFileSource::new(&config).load().await.unwrap();

        assert_eq!(dataset.conflicts.len(), 1);
        assert_eq!(dataset.conflicts[0].short_name, "Syria - IS");
        assert_eq!(dataset.events[0].date.to_string(), "2014-03-02");
        assert_eq!(dataset.monthly_deaths[1].violence_type, ViolenceType::OneSided);
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let (_dir, config) = write_fixture(CONFLICTS, EVENTS, MONTHLY);
        fs::remove_file(config.events_path()).unwrap();

        match JsonFileSource::new(&config).load().await {
            Err(DataError::Io { path, .. }) => assert_eq!(path, config.events_path()),
            other => panic!("expected I/O error, got {:?}", other.map(|d| d.events.len())),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (_dir, config) = write_fixture(CONFLICTS, EVENTS, r#"[{"year": 2014}]"#);

        let error = JsonFileSource::new(&config).load().await.unwrap_err();
        assert!(matches!(error, DataError::Json { .. }));
        assert!(error.to_string().contains("monthly_deaths_by_type.json"));
    }
}
