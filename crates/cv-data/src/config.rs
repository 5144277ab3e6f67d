//! Data loading configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the dataset lives and what to do when it cannot be read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the three JSON resources
    pub data_dir: PathBuf,

    pub conflicts_file: String,
    pub events_file: String,
    pub monthly_deaths_file: String,

    /// Substitute generated data when the files cannot be loaded
    pub synthetic_fallback: bool,

    /// Seed for the synthetic generator. Random when absent.
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            conflicts_file: "conflicts_summary.json".to_string(),
            events_file: "events_sample.json".to_string(),
            monthly_deaths_file: "monthly_deaths_by_type.json".to_string(),
            synthetic_fallback: true,
            seed: None,
        }
    }
}

impl DataConfig {
    pub fn conflicts_path(&self) -> PathBuf {
        self.data_dir.join(&self.conflicts_file)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    pub fn monthly_deaths_path(&self) -> PathBuf {
        self.data_dir.join(&self.monthly_deaths_file)
    }
}
