//! Dashboard configuration file

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cv_core::HighlightTiming;
use cv_data::DataConfig;
use cv_views::ViewsConfig;
use serde::{Deserialize, Serialize};

/// Delays of the cross-view highlight, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub apply_delay_ms: u64,
    pub clear_delay_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            apply_delay_ms: 100,
            clear_delay_ms: 50,
        }
    }
}

impl HighlightConfig {
    pub fn timing(&self) -> HighlightTiming {
        HighlightTiming {
            apply_delay: Duration::from_millis(self.apply_delay_ms),
            clear_delay: Duration::from_millis(self.clear_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub highlight: HighlightConfig,
    pub views: ViewsConfig,
}

impl DashboardConfig {
    /// Read a JSON config file, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
