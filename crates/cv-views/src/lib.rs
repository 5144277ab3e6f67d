//! Linked views of the conflict dashboard
//!
//! Each view builds the model it would draw from the filtered dataset and
//! tracks per-element emphasis for cross-view highlighting.

pub mod civilian;
pub mod map;
pub mod style;
pub mod timeline;
pub mod uncertainty;

pub use civilian::CivilianImpactView;
pub use map::{MapConfig, MapView};
pub use timeline::TimelineView;
pub use uncertainty::{UncertaintyConfig, UncertaintyView};

use cv_core::{LinkedView, ViewKind, ViewRegistry};
use serde::{Deserialize, Serialize};

/// Per-view settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub map: MapConfig,
    pub uncertainty: UncertaintyConfig,
}

/// Create every view kind. A view that fails to come up is left out and
/// the dashboard runs without it.
pub fn register_views(registry: &mut ViewRegistry, config: &ViewsConfig) {
    for kind in ViewKind::ALL {
        let result = registry.register(kind, || -> anyhow::Result<Box<dyn LinkedView>> {
            let view: Box<dyn LinkedView> = match kind {
                ViewKind::Map => Box::new(MapView::new(config.map.clone())),
                ViewKind::Timeline => Box::new(TimelineView::new()),
                ViewKind::CivilianImpact => Box::new(CivilianImpactView::new()),
                ViewKind::Uncertainty => Box::new(UncertaintyView::new(config.uncertainty.clone())),
            };
            Ok(view)
        });
        if let Err(e) = result {
            tracing::debug!("Continuing without view: {}", e);
        }
    }
}
