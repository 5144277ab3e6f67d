//! Linked view contract
//!
//! Views are external renderers. The core only knows them through the
//! [`LinkedView`] trait and never inspects their internals.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{ConflictId, Dataset};

mod registry;

pub use registry::ViewRegistry;

/// The four dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewKind {
    Map,
    Timeline,
    CivilianImpact,
    Uncertainty,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Map,
        ViewKind::Timeline,
        ViewKind::CivilianImpact,
        ViewKind::Uncertainty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Map => "map",
            ViewKind::Timeline => "timeline",
            ViewKind::CivilianImpact => "civilian-chart",
            ViewKind::Uncertainty => "uncertainty-chart",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(ViewKind::Map),
            "timeline" => Ok(ViewKind::Timeline),
            "civilian" | "civilian-chart" => Ok(ViewKind::CivilianImpact),
            "uncertainty" | "uncertainty-chart" => Ok(ViewKind::Uncertainty),
            other => Err(format!("unknown view '{}'", other)),
        }
    }
}

/// A hoverable element inside one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub view: ViewKind,

    /// View-local element key (event id for markers, conflict id for bars)
    pub key: u64,
}

impl ElementRef {
    pub fn new(view: ViewKind, key: u64) -> Self {
        Self { view, key }
    }
}

/// Which contract operations a view supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCapabilities {
    pub render: bool,
    pub highlight: bool,
    pub clear_highlight: bool,
}

impl ViewCapabilities {
    pub const ALL: ViewCapabilities = ViewCapabilities {
        render: true,
        highlight: true,
        clear_highlight: true,
    };

    pub const RENDER_ONLY: ViewCapabilities = ViewCapabilities {
        render: true,
        highlight: false,
        clear_highlight: false,
    };
}

impl Default for ViewCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Errors raised while bringing up a view
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("view '{kind}' failed to initialize: {source}")]
    Initialization {
        kind: ViewKind,
        #[source]
        source: anyhow::Error,
    },
}

/// A view kept in sync by the coordinator
///
/// Every operation is optional. The coordinator consults [`LinkedView::capabilities`]
/// before invoking one.
pub trait LinkedView: Send {
    /// Which dashboard view this is
    fn kind(&self) -> ViewKind;

    /// Supported operations
    fn capabilities(&self) -> ViewCapabilities {
        ViewCapabilities::ALL
    }

    /// Redraw from a filtered dataset. Must accept an empty dataset.
    fn render(&mut self, _data: &Dataset) {}

    /// Emphasize elements of `conflict`, de-emphasize the rest.
    /// Elements under local hover are left untouched.
    fn apply_highlight(&mut self, _conflict: ConflictId, _origin: ViewKind) {}

    /// Return every element not under local hover to neutral
    fn clear_highlight(&mut self) {}

    /// Instantaneous hover feedback on one element of this view, `None` on leave
    fn set_local_hover(&mut self, _element: Option<u64>) {}

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn Any;
}
