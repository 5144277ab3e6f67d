//! Core functionality for the conflict dashboard
//!
//! This crate provides the data model, the shared filter state and the
//! coordination engine that keeps the linked views in sync.

pub mod coordinator;
pub mod data;
pub mod detail;
pub mod events;
pub mod filter;
pub mod state;
pub mod sync;
pub mod view;

// Re-export commonly used types
pub use coordinator::{Coordinator, Intent, RangeBound};
pub use data::{Conflict, ConflictId, Dataset, EventId, MonthlyAggregate, ViolenceType};
pub use detail::{ConflictDetail, Detail, EventDetail, FilterSummary};
pub use events::EventBus;
pub use filter::filter;
pub use state::{FilterState, HoverTarget, Selection, SpatialExtent, TimeRange, ViolenceTypeSet};
pub use sync::{Clock, HighlightTiming, ManualClock, SystemClock};
pub use view::{ElementRef, LinkedView, ViewCapabilities, ViewError, ViewKind, ViewRegistry};
