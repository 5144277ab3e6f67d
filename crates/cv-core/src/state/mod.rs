//! Filter and selection state shared by every linked view

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::data::{ConflictId, EventId, ViolenceType};
use crate::view::ViewKind;

/// First year covered by the dataset
pub const DEFAULT_START_YEAR: i32 = 1989;

/// Last year covered by the dataset
pub const DEFAULT_END_YEAR: i32 = 2024;

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    /// Range from January 1st of `start_year` to December 31st of `end_year`
    pub fn years(start_year: i32, end_year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(start_year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(end_year, 12, 31)?,
        })
    }

    /// Whether `date` lies within the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(DEFAULT_START_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(DEFAULT_END_YEAR, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Inclusive latitude/longitude bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl SpatialExtent {
    /// The whole globe
    pub const WORLD: SpatialExtent = SpatialExtent {
        min_lat: -90.0,
        max_lat: 90.0,
        min_lon: -180.0,
        max_lon: 180.0,
    };

    /// Whether the position lies within the box, edges included
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.min_lat <= latitude
            && latitude <= self.max_lat
            && self.min_lon <= longitude
            && longitude <= self.max_lon
    }
}

impl Default for SpatialExtent {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Set of enabled violence categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolenceTypeSet(BTreeSet<ViolenceType>);

impl ViolenceTypeSet {
    /// No category enabled
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Every category enabled
    pub fn all() -> Self {
        Self(ViolenceType::ALL.into_iter().collect())
    }

    pub fn contains(&self, violence_type: ViolenceType) -> bool {
        self.0.contains(&violence_type)
    }

    /// Symmetric-difference toggle. Returns whether the type is enabled afterwards.
    pub fn toggle(&mut self, violence_type: ViolenceType) -> bool {
        if self.0.remove(&violence_type) {
            false
        } else {
            self.0.insert(violence_type);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled categories in code order
    pub fn iter(&self) -> impl Iterator<Item = ViolenceType> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ViolenceTypeSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<ViolenceType> for ViolenceTypeSet {
    fn from_iter<I: IntoIterator<Item = ViolenceType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Current selection. A conflict and an event are never selected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Conflict(ConflictId),
    Event(EventId),
}

/// What the pointer is hovering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverTarget {
    Conflict(ConflictId),
    Event(EventId),
}

/// Hover descriptor of the live cross-view highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hovered {
    pub target: HoverTarget,

    /// View the pointer is in
    pub origin: ViewKind,
}

/// Time, space and category constraints plus selection and hover
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub time_range: TimeRange,
    pub spatial_extent: SpatialExtent,
    pub violence_types: ViolenceTypeSet,
    pub selection: Selection,
    pub hovered: Option<Hovered>,
}

impl FilterState {
    /// Selected conflict, if the selection is a conflict
    pub fn selected_conflict(&self) -> Option<ConflictId> {
        match self.selection {
            Selection::Conflict(id) => Some(id),
            _ => None,
        }
    }

    /// Selected event, if the selection is an event
    pub fn selected_event(&self) -> Option<EventId> {
        match self.selection {
            Selection::Event(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the time range is the full dataset span
    pub fn has_default_time_range(&self) -> bool {
        self.time_range.start_year() == DEFAULT_START_YEAR
            && self.time_range.end_year() == DEFAULT_END_YEAR
    }

    /// Restore every default in one assignment
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
