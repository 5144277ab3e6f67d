//! Event map
//!
//! One circle marker per filtered event, sized by deaths and colored by
//! violence category. A cross-view highlight emphasizes the markers of the
//! highlighted conflict and dims the rest.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use cv_core::{ConflictId, Dataset, EventId, LinkedView, ViewKind, ViolenceType};
use serde::{Deserialize, Serialize};

use crate::style::{self, violence_color, Color, ElementStyle, Styled};

/// Map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    pub fill_opacity: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_radius: 3.0,
            max_radius: 15.0,
            fill_opacity: 0.6,
        }
    }
}

/// A rendered event marker
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub event_id: EventId,
    pub conflict_id: ConflictId,
    pub latitude: f64,
    pub longitude: f64,
    pub violence_type: ViolenceType,
    pub radius: f64,
    pub color: Color,
    pub style: ElementStyle,
}

impl Styled for MapMarker {
    fn key(&self) -> u64 {
        self.event_id
    }

    fn conflict(&self) -> Option<ConflictId> {
        Some(self.conflict_id)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}

/// Map view
pub struct MapView {
    pub config: MapConfig,
    markers: Vec<MapMarker>,
    local_hover: Option<u64>,
}

impl MapView {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            markers: Vec::new(),
            local_hover: None,
        }
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn marker(&self, event_id: EventId) -> Option<&MapMarker> {
        self.markers.iter().find(|marker| marker.event_id == event_id)
    }

    /// Marker radius for an event with `best` deaths
    pub fn marker_radius(&self, best: u32) -> f64 {
        (f64::from(best).sqrt() * 2.0).clamp(self.config.min_radius, self.config.max_radius)
    }

    /// Conflict with the most events among a group of markers. Clicking a
    /// cluster selects this conflict. Ties go to the lower id.
    pub fn dominant_conflict(&self, event_ids: &[EventId]) -> Option<ConflictId> {
        let mut counts: BTreeMap<ConflictId, usize> = BTreeMap::new();
        for marker in self.markers.iter().filter(|m| event_ids.contains(&m.event_id)) {
            *counts.entry(marker.conflict_id).or_default() += 1;
        }

        let mut dominant: Option<(ConflictId, usize)> = None;
        for (conflict, count) in counts {
            if dominant.map_or(true, |(_, best)| count > best) {
                dominant = Some((conflict, count));
            }
        }
        dominant.map(|(conflict, _)| conflict)
    }

    /// Most frequent violence category in a group of markers, used for the cluster color
    pub fn dominant_type(&self, event_ids: &[EventId]) -> Option<ViolenceType> {
        let mut counts = [0usize; 3];
        for marker in self.markers.iter().filter(|m| event_ids.contains(&m.event_id)) {
            counts[usize::from(marker.violence_type.code()) - 1] += 1;
        }

        let mut dominant = None;
        let mut most = 0;
        for (violence_type, count) in ViolenceType::ALL.into_iter().zip(counts) {
            if count > most {
                most = count;
                dominant = Some(violence_type);
            }
        }
        dominant
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl LinkedView for MapView {
    fn kind(&self) -> ViewKind {
        ViewKind::Map
    }

    fn render(&mut self, data: &Dataset) {
        self.markers = data
            .events
            .iter()
            .map(|event| MapMarker {
                event_id: event.id,
                conflict_id: event.conflict_id,
                latitude: event.latitude,
                longitude: event.longitude,
                violence_type: event.type_of_violence,
                radius: self.marker_radius(event.best),
                color: violence_color(event.type_of_violence),
                style: ElementStyle::default(),
            })
            .collect();
        style::set_local_hover(&mut self.markers, self.local_hover);

        tracing::debug!("Map rendered {} markers", self.markers.len());
    }

    fn apply_highlight(&mut self, conflict: ConflictId, _origin: ViewKind) {
        style::highlight(&mut self.markers, conflict);
    }

    fn clear_highlight(&mut self) {
        style::clear(&mut self.markers);
    }

    fn set_local_hover(&mut self, element: Option<u64>) {
        self.local_hover = element;
        style::set_local_hover(&mut self.markers, element);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map: {} markers", self.markers.len())?;
        let highlighted = self
            .markers
            .iter()
            .filter(|m| m.style.emphasis == style::Emphasis::Emphasized)
            .count();
        if highlighted > 0 {
            write!(f, ", {} highlighted", highlighted)?;
        }
        Ok(())
    }
}
