//! Filter engine
//!
//! Derives the per-view dataset from the full data store and the current
//! [`FilterState`]. Recomputes from scratch on every call; there is no cached
//! or incremental state.

use crate::data::{Conflict, Dataset, Event, MonthlyAggregate};
use crate::state::FilterState;

/// Apply every constraint of `state` to `dataset`
pub fn filter(dataset: &Dataset, state: &FilterState) -> Dataset {
    let filtered = Dataset {
        events: dataset
            .events
            .iter()
            .filter(|event| event_matches(event, state))
            .cloned()
            .collect(),
        conflicts: dataset
            .conflicts
            .iter()
            .filter(|conflict| conflict_matches(conflict, state))
            .cloned()
            .collect(),
        monthly_deaths: dataset
            .monthly_deaths
            .iter()
            .filter(|record| monthly_matches(record, state))
            .cloned()
            .collect(),
    };

    tracing::debug!(
        "Filtered dataset: {} events, {} conflicts, {} monthly records",
        filtered.events.len(),
        filtered.conflicts.len(),
        filtered.monthly_deaths.len()
    );

    filtered
}

/// Events are constrained by time, space and category
pub fn event_matches(event: &Event, state: &FilterState) -> bool {
    state.time_range.contains(event.date)
        && state.spatial_extent.contains(event.latitude, event.longitude)
        && state.violence_types.contains(event.type_of_violence)
}

/// Conflicts span many events, so only the category applies
pub fn conflict_matches(conflict: &Conflict, state: &FilterState) -> bool {
    state.violence_types.contains(conflict.violence_type)
}

/// Monthly buckets match on their first day and category
pub fn monthly_matches(record: &MonthlyAggregate, state: &FilterState) -> bool {
    record
        .first_day()
        .map_or(false, |day| state.time_range.contains(day))
        && state.violence_types.contains(record.violence_type)
}
