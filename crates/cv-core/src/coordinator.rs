//! Coordinator
//!
//! Owns the [`FilterState`], turns UI intents into state changes and fans the
//! results out to every registered view. A state mutation is always completed
//! before any view is called, and views only ever see the dataset by shared
//! reference, so no view can observe a half-applied change.

use std::sync::Arc;
use std::time::Instant;

use crate::data::{ConflictId, Dataset, EventId, ViolenceType};
use crate::detail::{ConflictDetail, Detail, EventDetail, FilterSummary};
use crate::events::events::{DetailClosed, DetailRequested, FiltersApplied, HighlightChanged};
use crate::events::EventBus;
use crate::filter::filter;
use crate::state::{FilterState, HoverTarget, Hovered, Selection, SpatialExtent, TimeRange};
use crate::sync::{Clock, HighlightCommand, HighlightProtocol, HighlightTiming, SystemClock};
use crate::view::{ElementRef, ViewKind, ViewRegistry};

/// Which end of the year slider the user is dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// UI intents understood by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetTimeRange {
        start_year: i32,
        end_year: i32,
        moved: RangeBound,
    },
    SetSpatialExtent(SpatialExtent),
    ToggleViolenceType(ViolenceType),
    Reset,
    SelectConflict(ConflictId),
    SelectEvent(EventId),
    CloseDetail,
    HoverEnter {
        element: ElementRef,
        target: HoverTarget,
    },
    HoverLeave {
        element: ElementRef,
    },
    /// Fire highlight timers that are due
    Tick,
}

/// Cross-view coordination engine
pub struct Coordinator {
    store: Arc<Dataset>,
    state: FilterState,
    filtered: Dataset,
    summary: FilterSummary,
    views: ViewRegistry,
    highlight: HighlightProtocol,
    clock: Arc<dyn Clock>,
    event_bus: Arc<EventBus>,
}

impl Coordinator {
    /// Create a coordinator over a loaded data store
    pub fn new(store: Arc<Dataset>, views: ViewRegistry) -> Self {
        let state = FilterState::default();
        let filtered = filter(&store, &state);
        let summary = FilterSummary::new(&state, &filtered);

        Self {
            store,
            state,
            filtered,
            summary,
            views,
            highlight: HighlightProtocol::default(),
            clock: Arc::new(SystemClock),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    /// Use a different time source for the highlight timers
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timing(mut self, timing: HighlightTiming) -> Self {
        self.highlight = HighlightProtocol::new(timing);
        self
    }

    /// Publish to a shared event bus
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn store(&self) -> &Dataset {
        &self.store
    }

    /// Dataset the views were last rendered with
    pub fn filtered(&self) -> &Dataset {
        &self.filtered
    }

    pub fn summary(&self) -> &FilterSummary {
        &self.summary
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn highlight(&self) -> &HighlightProtocol {
        &self.highlight
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// When the next highlight timer is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.highlight.next_deadline()
    }

    /// First render of every view
    pub fn start(&mut self) {
        tracing::info!(
            "Starting dashboard with views: {:?}",
            self.views.available().collect::<Vec<_>>()
        );
        self.refresh();
    }

    /// Route an intent to its handler
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SetTimeRange { start_year, end_year, moved } => {
                self.set_time_range(start_year, end_year, moved)
            }
            Intent::SetSpatialExtent(extent) => self.set_spatial_extent(extent),
            Intent::ToggleViolenceType(violence_type) => self.toggle_violence_type(violence_type),
            Intent::Reset => self.reset(),
            Intent::SelectConflict(id) => {
                self.select_conflict(id);
            }
            Intent::SelectEvent(id) => {
                self.select_event(id);
            }
            Intent::CloseDetail => self.close_detail(),
            Intent::HoverEnter { element, target } => self.hover_enter(element, target),
            Intent::HoverLeave { element } => self.hover_leave(element),
            Intent::Tick => self.tick(),
        }
    }

    /// Set the year range. If the bounds cross, the bound being moved is pinned
    /// to the other one.
    pub fn set_time_range(&mut self, start_year: i32, end_year: i32, moved: RangeBound) {
        let (start_year, end_year) = if start_year > end_year {
            match moved {
                RangeBound::Start => (end_year, end_year),
                RangeBound::End => (start_year, start_year),
            }
        } else {
            (start_year, end_year)
        };

        let Some(time_range) = TimeRange::years(start_year, end_year) else {
            tracing::warn!("Ignoring unrepresentable year range {}-{}", start_year, end_year);
            return;
        };

        self.state.time_range = time_range;
        self.refresh();
    }

    pub fn set_spatial_extent(&mut self, extent: SpatialExtent) {
        self.state.spatial_extent = extent;
        self.refresh();
    }

    /// Enable or disable one category. Disabling the last one is allowed.
    pub fn toggle_violence_type(&mut self, violence_type: ViolenceType) {
        let enabled = self.state.violence_types.toggle(violence_type);
        tracing::debug!("{} {}", violence_type, if enabled { "enabled" } else { "disabled" });
        self.refresh();
    }

    /// Restore every default, dropping selection, hover and pending highlight timers
    pub fn reset(&mut self) {
        let had_selection = self.state.selection != Selection::None;

        for kind in ViewKind::ALL {
            if self.highlight.local_hover(kind).is_some() {
                self.views.set_local_hover(kind, None);
            }
        }
        if self.highlight.reset().is_some() {
            self.views.clear_all();
            self.event_bus.publish(HighlightChanged { conflict: None, origin: None });
        }

        self.state.reset();
        self.refresh();

        if had_selection {
            self.event_bus.publish(DetailClosed);
        }
    }

    /// Select a conflict and show its detail. Unknown ids are ignored.
    pub fn select_conflict(&mut self, id: ConflictId) -> bool {
        let Some(conflict) = self.store.conflict(id) else {
            tracing::debug!("Conflict {} not found, selection unchanged", id);
            return false;
        };
        let detail = ConflictDetail::from_conflict(conflict);

        self.state.selection = Selection::Conflict(id);
        self.refresh();

        self.event_bus.publish(DetailRequested {
            detail: Detail::Conflict(detail),
        });
        true
    }

    /// Select an event and show it with its owning conflict. Unknown ids are ignored.
    pub fn select_event(&mut self, id: EventId) -> bool {
        let Some(event) = self.store.event(id) else {
            tracing::debug!("Event {} not found, selection unchanged", id);
            return false;
        };
        let detail = EventDetail::from_event(event, &self.store);

        self.state.selection = Selection::Event(id);

        self.event_bus.publish(DetailRequested {
            detail: Detail::Event(detail),
        });
        true
    }

    pub fn close_detail(&mut self) {
        self.state.selection = Selection::None;
        self.refresh();
        self.event_bus.publish(DetailClosed);
    }

    /// Pointer entered an element. Local feedback is immediate, the cross-view
    /// broadcast waits for the apply delay.
    pub fn hover_enter(&mut self, element: ElementRef, target: HoverTarget) {
        let conflict = match target {
            HoverTarget::Conflict(id) => Some(id),
            HoverTarget::Event(id) => self.store.event(id).map(|event| event.conflict_id),
        };

        self.views.set_local_hover(element.view, Some(element.key));
        self.highlight
            .hover_enter(element, target, conflict, self.clock.now());
        self.tick();
    }

    /// Pointer left an element
    pub fn hover_leave(&mut self, element: ElementRef) {
        if self.highlight.hover_leave(element, self.clock.now()) {
            self.views.set_local_hover(element.view, None);
        }
        self.tick();
    }

    /// Fire due highlight timers and fan out their broadcasts
    pub fn tick(&mut self) {
        let commands = self.highlight.poll(self.clock.now());

        for command in commands {
            match command {
                HighlightCommand::Highlight { conflict, origin } => {
                    tracing::debug!("Highlighting conflict {} from '{}'", conflict, origin);
                    self.views.highlight_all(conflict, origin);
                    self.event_bus.publish(HighlightChanged {
                        conflict: Some(conflict),
                        origin: Some(origin),
                    });
                }
                HighlightCommand::Clear => {
                    tracing::debug!("Clearing cross-view highlight");
                    self.views.clear_all();
                    self.event_bus.publish(HighlightChanged { conflict: None, origin: None });
                }
            }
        }

        self.state.hovered = self.highlight.live().map(|live| Hovered {
            target: live.target,
            origin: live.origin,
        });
    }

    /// Recompute the filtered dataset and redraw every view
    fn refresh(&mut self) {
        self.filtered = filter(&self.store, &self.state);
        self.views.render_all(&self.filtered);

        if let Some(live) = self.highlight.live() {
            self.views.highlight_all(live.conflict, live.origin);
        }

        self.summary = FilterSummary::new(&self.state, &self.filtered);
        tracing::info!("{}", self.summary);
        self.event_bus.publish(FiltersApplied {
            summary: self.summary.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Conflict, Event, MonthlyAggregate};
    use crate::state::ViolenceTypeSet;
    use crate::sync::ManualClock;
    use crate::view::LinkedView;
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use std::any::Any;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Render { view: ViewKind, events: usize },
        Highlight { view: ViewKind, conflict: ConflictId },
        Clear { view: ViewKind },
        Local { view: ViewKind, element: Option<u64> },
    }

    struct RecordingView {
        kind: ViewKind,
        log: Arc<Mutex<Vec<Call>>>,
    }

    impl LinkedView for RecordingView {
        fn kind(&self) -> ViewKind {
            self.kind
        }

        fn render(&mut self, data: &Dataset) {
            self.log.lock().push(Call::Render { view: self.kind, events: data.events.len() });
        }

        fn apply_highlight(&mut self, conflict: ConflictId, _origin: ViewKind) {
            self.log.lock().push(Call::Highlight { view: self.kind, conflict });
        }

        fn clear_highlight(&mut self) {
            self.log.lock().push(Call::Clear { view: self.kind });
        }

        fn set_local_hover(&mut self, element: Option<u64>) {
            self.log.lock().push(Call::Local { view: self.kind, element });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn event(id: u64, year: i32, violence_type: ViolenceType, conflict_id: ConflictId) -> Event {
        Event {
            id,
            date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            latitude: 10.0,
            longitude: 10.0,
            type_of_violence: violence_type,
            best: 10,
            civilian_deaths: 4,
            combatant_deaths: 6,
            conflict_id,
            country: "Testland".to_string(),
            region: None,
        }
    }

    fn conflict(id: ConflictId, violence_type: ViolenceType) -> Conflict {
        Conflict {
            id,
            name: format!("Conflict {}", id),
            short_name: format!("C{}", id),
            violence_type,
            low: 50,
            best: 100,
            high: 150,
            civilian_deaths: 40,
            combatant_deaths: 60,
            civilian_ratio: 0.4,
            start_year: 1990,
            end_year: 1995,
            event_count: 2,
        }
    }

    fn store() -> Arc<Dataset> {
        Arc::new(Dataset {
            events: vec![
                event(1, 1990, ViolenceType::StateBased, 5),
                event(2, 1995, ViolenceType::StateBased, 5),
                event(3, 2001, ViolenceType::NonState, 7),
                event(4, 2003, ViolenceType::OneSided, 99),
            ],
            conflicts: vec![
                conflict(5, ViolenceType::StateBased),
                conflict(7, ViolenceType::NonState),
            ],
            monthly_deaths: vec![MonthlyAggregate {
                year: 1990,
                month: 1,
                violence_type: ViolenceType::StateBased,
                deaths: 12,
            }],
        })
    }

    struct Harness {
        coordinator: Coordinator,
        clock: Arc<ManualClock>,
        log: Arc<Mutex<Vec<Call>>>,
        details: Arc<Mutex<Vec<Option<Detail>>>>,
    }

    impl Harness {
        fn new(kinds: &[ViewKind]) -> Self {
            let log = Arc::new(Mutex::new(Vec::new()));
            let mut views = ViewRegistry::new();
            for kind in kinds {
                views.insert(Box::new(RecordingView { kind: *kind, log: log.clone() }));
            }

            let clock = Arc::new(ManualClock::new());
            let coordinator = Coordinator::new(store(), views).with_clock(clock.clone());

            let details = Arc::new(Mutex::new(Vec::new()));
            let sink = details.clone();
            coordinator.event_bus().on::<DetailRequested, _>(move |event| {
                sink.lock().push(Some(event.detail.clone()))
            });
            let sink = details.clone();
            coordinator.event_bus().on::<DetailClosed, _>(move |_| sink.lock().push(None));

            Self { coordinator, clock, log, details }
        }

        fn advance(&mut self, millis: u64) {
            self.clock.advance(Duration::from_millis(millis));
            self.coordinator.tick();
        }

        fn take_log(&self) -> Vec<Call> {
            std::mem::take(&mut *self.log.lock())
        }

        fn broadcasts(&self) -> Vec<Call> {
            self.take_log()
                .into_iter()
                .filter(|call| matches!(call, Call::Highlight { .. } | Call::Clear { .. }))
                .collect()
        }
    }

    fn marker(key: u64) -> ElementRef {
        ElementRef::new(ViewKind::Map, key)
    }

    #[test]
    fn test_start_renders_every_view() {
        let mut harness = Harness::new(&[ViewKind::Map, ViewKind::Timeline]);
        harness.coordinator.start();
        assert_eq!(
            harness.take_log(),
            vec![
                Call::Render { view: ViewKind::Map, events: 4 },
                Call::Render { view: ViewKind::Timeline, events: 4 },
            ]
        );
        assert_eq!(harness.coordinator.summary().text, "Showing 4 events");
    }

    #[test]
    fn test_missing_view_is_tolerated() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut views = ViewRegistry::new();
        let failed =
            views.register(ViewKind::Map, || Err(anyhow::anyhow!("map library failed to load")));
        assert!(failed.is_err());
        let sink = log.clone();
        views
            .register(ViewKind::Timeline, move || {
                let view = RecordingView {
                    kind: ViewKind::Timeline,
                    log: sink,
                };
                Ok(Box::new(view) as Box<dyn LinkedView>)
            })
            .unwrap();

        let mut coordinator = Coordinator::new(store(), views);
        coordinator.start();
        coordinator.toggle_violence_type(ViolenceType::StateBased);

        assert_eq!(
            *log.lock(),
            vec![
                Call::Render { view: ViewKind::Timeline, events: 4 },
                Call::Render { view: ViewKind::Timeline, events: 2 },
            ]
        );
    }

    #[test]
    fn test_time_range_scenario() {
        let mut harness = Harness::new(&[ViewKind::Map]);
        harness.coordinator.set_time_range(1990, 1991, RangeBound::End);
        let ids: Vec<u64> = harness.coordinator.filtered().events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(harness.coordinator.summary().text, "Showing 1 events (1990-1991)");
    }

    #[test]
    fn test_time_range_pins_moved_bound() {
        let mut harness = Harness::new(&[]);

        harness.coordinator.set_time_range(2000, 1995, RangeBound::Start);
        let range = harness.coordinator.state().time_range;
        assert_eq!((range.start_year(), range.end_year()), (1995, 1995));

        harness.coordinator.set_time_range(2000, 1995, RangeBound::End);
        let range = harness.coordinator.state().time_range;
        assert_eq!((range.start_year(), range.end_year()), (2000, 2000));
    }

    #[test]
    fn test_toggle_scenario() {
        let mut harness = Harness::new(&[]);
        harness.coordinator.toggle_violence_type(ViolenceType::NonState);
        assert_eq!(
            harness.coordinator.state().violence_types,
            [ViolenceType::OneSided, ViolenceType::StateBased].into_iter().collect()
        );
        harness.coordinator.toggle_violence_type(ViolenceType::NonState);
        assert_eq!(harness.coordinator.state().violence_types, ViolenceTypeSet::all());
    }

    #[test]
    fn test_all_types_disabled_renders_empty() {
        let mut harness = Harness::new(&[ViewKind::Map]);
        for violence_type in ViolenceType::ALL {
            harness.coordinator.toggle_violence_type(violence_type);
        }
        assert!(harness.coordinator.filtered().is_empty());
        assert_eq!(
            harness.take_log().last(),
            Some(&Call::Render { view: ViewKind::Map, events: 0 })
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut harness = Harness::new(&[ViewKind::Map]);
        harness.coordinator.set_time_range(1995, 2000, RangeBound::Start);
        harness.coordinator.toggle_violence_type(ViolenceType::OneSided);
        harness.coordinator.set_spatial_extent(SpatialExtent {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        });
        harness.coordinator.select_conflict(5);
        harness.coordinator.hover_enter(marker(1), HoverTarget::Event(1));
        harness.advance(100);
        assert!(harness.coordinator.state().hovered.is_some());

        harness.take_log();
        harness.coordinator.reset();

        assert_eq!(*harness.coordinator.state(), FilterState::default());
        assert!(harness.coordinator.highlight().live().is_none());
        assert!(harness.coordinator.next_deadline().is_none());
        assert_eq!(
            harness.take_log(),
            vec![
                Call::Local { view: ViewKind::Map, element: None },
                Call::Clear { view: ViewKind::Map },
                Call::Render { view: ViewKind::Map, events: 4 },
            ]
        );
        assert_eq!(harness.details.lock().last(), Some(&None));
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut harness = Harness::new(&[]);

        assert!(harness.coordinator.select_conflict(5));
        assert_eq!(harness.coordinator.state().selected_conflict(), Some(5));
        assert_eq!(harness.coordinator.state().selected_event(), None);

        assert!(harness.coordinator.select_event(3));
        assert_eq!(harness.coordinator.state().selected_conflict(), None);
        assert_eq!(harness.coordinator.state().selected_event(), Some(3));

        harness.coordinator.close_detail();
        assert_eq!(harness.coordinator.state().selection, Selection::None);
    }

    #[test]
    fn test_selection_leaves_filters_alone() {
        let mut harness = Harness::new(&[]);
        harness.coordinator.set_time_range(1990, 2000, RangeBound::End);
        harness.coordinator.toggle_violence_type(ViolenceType::OneSided);
        let before = harness.coordinator.state().clone();

        harness.coordinator.select_conflict(7);
        let after = harness.coordinator.state();
        assert_eq!(after.time_range, before.time_range);
        assert_eq!(after.spatial_extent, before.spatial_extent);
        assert_eq!(after.violence_types, before.violence_types);
    }

    #[test]
    fn test_unknown_event_selection_is_noop() {
        let mut harness = Harness::new(&[]);
        harness.coordinator.select_conflict(5);
        let details_before = harness.details.lock().len();

        assert!(!harness.coordinator.select_event(12345));
        assert!(!harness.coordinator.select_conflict(12345));
        assert_eq!(harness.coordinator.state().selection, Selection::Conflict(5));
        assert_eq!(harness.details.lock().len(), details_before);
    }

    #[test]
    fn test_event_detail_with_missing_conflict() {
        let mut harness = Harness::new(&[]);
        assert!(harness.coordinator.select_event(4));
        match harness.details.lock().last() {
            Some(Some(Detail::Event(detail))) => {
                assert_eq!(detail.conflict.name(), "Unknown conflict");
                assert_eq!(detail.violence_type, ViolenceType::OneSided);
            }
            other => panic!("unexpected detail {:?}", other),
        };
    }

    #[test]
    fn test_conflict_detail_signal() {
        let mut harness = Harness::new(&[]);
        harness.coordinator.select_conflict(7);
        match harness.details.lock().last() {
            Some(Some(Detail::Conflict(detail))) => {
                assert_eq!(detail.civilian_percent, 40);
                assert_eq!(detail.year_span(), "1990 - 1995");
            }
            other => panic!("unexpected detail {:?}", other),
        };
    }

    #[test]
    fn test_hover_gives_immediate_local_feedback() {
        let mut harness = Harness::new(&[ViewKind::Map, ViewKind::CivilianImpact]);
        harness.coordinator.hover_enter(marker(2), HoverTarget::Event(2));
        assert_eq!(
            harness.take_log(),
            vec![Call::Local { view: ViewKind::Map, element: Some(2) }]
        );
    }

    #[test]
    fn test_highlight_debounce() {
        let mut harness = Harness::new(&[ViewKind::Map, ViewKind::CivilianImpact]);
        harness.coordinator.hover_enter(marker(1), HoverTarget::Conflict(5));
        harness.advance(60);
        harness.coordinator.hover_enter(marker(3), HoverTarget::Conflict(7));
        for _ in 0..20 {
            harness.advance(10);
        }

        assert_eq!(
            harness.broadcasts(),
            vec![
                Call::Highlight { view: ViewKind::Map, conflict: 7 },
                Call::Highlight { view: ViewKind::CivilianImpact, conflict: 7 },
            ]
        );
        let hovered = harness.coordinator.state().hovered.unwrap();
        assert_eq!(hovered.target, HoverTarget::Conflict(7));
        assert_eq!(hovered.origin, ViewKind::Map);
    }

    #[test]
    fn test_highlight_anti_flash() {
        let mut harness = Harness::new(&[ViewKind::Map, ViewKind::Timeline]);
        harness.coordinator.hover_enter(marker(1), HoverTarget::Event(1));
        harness.advance(100);
        harness.take_log();

        harness.coordinator.hover_leave(marker(1));
        harness.advance(20);
        harness.coordinator.hover_enter(marker(3), HoverTarget::Event(3));
        for _ in 0..20 {
            harness.advance(10);
        }

        assert_eq!(
            harness.broadcasts(),
            vec![
                Call::Highlight { view: ViewKind::Map, conflict: 7 },
                Call::Highlight { view: ViewKind::Timeline, conflict: 7 },
            ]
        );
    }

    #[test]
    fn test_leave_clears_after_delay() {
        let mut harness = Harness::new(&[ViewKind::Map]);
        harness.coordinator.hover_enter(marker(1), HoverTarget::Event(1));
        harness.advance(100);
        harness.coordinator.hover_leave(marker(1));
        harness.advance(40);
        assert!(harness.coordinator.highlight().live().is_some());
        harness.advance(10);

        assert_eq!(
            harness.broadcasts(),
            vec![
                Call::Highlight { view: ViewKind::Map, conflict: 5 },
                Call::Clear { view: ViewKind::Map },
            ]
        );
        assert!(harness.coordinator.state().hovered.is_none());
    }

    #[test]
    fn test_live_highlight_survives_rerender() {
        let mut harness = Harness::new(&[ViewKind::Timeline]);
        harness
            .coordinator
            .hover_enter(ElementRef::new(ViewKind::Timeline, 5), HoverTarget::Conflict(5));
        harness.advance(100);
        harness.take_log();

        harness.coordinator.toggle_violence_type(ViolenceType::NonState);
        assert_eq!(
            harness.take_log(),
            vec![
                Call::Render { view: ViewKind::Timeline, events: 3 },
                Call::Highlight { view: ViewKind::Timeline, conflict: 5 },
            ]
        );
    }

    #[test]
    fn test_dispatch_routes_intents() {
        let mut harness = Harness::new(&[]);
        harness.coordinator.dispatch(Intent::ToggleViolenceType(ViolenceType::StateBased));
        harness.coordinator.dispatch(Intent::SelectEvent(3));
        assert!(!harness.coordinator.state().violence_types.contains(ViolenceType::StateBased));
        assert_eq!(harness.coordinator.state().selected_event(), Some(3));
        harness.coordinator.dispatch(Intent::Reset);
        assert_eq!(*harness.coordinator.state(), FilterState::default());
    }
}
