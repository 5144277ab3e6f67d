//! Debounced cross-view highlight state machine
//!
//! Each view the pointer can hover in has its own tracker. A hover enter
//! schedules an apply after [`HighlightTiming::apply_delay`]; a newer enter
//! replaces it, so only the element the pointer settles on is broadcast. A hover
//! leave schedules a clear after [`HighlightTiming::clear_delay`]. The clear is
//! not cancelled by a following enter; instead it checks at fire time whether
//! any element has local hover and is suppressed if so.

use std::time::Instant;

use ahash::AHashMap;

use super::HighlightTiming;
use crate::data::ConflictId;
use crate::state::HoverTarget;
use crate::view::{ElementRef, ViewKind};

/// Externally visible phase of one hover source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Idle,
    PendingApply { conflict: ConflictId, deadline: Instant },
    Applied { conflict: ConflictId },
    PendingClear { deadline: Instant },
}

/// The one highlight currently broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveHighlight {
    pub conflict: ConflictId,
    pub target: HoverTarget,
    pub origin: ViewKind,
}

/// Fan-out the coordinator has to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightCommand {
    Highlight { conflict: ConflictId, origin: ViewKind },
    Clear,
}

#[derive(Debug, Clone, Copy)]
struct PendingApply {
    target: HoverTarget,
    conflict: ConflictId,
    deadline: Instant,
}

/// Timer state of one hover source
#[derive(Debug, Default)]
struct HoverTracker {
    /// Element with local hover feedback
    local: Option<u64>,
    apply: Option<PendingApply>,
    clear_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimerKind {
    Clear,
    Apply,
}

/// Highlight protocol over all hover sources
#[derive(Debug)]
pub struct HighlightProtocol {
    timing: HighlightTiming,
    trackers: AHashMap<ViewKind, HoverTracker>,
    live: Option<LiveHighlight>,
}

impl HighlightProtocol {
    pub fn new(timing: HighlightTiming) -> Self {
        Self {
            timing,
            trackers: AHashMap::new(),
            live: None,
        }
    }

    pub fn timing(&self) -> HighlightTiming {
        self.timing
    }

    /// Currently broadcast highlight
    pub fn live(&self) -> Option<LiveHighlight> {
        self.live
    }

    /// Whether any view shows local hover feedback
    pub fn any_local_hover(&self) -> bool {
        self.trackers.values().any(|tracker| tracker.local.is_some())
    }

    /// Element under local hover in `view`
    pub fn local_hover(&self, view: ViewKind) -> Option<u64> {
        self.trackers.get(&view).and_then(|tracker| tracker.local)
    }

    /// Pointer entered `element`. `conflict` is the resolved conflict of `target`;
    /// when `None` only local feedback applies.
    pub fn hover_enter(
        &mut self,
        element: ElementRef,
        target: HoverTarget,
        conflict: Option<ConflictId>,
        now: Instant,
    ) {
        // A single pointer: any other pending apply is superseded
        for tracker in self.trackers.values_mut() {
            tracker.apply = None;
        }

        let deadline = now + self.timing.apply_delay;
        let tracker = self.trackers.entry(element.view).or_default();
        tracker.local = Some(element.key);
        tracker.apply = conflict.map(|conflict| PendingApply {
            target,
            conflict,
            deadline,
        });
    }

    /// Pointer left `element`. Returns `false` for a stale leave of an element
    /// that no longer holds local hover.
    pub fn hover_leave(&mut self, element: ElementRef, now: Instant) -> bool {
        let tracker = self.trackers.entry(element.view).or_default();
        if matches!(tracker.local, Some(key) if key != element.key) {
            tracing::debug!("Ignoring stale hover leave on {:?}", element);
            return false;
        }

        tracker.local = None;
        tracker.apply = None;
        tracker.clear_at = Some(now + self.timing.clear_delay);
        true
    }

    /// Earliest pending timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.trackers
            .values()
            .flat_map(|tracker| {
                tracker
                    .apply
                    .map(|apply| apply.deadline)
                    .into_iter()
                    .chain(tracker.clear_at)
            })
            .min()
    }

    /// Fire every timer due at `now`, oldest first
    pub fn poll(&mut self, now: Instant) -> Vec<HighlightCommand> {
        let mut commands = Vec::new();

        while let Some((view, kind)) = self.next_due(now) {
            match kind {
                TimerKind::Apply => self.fire_apply(view, &mut commands),
                TimerKind::Clear => self.fire_clear(view, &mut commands),
            }
        }

        commands
    }

    fn next_due(&self, now: Instant) -> Option<(ViewKind, TimerKind)> {
        let mut due: Option<(Instant, TimerKind, ViewKind)> = None;

        for (view, tracker) in &self.trackers {
            let timers = [
                tracker.clear_at.map(|at| (at, TimerKind::Clear)),
                tracker.apply.map(|apply| (apply.deadline, TimerKind::Apply)),
            ];
            for (deadline, kind) in timers.into_iter().flatten() {
                if deadline > now {
                    continue;
                }
                let candidate = (deadline, kind, *view);
                if due.map_or(true, |current| candidate < current) {
                    due = Some(candidate);
                }
            }
        }

        due.map(|(_, kind, view)| (view, kind))
    }

    fn fire_apply(&mut self, view: ViewKind, commands: &mut Vec<HighlightCommand>) {
        let Some(apply) = self.trackers.get_mut(&view).and_then(|tracker| tracker.apply.take())
        else {
            return;
        };

        let already_live = self.live.map(|live| live.conflict) == Some(apply.conflict);
        self.live = Some(LiveHighlight {
            conflict: apply.conflict,
            target: apply.target,
            origin: view,
        });

        if already_live {
            tracing::debug!("Conflict {} already highlighted", apply.conflict);
        } else {
            commands.push(HighlightCommand::Highlight {
                conflict: apply.conflict,
                origin: view,
            });
        }
    }

    fn fire_clear(&mut self, view: ViewKind, commands: &mut Vec<HighlightCommand>) {
        if let Some(tracker) = self.trackers.get_mut(&view) {
            tracker.clear_at = None;
        }

        if self.any_local_hover() {
            tracing::debug!("Highlight clear from '{}' suppressed by active hover", view);
            return;
        }

        if self.live.take().is_some() {
            commands.push(HighlightCommand::Clear);
        }
    }

    /// Phase of the hover source in `view`
    pub fn phase(&self, view: ViewKind) -> HoverPhase {
        let tracker = self.trackers.get(&view);

        if let Some(apply) = tracker.and_then(|tracker| tracker.apply) {
            return HoverPhase::PendingApply {
                conflict: apply.conflict,
                deadline: apply.deadline,
            };
        }
        if let Some(deadline) = tracker.and_then(|tracker| tracker.clear_at) {
            return HoverPhase::PendingClear { deadline };
        }
        match self.live {
            Some(live) if live.origin == view => HoverPhase::Applied {
                conflict: live.conflict,
            },
            _ => HoverPhase::Idle,
        }
    }

    /// Drop all timers, local hover and the live highlight.
    /// Returns the highlight that was live.
    pub fn reset(&mut self) -> Option<LiveHighlight> {
        self.trackers.clear();
        self.live.take()
    }
}

impl Default for HighlightProtocol {
    fn default() -> Self {
        Self::new(HighlightTiming::default())
    }
}
