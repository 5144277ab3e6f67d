//! Registry of linked views and the fan-out operations over it

use super::{LinkedView, ViewError, ViewKind};
use crate::data::{ConflictId, Dataset};

/// One registration slot. `view` is `None` when initialization failed.
struct ViewSlot {
    kind: ViewKind,
    view: Option<Box<dyn LinkedView>>,
}

/// Views in registration order
///
/// A view that failed to initialize keeps an empty slot and is skipped by every
/// fan-out, so the rest of the dashboard keeps working.
#[derive(Default)]
pub struct ViewRegistry {
    slots: Vec<ViewSlot>,
}

impl ViewRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a view and register it under `kind`
    ///
    /// On failure the slot is recorded as absent and the error is returned for
    /// reporting; it is never fatal.
    pub fn register<F>(&mut self, kind: ViewKind, initialize: F) -> Result<(), ViewError>
    where
        F: FnOnce() -> anyhow::Result<Box<dyn LinkedView>>,
    {
        match initialize() {
            Ok(view) => {
                tracing::info!("Registered view '{}'", kind);
                self.put(kind, Some(view));
                Ok(())
            }
            Err(source) => {
                tracing::warn!("View '{}' unavailable: {}", kind, source);
                self.put(kind, None);
                Err(ViewError::Initialization { kind, source })
            }
        }
    }

    /// Register an already constructed view
    pub fn insert(&mut self, view: Box<dyn LinkedView>) {
        let kind = view.kind();
        self.put(kind, Some(view));
    }

    fn put(&mut self, kind: ViewKind, view: Option<Box<dyn LinkedView>>) {
        match self.slots.iter_mut().find(|slot| slot.kind == kind) {
            Some(slot) => slot.view = view,
            None => self.slots.push(ViewSlot { kind, view }),
        }
    }

    /// Whether a working view is registered under `kind`
    pub fn is_available(&self, kind: ViewKind) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.kind == kind && slot.view.is_some())
    }

    /// Kinds of all working views, in registration order
    pub fn available(&self) -> impl Iterator<Item = ViewKind> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.view.is_some())
            .map(|slot| slot.kind)
    }

    /// Borrow a registered view as its concrete type
    pub fn view<T: 'static>(&self, kind: ViewKind) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.view.as_deref())
            .and_then(|view| view.as_any().downcast_ref::<T>())
    }

    fn live_views(&mut self) -> impl Iterator<Item = &mut Box<dyn LinkedView>> {
        self.slots.iter_mut().filter_map(|slot| slot.view.as_mut())
    }

    /// Render `data` in every view that can render
    pub fn render_all(&mut self, data: &Dataset) {
        for view in self.live_views() {
            if view.capabilities().render {
                view.render(data);
            }
        }
    }

    /// Broadcast a cross-view highlight, origin included
    pub fn highlight_all(&mut self, conflict: ConflictId, origin: ViewKind) {
        for view in self.live_views() {
            if view.capabilities().highlight {
                view.apply_highlight(conflict, origin);
            }
        }
    }

    /// Broadcast a highlight clear
    pub fn clear_all(&mut self) {
        for view in self.live_views() {
            if view.capabilities().clear_highlight {
                view.clear_highlight();
            }
        }
    }

    /// Forward local hover feedback to the one view the pointer is in
    pub fn set_local_hover(&mut self, kind: ViewKind, element: Option<u64>) {
        if let Some(view) = self
            .slots
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.view.as_mut())
        {
            view.set_local_hover(element);
        }
    }
}
