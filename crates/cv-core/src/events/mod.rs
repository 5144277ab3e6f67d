//! Dashboard-wide event bus
//!
//! Collaborators outside the linked views (detail panel, filter summary line,
//! loading overlay) subscribe here instead of being called directly.

use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Dashboard events
pub mod events {
    use super::Event;
    use crate::data::ConflictId;
    use crate::detail::{Detail, FilterSummary};
    use crate::view::ViewKind;

    /// Dataset finished loading
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub event_count: usize,
        pub conflict_count: usize,
        pub monthly_count: usize,
    }

    /// Every view was re-rendered from a new filtered dataset
    #[derive(Debug, Clone)]
    pub struct FiltersApplied {
        pub summary: FilterSummary,
    }

    /// Show the detail panel
    #[derive(Debug, Clone)]
    pub struct DetailRequested {
        pub detail: Detail,
    }

    /// Hide the detail panel
    #[derive(Debug, Clone)]
    pub struct DetailClosed;

    /// Cross-view highlight changed; `conflict` is `None` when cleared
    #[derive(Debug, Clone)]
    pub struct HighlightChanged {
        pub conflict: Option<ConflictId>,
        pub origin: Option<ViewKind>,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        DatasetLoaded,
        FiltersApplied,
        DetailRequested,
        DetailClosed,
        HighlightChanged
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Subscribe a closure to events of type `E`
    pub fn on<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{DetailClosed, HighlightChanged};
    use super::*;

    #[test]
    fn test_typed_subscription() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.on::<HighlightChanged, _>(move |event| sink.lock().push(event.conflict));

        bus.publish(HighlightChanged { conflict: Some(3), origin: None });
        bus.publish(DetailClosed);
        bus.publish(HighlightChanged { conflict: None, origin: None });

        assert_eq!(*seen.lock(), vec![Some(3), None]);
    }
}
