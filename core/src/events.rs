//! Named, zero-argument event callbacks.
//!
//! # Design
//! `Eventing` keeps one callback list per event name and invokes a list in
//! registration order. The list is cloned out of the `RefCell` before any
//! callback runs, so callbacks may register more callbacks or read the model
//! that owns this hub without tripping a borrow conflict. Callbacks added
//! while an event is firing take effect from the next trigger.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Emitted after every attribute write.
pub const CHANGE: &str = "change";
/// Emitted when a save completes successfully.
pub const SAVE: &str = "save";
/// Emitted when a save fails.
pub const ERROR: &str = "error";

/// The events capability a `Model` composes.
pub trait Events {
    fn on<F>(&self, event_name: &str, callback: F)
    where
        F: Fn() + 'static;

    fn trigger(&self, event_name: &str);
}

type Callback = Rc<dyn Fn()>;

/// Default `Events` implementation.
#[derive(Default)]
pub struct Eventing {
    events: RefCell<HashMap<String, Vec<Callback>>>,
}

impl Eventing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks registered under `event_name`.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.events.borrow().get(event_name).map_or(0, Vec::len)
    }
}

impl Events for Eventing {
    fn on<F>(&self, event_name: &str, callback: F)
    where
        F: Fn() + 'static,
    {
        self.events
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push(Rc::new(callback));
    }

    fn trigger(&self, event_name: &str) {
        let handlers = match self.events.borrow().get(event_name) {
            Some(handlers) => handlers.clone(),
            None => return,
        };
        tracing::debug!(event = event_name, listeners = handlers.len(), "triggering event");
        for handler in handlers {
            handler();
        }
    }
}

impl std::fmt::Debug for Eventing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events = self.events.borrow();
        let mut names: Vec<&String> = events.keys().collect();
        names.sort();
        f.debug_struct("Eventing").field("events", &names).finish()
    }
}
