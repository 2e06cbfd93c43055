//! Handler registration
//!
//! Configuration values only carry handler ids; the closures live here so
//! long-lived config never captures mutable host state.

use std::collections::HashMap;
use std::fmt;

use super::events::ScaffoldEvent;

pub type Handler<C> = Box<dyn FnMut(&mut C) + Send>;

pub struct HandlerRegistry<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> HandlerRegistry<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for `id`
    pub fn register<F>(&mut self, id: impl Into<String>, handler: F) -> &mut Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.handlers.insert(id.into(), Box::new(handler));
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Run the handler for `id`; returns false when none is registered
    pub fn dispatch(&mut self, id: &str, ctx: &mut C) -> bool {
        match self.handlers.get_mut(id) {
            Some(handler) => {
                handler(ctx);
                true
            }
            None => {
                log::debug!("no handler registered for '{}'", id);
                false
            }
        }
    }

    /// Dispatch the handler named by a scaffold event, if any
    pub fn dispatch_event(&mut self, event: &ScaffoldEvent, ctx: &mut C) -> bool {
        match event.handler_id() {
            Some(id) => self.dispatch(id, ctx),
            None => false,
        }
    }
}

impl<C> fmt::Debug for HandlerRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.handlers.keys().collect();
        ids.sort();
        f.debug_struct("HandlerRegistry").field("ids", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_runs_registered_handler() {
        let mut registry: HandlerRegistry<Vec<String>> = HandlerRegistry::new();
        registry.register("refresh", |log: &mut Vec<String>| log.push("refreshed".into()));

        let mut log = Vec::new();
        assert!(registry.dispatch("refresh", &mut log));
        assert!(!registry.dispatch("missing", &mut log));
        assert_eq!(log, vec!["refreshed".to_string()]);
    }

    #[test]
    fn test_dispatch_event_uses_tab_action() {
        let mut registry: HandlerRegistry<u32> = HandlerRegistry::new();
        registry.register("open_settings", |count: &mut u32| *count += 1);

        let mut count = 0;
        let event = ScaffoldEvent::TabSelected {
            index: 1,
            action: Some("open_settings".into()),
        };
        assert!(registry.dispatch_event(&event, &mut count));
        assert!(!registry.dispatch_event(&ScaffoldEvent::AboutOpened, &mut count));
        assert_eq!(count, 1);
    }
}
