//! The single global key-listener target.
//!
//! Slides attach a handler while they are active and detach it when they
//! stop being active or are torn down. Handlers return `true` to consume a
//! key, which stops propagation to later handlers and to app-level keys.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::KeyInput;

/// Key handler. Return `true` to consume the key.
pub type KeyHandler = Rc<dyn Fn(&KeyInput) -> bool>;

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, KeyHandler)>>,
}

/// Shared registry of key handlers. Clones share the same registry.
#[derive(Clone, Default)]
pub struct KeyListeners {
    registry: Rc<Registry>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler`. Dropping the guard detaches it.
    pub fn add(&self, handler: KeyHandler) -> KeyListenerGuard {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.handlers.borrow_mut().push((id, handler));
        KeyListenerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Route one key through the handlers in attach order.
    /// Returns `true` if a handler consumed it.
    pub fn dispatch(&self, input: &KeyInput) -> bool {
        // Snapshot so handlers may attach/detach while we iterate.
        let handlers = self
            .registry
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect::<Vec<_>>();
        handlers.iter().any(|handler| handler(input))
    }

    /// Number of attached handlers.
    pub fn len(&self) -> usize {
        self.registry.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Attachment token for one handler; detaches on drop.
#[must_use = "dropping the guard immediately detaches the key handler"]
pub struct KeyListenerGuard {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .handlers
                .borrow_mut()
                .retain(|(handler_id, _)| *handler_id != self.id);
        }
    }
}

impl std::fmt::Debug for KeyListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyListenerGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn guard_detaches_on_drop() {
        let listeners = KeyListeners::new();
        let guard = listeners.add(Rc::new(|_: &KeyInput| false));
        assert_eq!(listeners.len(), 1);
        drop(guard);
        assert!(listeners.is_empty());
    }

    #[test]
    fn consuming_handler_stops_propagation() {
        let listeners = KeyListeners::new();
        let later_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&later_calls);
        let _first = listeners.add(Rc::new(|input: &KeyInput| input.key == Key::Space));
        let _second = listeners.add(Rc::new(move |_: &KeyInput| {
            counter.set(counter.get() + 1);
            false
        }));

        assert!(listeners.dispatch(&KeyInput::new(Key::Space)));
        assert_eq!(later_calls.get(), 0);
        assert!(!listeners.dispatch(&KeyInput::new(Key::ArrowRight)));
        assert_eq!(later_calls.get(), 1);
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let listeners = KeyListeners::new();
        let guard = listeners.add(Rc::new(|_: &KeyInput| true));
        drop(listeners);
        drop(guard);
    }
}
