use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

pub type Listener<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

struct Registry<T> {
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: SubscriptionId,
}

/// Single-threaded broadcast channel. Clones share one listener registry;
/// listeners run in subscription order.
pub struct Channel<T: std::fmt::Debug> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: std::fmt::Debug> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn emit(&self, data: &T) {
        // Snapshot first so listeners may (un)subscribe while being called.
        let listeners: Vec<Listener<T>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }
}
