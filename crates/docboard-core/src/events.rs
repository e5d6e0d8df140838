//! Listener registries for store changes and cross-view notifications.
//!
//! # Design
//! - Callbacks are invoked after the store's `RefCell` borrow is released, so a
//!   listener may read the store (or subscribe again) without panicking.
//! - Handles are plain ids; dropping one does not unsubscribe.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Ordered set of listeners for values of type `T`.
pub struct Subscribers<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Subscribers<T> {
    /// Register a listener.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(current, _)| *current != id);
    }

    /// Invoke every listener with `value`.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Broadcasts "documents changed, reload your lists" to interested views.
#[derive(Default)]
pub struct DocumentEvents {
    refresh: Subscribers<()>,
}

impl DocumentEvents {
    /// Create an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for refresh requests.
    pub fn on_refresh(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.refresh.subscribe(move |_: &()| listener())
    }

    /// Stop listening.
    pub fn off_refresh(&self, id: SubscriptionId) {
        self.refresh.unsubscribe(id);
    }

    /// Ask every listener to reload documents.
    pub fn emit_refresh(&self) {
        tracing::debug!(listeners = self.refresh.len(), "emitting document refresh");
        self.refresh.notify(&());
    }
}
