//! Observer registration for widget notifications
//!
//! Widgets that notify their embedding application keep a [`Listeners`]
//! list instead of a toolkit signal. The application registers closures with
//! [`Listeners::connect`] and the widget calls [`Listeners::emit`] for every
//! notification, in registration order.
//!
//! # Examples
//!
//! ```
//! use pixview_ui::Listeners;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut listeners: Listeners<u32> = Listeners::new();
//! let total = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&total);
//! listeners.connect(move |value: &u32| sink.set(sink.get() + *value));
//!
//! listeners.emit(&2);
//! listeners.emit(&3);
//! assert_eq!(total.get(), 5);
//! ```

use std::fmt;

/// Handle returned by [`Listeners::connect`], used to disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An ordered list of notification handlers.
///
/// # Type Parameters
///
/// - `T`: The notification type passed to every handler by reference
pub struct Listeners<T> {
    handlers: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Listeners<T> {
    /// Create an empty listener list.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler. Returns an id that can be passed to [`Self::disconnect`].
    pub fn connect<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(f)));
        id
    }

    /// Remove a handler. Returns `false` if the id was not registered.
    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Deliver a notification to every handler.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.handlers {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.handlers.len())
            .finish()
    }
}
