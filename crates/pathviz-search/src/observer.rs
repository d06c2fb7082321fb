//! Visitation listeners.
//!
//! A search calls [`Observers::notify`] at the moment a cell becomes
//! visited or relaxed, before moving on. Listeners run synchronously on the
//! searching thread, in registration order.

use std::fmt;

use pathviz_core::Point;

/// Handle returned by [`Observers::register`], used to detach a listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Listener = Box<dyn FnMut(Point) + Send>;

/// An ordered list of visitation listeners.
#[derive(Default)]
pub struct Observers {
    listeners: Vec<(ObserverId, Listener)>,
    next_id: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. It will be called after every listener already
    /// registered.
    pub fn register<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(Point) + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Detach a listener. Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        self.listeners.len() != before
    }

    /// Call every listener with `p`.
    pub fn notify(&mut self, p: Point) {
        for (_, f) in self.listeners.iter_mut() {
            f(p);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.listeners.len())
            .finish()
    }
}
