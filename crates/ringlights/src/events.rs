//! Listener registration for state-change notifications.
//!
//! Everything runs on one thread, so listeners are plain `FnMut` boxes and
//! shared flags are `Rc<Cell<_>>`.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of callbacks receiving `&E`.
pub struct Listeners<E> {
    next_id: u64,
    slots: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(f)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(sid, _)| *sid != id);
        self.slots.len() != before
    }

    /// Call every listener in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, f) in self.slots.iter_mut() {
            f(event);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.slots.len())
            .finish()
    }
}

/// "Needs rebuild" marker shared between notifiers and a frame loop.
///
/// Any number of `mark` calls between two `take` calls yield one rebuild.
#[derive(Clone, Debug, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}
