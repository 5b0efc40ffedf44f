use std::rc::Weak;

use crate::scoped::ScopedConnection;
use crate::signal::{DEFAULT_MAX_CONNECTIONS, Inner};

/// Handle to one registration inside a [`Signal`](crate::Signal).
///
/// A handle addresses a slot by index and remembers which occupant of that slot it was
/// issued for. It does not keep the signal alive: once the signal is dropped, or the slot
/// has been handed to a later registration, the handle reports itself disconnected and
/// [`Connection::disconnect`] does nothing.
pub struct Connection<A, const N: usize = DEFAULT_MAX_CONNECTIONS> {
    inner: Weak<Inner<A, N>>,
    index: usize,
    generation: u64,
}

impl<A, const N: usize> Connection<A, N> {
    pub(crate) fn new(inner: Weak<Inner<A, N>>, index: usize, generation: u64) -> Self { Self { inner, index, generation } }

    /// Marks the connection inactive. Idempotent.
    pub fn disconnect(&self) {
        if let Some(inner) = self.inner.upgrade() {
            if inner.retire(self.index, self.generation) {
                tracing::trace!(index = self.index, "connection disconnected");
            }
        }
    }

    pub fn is_connected(&self) -> bool { self.inner.upgrade().is_some_and(|inner| inner.is_live(self.index, self.generation)) }

    /// Whether this is a live one-shot connection
    pub fn is_once(&self) -> bool { self.inner.upgrade().is_some_and(|inner| inner.is_once(self.index, self.generation)) }

    /// Slot index within the owning signal
    pub fn index(&self) -> usize { self.index }

    /// Wraps this handle so the connection is disconnected when the wrapper is dropped
    pub fn scoped(self) -> ScopedConnection<A, N> { ScopedConnection::new(self) }
}

impl<A, const N: usize> Clone for Connection<A, N> {
    fn clone(&self) -> Self { Self { inner: self.inner.clone(), index: self.index, generation: self.generation } }
}

impl<A, const N: usize> PartialEq for Connection<A, N> {
    fn eq(&self, other: &Self) -> bool { Weak::ptr_eq(&self.inner, &other.inner) && self.index == other.index && self.generation == other.generation }
}

impl<A, const N: usize> Eq for Connection<A, N> {}

impl<A, const N: usize> std::fmt::Debug for Connection<A, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").field("index", &self.index).field("connected", &self.is_connected()).finish()
    }
}
