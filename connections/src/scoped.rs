use crate::connection::Connection;
use crate::signal::DEFAULT_MAX_CONNECTIONS;

/// Owns the lifetime of one [`Connection`]: when the wrapper is dropped, or overwritten by
/// assignment, the managed connection is disconnected if it is still active.
///
/// The wrapper is move-only. Moving it transfers responsibility for the disconnect; there
/// is no `Clone`, so a single wrapper disconnects a given connection at most once. Nothing
/// stops a caller from wrapping two clones of the same handle, in which case the first
/// drop wins and the second is a no-op.
#[must_use = "dropping a ScopedConnection immediately disconnects it"]
pub struct ScopedConnection<A, const N: usize = DEFAULT_MAX_CONNECTIONS> {
    managed: Option<Connection<A, N>>,
}

impl<A, const N: usize> ScopedConnection<A, N> {
    pub fn new(connection: Connection<A, N>) -> Self { Self { managed: Some(connection) } }

    /// A wrapper that manages nothing
    pub fn empty() -> Self { Self { managed: None } }

    pub fn connection(&self) -> Option<&Connection<A, N>> { self.managed.as_ref() }

    pub fn is_connected(&self) -> bool { self.managed.as_ref().is_some_and(Connection::is_connected) }

    /// Gives up management without disconnecting, leaving the wrapper empty
    pub fn release(&mut self) -> Option<Connection<A, N>> { self.managed.take() }

    /// Disconnects now rather than at drop, leaving the wrapper empty
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.managed.take() {
            connection.disconnect();
        }
    }
}

impl<A, const N: usize> Default for ScopedConnection<A, N> {
    fn default() -> Self { Self::empty() }
}

impl<A, const N: usize> From<Connection<A, N>> for ScopedConnection<A, N> {
    fn from(connection: Connection<A, N>) -> Self { Self::new(connection) }
}

impl<A, const N: usize> Drop for ScopedConnection<A, N> {
    fn drop(&mut self) {
        if let Some(connection) = self.managed.take() {
            if connection.is_connected() {
                connection.disconnect();
            }
        }
    }
}

impl<A, const N: usize> std::fmt::Debug for ScopedConnection<A, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("ScopedConnection").field("managed", &self.managed).finish() }
}
