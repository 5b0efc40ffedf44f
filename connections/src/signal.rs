use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::callback::{Callback, ContextId, ContextRef, Handler};
use crate::connection::Connection;
use crate::error::ConnectError;
use crate::slot::Slot;

/// Number of connection slots a signal has unless another capacity is given
pub const DEFAULT_MAX_CONNECTIONS: usize = 128;

/// A dispatch point holding up to `N` connections.
///
/// Firing invokes every active connection in slot order with a borrow of the payload.
/// The slot table is allocated once and never grows: when every slot is in use the
/// registration calls return [`ConnectError::CapacityExhausted`].
///
/// Cloning a signal copies every slot (callbacks and contexts are shared, the slot
/// storage is not). Dropping a signal disconnects everything it holds.
pub struct Signal<A, const N: usize = DEFAULT_MAX_CONNECTIONS>(Rc<Inner<A, N>>);

pub(crate) struct Inner<A, const N: usize> {
    active: Cell<bool>,
    slots: RefCell<[Slot<A>; N]>,
}

impl<A: 'static, const N: usize> Default for Signal<A, N> {
    fn default() -> Self { Self::new() }
}

impl<A: 'static, const N: usize> Signal<A, N> {
    /// Creates an active signal with every slot vacant
    pub fn new() -> Self { Self(Rc::new(Inner { active: Cell::new(true), slots: RefCell::new(std::array::from_fn(|_| Slot::vacant())) })) }

    /// Registers `callback` to be invoked with `context` on every fire.
    ///
    /// The signal keeps only a weak reference to `context`; once the caller drops it the
    /// connection is skipped.
    pub fn connect<C: 'static>(&self, callback: &Callback<C, A>, context: &Rc<C>) -> Result<Connection<A, N>, ConnectError> {
        self.attach(Handler::new(callback.erased(), ContextRef::of(context)), false)
    }

    /// Like [`Signal::connect`], but the connection disconnects itself after its first invocation
    pub fn once<C: 'static>(&self, callback: &Callback<C, A>, context: &Rc<C>) -> Result<Connection<A, N>, ConnectError> {
        self.attach(Handler::new(callback.erased(), ContextRef::of(context)), true)
    }

    /// Registers a closure that carries its own state
    pub fn connect_fn<F>(&self, f: F) -> Result<Connection<A, N>, ConnectError>
    where F: Fn(&A) + 'static {
        self.attach(detached(f), false)
    }

    /// One-shot variant of [`Signal::connect_fn`]
    pub fn once_fn<F>(&self, f: F) -> Result<Connection<A, N>, ConnectError>
    where F: Fn(&A) + 'static {
        self.attach(detached(f), true)
    }

    /// Chains `target` to this signal: every fire of this signal fires `target` with the same payload.
    ///
    /// The adapter holds `target` weakly and does nothing once it has been dropped. Forwarding a
    /// signal into itself (directly or through a cycle) recurses without bound.
    pub fn forward_to<const M: usize>(&self, target: &Signal<A, M>) -> Result<Connection<A, N>, ConnectError> {
        let adapter = Callback::new(|target: &Inner<A, M>, args: &A| target.dispatch(args));
        self.attach(Handler::new(adapter.erased(), ContextRef::of(&target.0)), false)
    }

    /// Fires the signal. Does nothing while the signal is suspended.
    ///
    /// Slots are visited in index order and no borrow of the slot table is held while a
    /// callback runs, so a callback may connect, disconnect or fire on this same signal.
    /// The scan is live, not a snapshot:
    /// - a slot disconnected before the scan reaches it is skipped
    /// - a registration landing in a slot the scan has not reached yet is invoked in this fire
    /// - suspending from inside a callback only affects later fires
    ///
    /// A one-shot connection is retired after its callback returns. If that callback fires
    /// this signal again, the nested fire invokes it again, once per nesting level.
    pub fn fire(&self, args: A) { self.0.dispatch(&args) }

    pub(crate) fn attach(&self, handler: Handler<A>, once: bool) -> Result<Connection<A, N>, ConnectError> {
        let vacant = self.0.slots.borrow().iter().position(|slot| !slot.connected);
        let Some(index) = vacant else {
            warn!(capacity = N, "signal has no free connection slot");
            return Err(ConnectError::CapacityExhausted { capacity: N });
        };
        let generation = self.0.slots.borrow_mut()[index].occupy(handler, once);
        trace!(index, generation, once, "connection registered");
        Ok(Connection::new(Rc::downgrade(&self.0), index, generation))
    }
}

impl<A, const N: usize> Signal<A, N> {
    /// Disconnects every connection. Does not change whether the signal is suspended.
    pub fn disconnect_all(&self) { self.0.disconnect_all(); }

    /// Disconnects every connection registered with `callback` or a clone of it
    pub fn disconnect_by_callback<C>(&self, callback: &Callback<C, A>) {
        let id = callback.id();
        let count = self.0.retire_where(|slot| slot.callback_id() == Some(id));
        debug!(callback = %id, count, "disconnected by callback");
    }

    /// Disconnects every connection registered with `context`
    pub fn disconnect_by_context<C: ?Sized>(&self, context: &Rc<C>) { self.disconnect_context(ContextId::of(context)) }

    /// Disconnects every forwarding connection into `target`
    pub fn disconnect_forwarding<const M: usize>(&self, target: &Signal<A, M>) { self.disconnect_context(ContextId::of(&target.0)) }

    fn disconnect_context(&self, id: ContextId) {
        let count = self.0.retire_where(|slot| slot.context_id() == Some(id));
        debug!(context = %id, count, "disconnected by context");
    }

    /// Stops dispatch without touching any connection
    pub fn suspend(&self) {
        self.0.active.set(false);
        debug!("signal suspended");
    }

    pub fn resume(&self) {
        self.0.active.set(true);
        debug!("signal resumed");
    }

    pub fn is_active(&self) -> bool { self.0.active.get() }

    pub const fn max_connections(&self) -> usize { N }

    pub fn connection_count(&self) -> usize { self.0.slots.borrow().iter().filter(|slot| slot.connected).count() }
}

fn detached<A: 'static, F>(f: F) -> Handler<A>
where F: Fn(&A) + 'static {
    let callback: Callback<(), A> = Callback::new(move |_: &(), args: &A| f(args));
    Handler::new(callback.erased(), ContextRef::Detached)
}

impl<A, const N: usize> Inner<A, N> {
    /// See [`Signal::fire`] for the scan rules
    pub(crate) fn dispatch(&self, args: &A) {
        if !self.active.get() {
            trace!("signal suspended, fire ignored");
            return;
        }
        for index in 0..N {
            let armed = self.slots.borrow()[index].armed();
            let Some((handler, generation, once)) = armed else { continue };
            if !handler.invoke(args) {
                trace!(index, "context dropped, connection skipped");
                continue;
            }
            if once {
                self.retire(index, generation);
            }
        }
    }

    /// Disconnects the slot at `index` if it still holds the given occupant
    pub(crate) fn retire(&self, index: usize, generation: u64) -> bool {
        // the handler is dropped after the borrow is released
        let retired = self.slots.borrow_mut()[index].retire(generation);
        retired.is_some()
    }

    pub(crate) fn is_live(&self, index: usize, generation: u64) -> bool { self.slots.borrow()[index].is_live(generation) }

    pub(crate) fn is_once(&self, index: usize, generation: u64) -> bool {
        let slots = self.slots.borrow();
        slots[index].is_live(generation) && slots[index].once
    }

    fn disconnect_all(&self) {
        let count = self.retire_where(|_| true);
        debug!(count, "disconnected all connections");
    }

    fn retire_where(&self, mut predicate: impl FnMut(&Slot<A>) -> bool) -> usize {
        let mut retired = Vec::new();
        {
            let mut slots = self.slots.borrow_mut();
            for slot in slots.iter_mut() {
                if slot.connected && predicate(slot) {
                    retired.extend(slot.disconnect());
                }
            }
        }
        retired.len()
    }
}

impl<A, const N: usize> Clone for Signal<A, N> {
    fn clone(&self) -> Self {
        let slots = self.0.slots.borrow().clone();
        Self(Rc::new(Inner { active: Cell::new(self.0.active.get()), slots: RefCell::new(slots) }))
    }
}

impl<A, const N: usize> Drop for Signal<A, N> {
    fn drop(&mut self) { self.0.disconnect_all(); }
}

impl<A, const N: usize> std::fmt::Debug for Signal<A, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("active", &self.is_active())
            .field("connections", &self.connection_count())
            .field("capacity", &N)
            .finish()
    }
}
