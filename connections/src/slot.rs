use crate::callback::{CallbackId, ContextId, Handler};

/// One registration record inside a signal's slot table.
///
/// The storage is allocated once with the signal and only ever reused: a slot is
/// "created" by [`Slot::occupy`] and "destroyed" by [`Slot::disconnect`]. The
/// generation counter distinguishes successive occupants of the same slot so that
/// stale handles cannot affect a later registration.
pub(crate) struct Slot<A> {
    pub connected: bool,
    pub once: bool,
    pub generation: u64,
    handler: Option<Handler<A>>,
}

impl<A> Slot<A> {
    pub fn vacant() -> Self { Self { connected: false, once: false, generation: 0, handler: None } }

    /// Populates a vacant slot, returning the generation of the new occupant
    pub fn occupy(&mut self, handler: Handler<A>, once: bool) -> u64 {
        debug_assert!(!self.connected, "occupying a live slot");
        self.generation = self.generation.wrapping_add(1);
        self.connected = true;
        self.once = once;
        self.handler = Some(handler);
        self.generation
    }

    /// Deactivates the slot. The handler is handed back so the caller can drop it
    /// once no borrow of the slot table is held.
    pub fn disconnect(&mut self) -> Option<Handler<A>> {
        self.connected = false;
        self.handler.take()
    }

    /// Deactivates the slot only if it still holds the given occupant
    pub fn retire(&mut self, generation: u64) -> Option<Handler<A>> {
        if self.is_live(generation) { self.disconnect() } else { None }
    }

    pub fn is_live(&self, generation: u64) -> bool { self.connected && self.generation == generation }

    /// The handler to invoke for this slot on fire, if any
    pub fn armed(&self) -> Option<(Handler<A>, u64, bool)> {
        match &self.handler {
            Some(handler) if self.connected => Some((handler.clone(), self.generation, self.once)),
            _ => None,
        }
    }

    pub fn callback_id(&self) -> Option<CallbackId> { self.handler.as_ref().map(Handler::callback_id) }

    pub fn context_id(&self) -> Option<ContextId> { self.handler.as_ref().and_then(Handler::context_id) }
}

impl<A> Clone for Slot<A> {
    fn clone(&self) -> Self { Self { connected: self.connected, once: self.once, generation: self.generation, handler: self.handler.clone() } }
}
