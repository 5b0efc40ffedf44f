//! Free-function forms of the signal operations, for callers that prefer to keep a
//! pre-built [`Binding`] around and attach it to several signals.

use std::rc::Rc;

use crate::callback::{Callback, CallbackId, ContextId, ContextRef, Handler};
use crate::connection::Connection;
use crate::error::ConnectError;
use crate::signal::Signal;

/// A connection descriptor: a callback paired with the context it will be invoked with.
///
/// Like a registration, a binding holds its context weakly.
pub struct Binding<A> {
    handler: Handler<A>,
}

impl<A: 'static> Binding<A> {
    pub fn new<C: 'static>(callback: &Callback<C, A>, context: &Rc<C>) -> Self {
        Self { handler: Handler::new(callback.erased(), ContextRef::of(context)) }
    }

    pub fn callback_id(&self) -> CallbackId { self.handler.callback_id() }

    pub fn context_id(&self) -> Option<ContextId> { self.handler.context_id() }
}

impl<A> Clone for Binding<A> {
    fn clone(&self) -> Self { Self { handler: self.handler.clone() } }
}

/// Registers `binding` on `signal`; see [`Signal::connect`]
pub fn connect<A: 'static, const N: usize>(binding: &Binding<A>, signal: &Signal<A, N>) -> Result<Connection<A, N>, ConnectError> {
    signal.attach(binding.handler.clone(), false)
}

/// Registers `binding` on `signal` as a one-shot connection; see [`Signal::once`]
pub fn connect_once<A: 'static, const N: usize>(binding: &Binding<A>, signal: &Signal<A, N>) -> Result<Connection<A, N>, ConnectError> {
    signal.attach(binding.handler.clone(), true)
}

/// Makes every fire of `source` fire `target`; see [`Signal::forward_to`]
pub fn forward<A: 'static, const N: usize, const M: usize>(source: &Signal<A, N>, target: &Signal<A, M>) -> Result<Connection<A, N>, ConnectError> {
    source.forward_to(target)
}

/// See [`Connection::disconnect`]
pub fn disconnect<A, const N: usize>(connection: &Connection<A, N>) { connection.disconnect() }
