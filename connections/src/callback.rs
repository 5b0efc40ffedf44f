use std::any::Any;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

/// Type-erased callback as stored in a slot. The context arrives as `&dyn Any`
/// and is downcast back to the type the [`Callback`] was built for.
pub(crate) type ErasedFn<A> = Rc<dyn Fn(&(dyn Any + 'static), &A)>;

/// Identity of a [`Callback`]. Clones of a callback share the same id.
/// Can only be obtained from a callback and is used for targeted disconnects.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallbackId(usize);

impl std::fmt::Display for CallbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

/// Identity of a caller-owned context, derived from the address of its allocation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContextId(usize);

impl ContextId {
    pub fn of<C: ?Sized>(context: &Rc<C>) -> Self { ContextId(Rc::as_ptr(context) as *const () as usize) }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

/// A handler that receives a borrow of its context followed by the fired payload.
///
/// The callback is reference counted: cloning it is cheap and the clone compares
/// equal to the original, which is what [`Signal::disconnect_by_callback`](crate::Signal::disconnect_by_callback)
/// matches on.
pub struct Callback<C, A> {
    func: ErasedFn<A>,
    _context: PhantomData<fn(&C)>,
}

impl<C: 'static, A: 'static> Callback<C, A> {
    pub fn new<F>(f: F) -> Self
    where F: Fn(&C, &A) + 'static {
        let func: ErasedFn<A> = Rc::new(move |context: &(dyn Any + 'static), args: &A| {
            // always succeeds: `Signal::connect` ties the context to `C` and `connect_fn` passes `()`
            if let Some(context) = context.downcast_ref::<C>() {
                f(context, args)
            }
        });
        Self { func, _context: PhantomData }
    }
}

impl<C, A> Callback<C, A> {
    pub fn id(&self) -> CallbackId { CallbackId(Rc::as_ptr(&self.func) as *const () as usize) }

    pub(crate) fn erased(&self) -> ErasedFn<A> { self.func.clone() }
}

impl<C, A> Clone for Callback<C, A> {
    fn clone(&self) -> Self { Self { func: self.func.clone(), _context: PhantomData } }
}

impl<C, A> PartialEq for Callback<C, A> {
    fn eq(&self, other: &Self) -> bool { self.id() == other.id() }
}

impl<C, A> Eq for Callback<C, A> {}

impl<C, A> std::fmt::Debug for Callback<C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_tuple("Callback").field(&self.id()).finish() }
}

/// Non-owning reference to the context a connection was registered with.
#[derive(Clone)]
pub(crate) enum ContextRef {
    /// Registered through a closure; the callback carries its own state
    Detached,
    Borrowed(Weak<dyn Any>),
}

impl ContextRef {
    pub fn of<C: 'static>(context: &Rc<C>) -> Self {
        let weak: Weak<C> = Rc::downgrade(context);
        let weak: Weak<dyn Any> = weak;
        ContextRef::Borrowed(weak)
    }

    pub fn id(&self) -> Option<ContextId> {
        match self {
            ContextRef::Detached => None,
            ContextRef::Borrowed(weak) => Some(ContextId(Weak::as_ptr(weak) as *const () as usize)),
        }
    }
}

/// Everything a slot needs to invoke a registration: the erased callback plus its context.
pub(crate) struct Handler<A> {
    callback: ErasedFn<A>,
    context: ContextRef,
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self { Self { callback: self.callback.clone(), context: self.context.clone() } }
}

impl<A> Handler<A> {
    pub fn new(callback: ErasedFn<A>, context: ContextRef) -> Self { Self { callback, context } }

    pub fn callback_id(&self) -> CallbackId { CallbackId(Rc::as_ptr(&self.callback) as *const () as usize) }

    pub fn context_id(&self) -> Option<ContextId> { self.context.id() }

    /// Invokes the callback. Returns false without invoking it when the context has been dropped.
    pub fn invoke(&self, args: &A) -> bool {
        match &self.context {
            ContextRef::Detached => (self.callback)(&(), args),
            ContextRef::Borrowed(weak) => match weak.upgrade() {
                Some(context) => (self.callback)(&*context, args),
                None => return false,
            },
        }
        true
    }
}
