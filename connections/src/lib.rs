/*!
Fixed-capacity signals with connections, one-shot registrations and scoped disconnects.

A [`Signal`] owns a table of `N` connection slots (128 unless stated otherwise). Each
registration occupies one slot until it is disconnected, and firing the signal invokes
every active slot in index order. The slot table never grows, and
nothing here is thread safe: signals, handles and callbacks are meant to live on one thread.

# Design requirements:
- Registration never grows storage. A full signal refuses new connections with [`ConnectError::CapacityExhausted`].
- Handles never dangle. A [`Connection`] outliving its signal, or whose slot was reused, is simply disconnected.
- Contexts are borrowed, not owned. The signal keeps a weak reference and skips a connection whose context is gone.
- Callbacks may touch the signal that is invoking them (connect, disconnect, fire). See [`Signal::fire`].

# Basic usage

```rust
use connections::*;
use std::cell::Cell;
use std::rc::Rc;

let signal: Signal<i32> = Signal::new();
let total = Rc::new(Cell::new(0));
let add = Callback::new(|total: &Cell<i32>, value: &i32| total.set(total.get() + value));

let connection = signal.connect(&add, &total).unwrap();
signal.fire(5);
assert_eq!(total.get(), 5);

connection.disconnect();
signal.fire(5);
assert_eq!(total.get(), 5);
```

# Scoped connections

```rust
use connections::*;
use std::cell::Cell;
use std::rc::Rc;

let signal: Signal<&'static str> = Signal::new();
let hits = Rc::new(Cell::new(0));
{
    let hits = hits.clone();
    let _guard = signal.connect_fn(move |_| hits.set(hits.get() + 1)).unwrap().scoped();
    signal.fire("inside");
}
signal.fire("outside");
assert_eq!(hits.get(), 1);
```

# Forwarding

```rust
use connections::*;
use std::cell::Cell;
use std::rc::Rc;

let clicks: Signal<(i32, i32)> = Signal::new();
let redraw: Signal<(i32, i32)> = Signal::new();
let last = Rc::new(Cell::new((0, 0)));
{
    let last = last.clone();
    redraw.connect_fn(move |point| last.set(*point)).unwrap();
}
clicks.forward_to(&redraw).unwrap();
clicks.fire((3, 4));
assert_eq!(last.get(), (3, 4));
```
*/

mod callback;
mod connection;
mod error;
mod scoped;
mod signal;
mod slot;

pub mod porcelain;

pub use callback::{Callback, CallbackId, ContextId};
pub use connection::Connection;
pub use error::ConnectError;
pub use porcelain::Binding;
pub use scoped::ScopedConnection;
pub use signal::{DEFAULT_MAX_CONNECTIONS, Signal};
