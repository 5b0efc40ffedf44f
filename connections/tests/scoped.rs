mod common;
use common::{Log, drain, log};
use connections::*;

fn handler() -> Callback<Log, u8> { Callback::new(|log: &Log, value: &u8| log.borrow_mut().push(format!("h({value})"))) }

#[test]
fn test_scope_end_disconnects() {
    let signal: Signal<u8> = Signal::new();
    let context = log();
    let connection = signal.connect(&handler(), &context).unwrap();
    {
        let _scoped = ScopedConnection::new(connection.clone());
        signal.fire(1);
    }
    signal.fire(2);
    assert_eq!(drain(&context), ["h(1)"]);
    assert!(!connection.is_connected());
}

#[test]
fn test_scoped_over_retired_once() {
    let signal: Signal<u8> = Signal::new();
    let context = log();
    let scoped = signal.once(&handler(), &context).unwrap().scoped();
    signal.fire(1);
    assert!(!scoped.is_connected());

    // the slot has been reused; dropping the stale wrapper must leave the newcomer alone
    let newcomer = signal.connect(&handler(), &context).unwrap();
    assert_eq!(Some(newcomer.index()), scoped.connection().map(Connection::index));
    drop(scoped);
    assert!(newcomer.is_connected());
}

#[test]
fn test_scoped_connections_in_collection() {
    let signal: Signal<u8, 4> = Signal::new();
    let mut guards: Vec<ScopedConnection<u8, 4>> = (0..4).map(|_| ScopedConnection::from(signal.connect_fn(|_| {}).unwrap())).collect();
    assert_eq!(signal.connection_count(), 4);

    guards.truncate(1);
    assert_eq!(signal.connection_count(), 1);
    guards.clear();
    assert_eq!(signal.connection_count(), 0);
}
