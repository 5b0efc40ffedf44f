mod common;
use common::change_watcher;
use connections::*;
use std::rc::Rc;

#[test]
fn test_forward_same_arguments_once_per_fire() {
    let a: Signal<(i32, &'static str)> = Signal::new();
    let b: Signal<(i32, &'static str), 4> = Signal::new();
    let (first, check_first) = change_watcher::<(i32, &'static str)>();
    let (second, check_second) = change_watcher::<(i32, &'static str)>();
    b.connect_fn(first).unwrap();
    b.connect_fn(second).unwrap();

    a.forward_to(&b).unwrap();
    a.fire((1, "x"));
    a.fire((2, "y"));
    assert_eq!(check_first(), [(1, "x"), (2, "y")]);
    assert_eq!(check_second(), [(1, "x"), (2, "y")]);
}

#[test]
fn test_forward_chain_respects_suspension() {
    let a: Signal<u32> = Signal::new();
    let b: Signal<u32> = Signal::new();
    let c: Signal<u32> = Signal::new();
    let (watcher, check) = change_watcher::<u32>();
    c.connect_fn(watcher).unwrap();
    a.forward_to(&b).unwrap();
    b.forward_to(&c).unwrap();

    a.fire(1);
    b.suspend();
    a.fire(2);
    b.resume();
    c.suspend();
    a.fire(3);
    c.resume();
    a.fire(4);
    assert_eq!(check(), [1, 4]);
}

#[test]
fn test_disconnect_forwarding() {
    let source: Signal<u32> = Signal::new();
    let kept: Signal<u32> = Signal::new();
    let dropped: Signal<u32> = Signal::new();
    let (watcher, check) = change_watcher::<u32>();
    kept.connect_fn(watcher).unwrap();
    let (other, check_other) = change_watcher::<u32>();
    dropped.connect_fn(other).unwrap();

    source.forward_to(&kept).unwrap();
    let link = porcelain::forward(&source, &dropped).unwrap();
    source.disconnect_forwarding(&dropped);
    assert!(!link.is_connected());

    source.fire(7);
    assert_eq!(check(), [7]);
    assert!(check_other().is_empty());
    assert_eq!(source.connection_count(), 1);
}

#[test]
fn test_forward_target_dropped() {
    let source: Signal<u32> = Signal::new();
    let link = {
        let target: Signal<u32> = Signal::new();
        source.forward_to(&target).unwrap()
    };
    // the adapter stays registered but has nothing to fire into
    assert!(link.is_connected());
    source.fire(1);
    link.disconnect();
    assert_eq!(source.connection_count(), 0);
}

#[test]
fn test_forward_from_shared_signal() {
    let source: Rc<Signal<u32>> = Rc::new(Signal::new());
    let target: Signal<u32> = Signal::new();
    let (watcher, check) = change_watcher::<u32>();
    target.connect_fn(watcher).unwrap();
    source.once_fn({
        let source = Rc::downgrade(&source);
        move |value: &u32| {
            if let Some(source) = source.upgrade() {
                assert_eq!(source.connection_count(), 2);
            }
            assert_eq!(*value, 5);
        }
    })
    .unwrap();
    source.forward_to(&target).unwrap();

    source.fire(5);
    source.fire(6);
    assert_eq!(check(), [5, 6]);
    assert_eq!(source.connection_count(), 1);
}
