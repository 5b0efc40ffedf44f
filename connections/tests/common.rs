use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok().and_then(|level| Level::from_str(&level).ok()).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_test_writer().init();
}

/// Context type for callbacks that record what they were called with
#[allow(unused)]
pub type Log = RefCell<Vec<String>>;

#[allow(unused)]
pub fn log() -> Rc<Log> { Rc::new(RefCell::new(Vec::new())) }

#[allow(unused)]
pub fn drain(log: &Log) -> Vec<String> { log.borrow_mut().drain(..).collect() }

#[allow(unused)]
pub fn change_watcher<T: Clone + 'static>() -> (Box<dyn Fn(&T)>, Box<dyn Fn() -> Vec<T>>) {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        Box::new(move |value: &T| {
            changes.borrow_mut().push(value.clone());
        })
    };

    let check = Box::new(move || {
        let changes: Vec<T> = changes.borrow_mut().drain(..).collect();
        changes
    });

    (watcher, check)
}
