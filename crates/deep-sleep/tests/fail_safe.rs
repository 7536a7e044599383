//! A module that does not override its callbacks must block forever.
//!
//! Each case runs the callback on a detached thread and checks, through a
//! watchdog timeout, that it never returns. The spinning threads are left
//! behind and die with the test process.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use deep_sleep::{DeepSleepCoordinator, PowerAware, PowerAwareNode};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

const WATCHDOG: Duration = Duration::from_millis(300);

/// Forgot to implement either callback.
struct Forgetful;

impl PowerAware for Forgetful {}

struct Flag(Arc<AtomicBool>);

impl PowerAware for Flag {
    fn enter_deep_sleep(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn exit_deep_sleep(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

fn returns_within_watchdog(f: impl FnOnce() + Send + 'static) -> bool {
    let (done, finished) = mpsc::channel();
    std::thread::spawn(move || {
        f();
        let _ = done.send(());
    });
    match finished.recv_timeout(WATCHDOG) {
        Ok(()) => true,
        Err(RecvTimeoutError::Timeout) => false,
        Err(RecvTimeoutError::Disconnected) => panic!("callback thread panicked"),
    }
}

#[test]
fn default_enter_never_returns() {
    assert!(!returns_within_watchdog(|| Forgetful.enter_deep_sleep()));
}

#[test]
fn default_exit_never_returns() {
    assert!(!returns_within_watchdog(|| Forgetful.exit_deep_sleep()));
}

#[test]
fn overridden_callbacks_return() {
    let flag = Arc::new(AtomicBool::new(false));
    let module = Flag(Arc::clone(&flag));
    assert!(returns_within_watchdog(move || {
        module.enter_deep_sleep();
        module.exit_deep_sleep();
    }));
    assert!(flag.load(Ordering::SeqCst));
}

#[test]
fn blocking_module_stalls_later_modules() {
    let later_ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&later_ran);

    // The coordinator lives entirely on the stalled thread, so its lock never
    // leaves that thread.
    let returned = returns_within_watchdog(move || {
        let coordinator = DeepSleepCoordinator::<NoopRawMutex, 2>::new();
        let forgetful = pin!(PowerAwareNode::new(&coordinator, Forgetful));
        let later = pin!(PowerAwareNode::new(&coordinator, Flag(flag)));
        forgetful.as_ref().register().unwrap();
        later.as_ref().register().unwrap();
        coordinator.enter_deep_sleep();
    });

    assert!(!returned);
    assert!(!later_ran.load(Ordering::SeqCst));
}

#[test]
fn default_name_is_the_type_name() {
    assert!(Forgetful.name().ends_with("Forgetful"));
}
