//! RTC owner that keeps the calendar running through sleep.

use core::cell::Cell;

use critical_section::Mutex;
use deep_sleep::PowerAware;

use crate::families::RtcInit;

/// Owner of the real-time clock.
///
/// The RTC sits in the backup domain and is the wake-up source, so it must
/// keep counting while the core sleeps. Both callbacks leave the hardware
/// alone; they only count transitions for diagnostics.
pub struct RtcKeeper {
    wakeup_seconds: u16,
    sleeps: Mutex<Cell<u32>>,
    wakes: Mutex<Cell<u32>>,
}

impl RtcKeeper {
    /// Keeper for the RTC described by `init`.
    pub const fn new(init: &RtcInit) -> Self {
        Self {
            wakeup_seconds: init.wakeup_seconds,
            sleeps: Mutex::new(Cell::new(0)),
            wakes: Mutex::new(Cell::new(0)),
        }
    }

    /// Periodic wake-up interval in seconds (0: no periodic wake-up).
    pub fn wakeup_seconds(&self) -> u16 {
        self.wakeup_seconds
    }

    /// Number of deep-sleep entries seen.
    pub fn sleeps(&self) -> u32 {
        critical_section::with(|cs| self.sleeps.borrow(cs).get())
    }

    /// Number of deep-sleep exits seen.
    pub fn wakes(&self) -> u32 {
        critical_section::with(|cs| self.wakes.borrow(cs).get())
    }
}

fn bump(counter: &Mutex<Cell<u32>>) {
    critical_section::with(|cs| {
        let cell = counter.borrow(cs);
        cell.set(cell.get().wrapping_add(1));
    });
}

impl PowerAware for RtcKeeper {
    // Calendar and wake-up timer stay armed.
    fn enter_deep_sleep(&self) {
        bump(&self.sleeps);
    }

    fn exit_deep_sleep(&self) {
        bump(&self.wakes);
    }

    fn name(&self) -> &'static str {
        "rtc"
    }
}
