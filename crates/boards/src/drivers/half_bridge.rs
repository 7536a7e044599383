//! Half-bridge PWM leg.

use core::cell::Cell;

use critical_section::Mutex;
use deep_sleep::PowerAware;

use crate::families::HalfBridgeInit;

#[derive(Debug, Clone, Copy)]
struct BridgeState {
    duty: u16,
    saved: u16,
    parked: bool,
}

/// Duty-cycle owner for one half-bridge leg.
///
/// Entering deep sleep parks the leg (duty 0, both switches off) and
/// remembers the running duty; leaving restores it. A duty set while parked
/// is stored and applied on wake.
pub struct HalfBridgeDriver {
    name: &'static str,
    max_duty: u16,
    state: Mutex<Cell<BridgeState>>,
}

impl HalfBridgeDriver {
    /// Driver for the leg described by `init`, initially at duty 0.
    pub const fn new<T>(name: &'static str, init: &HalfBridgeInit<T>) -> Self {
        Self {
            name,
            max_duty: init.max_duty,
            state: Mutex::new(Cell::new(BridgeState {
                duty: 0,
                saved: 0,
                parked: false,
            })),
        }
    }

    /// Request `duty` counts, clamped to the descriptor's ceiling. Returns
    /// the value actually applied (or stored, while parked).
    pub fn set_duty(&self, duty: u16) -> u16 {
        let duty = duty.min(self.max_duty);
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            if state.parked {
                state.saved = duty;
            } else {
                state.duty = duty;
            }
            cell.set(state);
        });
        duty
    }

    /// Duty currently driven onto the leg.
    pub fn duty(&self) -> u16 {
        critical_section::with(|cs| self.state.borrow(cs).get().duty)
    }

    /// True between `enter_deep_sleep` and `exit_deep_sleep`.
    pub fn is_parked(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).get().parked)
    }

    /// Duty ceiling from the descriptor.
    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }
}

impl PowerAware for HalfBridgeDriver {
    fn enter_deep_sleep(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            if !state.parked {
                state.saved = state.duty;
                state.duty = 0;
                state.parked = true;
            }
            cell.set(state);
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: parked", self.name);
    }

    fn exit_deep_sleep(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            if state.parked {
                state.duty = state.saved;
                state.parked = false;
            }
            cell.set(state);
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: restored duty {=u16}", self.name, self.duty());
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEG: HalfBridgeInit<u8> = HalfBridgeInit {
        timer: 1,
        channel: 1,
        dead_time_ns: 500,
        max_duty: 900,
    };

    #[test]
    fn duty_is_clamped_to_ceiling() {
        let leg = HalfBridgeDriver::new("u", &LEG);
        assert_eq!(leg.set_duty(1_200), 900);
        assert_eq!(leg.duty(), 900);
        assert_eq!(leg.max_duty(), 900);
    }

    #[test]
    fn sleep_parks_and_wake_restores() {
        let leg = HalfBridgeDriver::new("u", &LEG);
        leg.set_duty(450);

        leg.enter_deep_sleep();
        assert!(leg.is_parked());
        assert_eq!(leg.duty(), 0);

        leg.exit_deep_sleep();
        assert!(!leg.is_parked());
        assert_eq!(leg.duty(), 450);
    }

    #[test]
    fn duty_set_while_parked_applies_on_wake() {
        let leg = HalfBridgeDriver::new("v", &LEG);
        leg.set_duty(300);
        leg.enter_deep_sleep();
        leg.set_duty(600);
        assert_eq!(leg.duty(), 0);
        leg.exit_deep_sleep();
        assert_eq!(leg.duty(), 600);
    }

    #[test]
    fn repeated_enter_keeps_saved_duty() {
        let leg = HalfBridgeDriver::new("w", &LEG);
        leg.set_duty(200);
        leg.enter_deep_sleep();
        leg.enter_deep_sleep();
        leg.exit_deep_sleep();
        assert_eq!(leg.duty(), 200);
    }
}
