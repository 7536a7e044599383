//! Timebases: general-purpose timers and the RTC.

use periph_registry::Descriptor;

/// Timer descriptor.
pub type TimerDescriptor = Descriptor<TimerInit>;
/// RTC descriptor.
pub type RtcDescriptor = Descriptor<RtcInit>;

/// Counter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterMode {
    /// Count up to the period, then wrap
    Up,
    /// Count down from the period, then wrap
    Down,
    /// Count up then down; PWM edges stay symmetric around the period centre
    CenterAligned,
}

/// Timer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerInit {
    /// Kernel clock divider minus one (PSC)
    pub prescaler: u16,
    /// Auto-reload value (ARR)
    pub period: u32,
    /// Counter direction
    pub mode: CounterMode,
}

impl TimerInit {
    /// Update-event frequency for a timer kernel clock of `kernel_hz`.
    ///
    /// `None` if the divider overflows or the result does not fit in a `u32`.
    pub fn update_hz(self, kernel_hz: u32) -> Option<u32> {
        let prescale = u64::from(self.prescaler).checked_add(1)?;
        let reload = u64::from(self.period).checked_add(1)?;
        let mut divider = prescale.checked_mul(reload)?;
        if self.mode == CounterMode::CenterAligned {
            divider = divider.checked_mul(2)?;
        }
        u32::try_from(u64::from(kernel_hz).checked_div(divider)?).ok()
    }
}

/// RTC clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcClock {
    /// 32.768 kHz external crystal
    Lse,
    /// ~32 kHz internal RC (inaccurate, no crystal needed)
    Lsi,
}

impl RtcClock {
    /// Nominal frequency in Hz.
    pub const fn hz(self) -> u32 {
        match self {
            Self::Lse => 32_768,
            Self::Lsi => 32_000,
        }
    }
}

/// RTC parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcInit {
    /// Clock source
    pub clock: RtcClock,
    /// Asynchronous prescaler minus one (7 bits)
    pub async_prescaler: u8,
    /// Synchronous prescaler minus one (15 bits)
    pub sync_prescaler: u16,
    /// Periodic wake-up interval in seconds, 0 to disable
    pub wakeup_seconds: u16,
}

impl RtcInit {
    /// Calendar tick rate in Hz; 1 when the prescalers are set correctly.
    pub fn calendar_hz(self) -> Option<u32> {
        let async_div = u32::from(self.async_prescaler).checked_add(1)?;
        let sync_div = u32::from(self.sync_prescaler).checked_add(1)?;
        self.clock.hz().checked_div(async_div.checked_mul(sync_div)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_hz_divides_kernel_clock() {
        let pwm = TimerInit {
            prescaler: 0,
            period: 8_999,
            mode: CounterMode::Up,
        };
        assert_eq!(pwm.update_hz(180_000_000), Some(20_000));

        let centred = TimerInit {
            mode: CounterMode::CenterAligned,
            ..pwm
        };
        assert_eq!(centred.update_hz(180_000_000), Some(10_000));
    }

    #[test]
    fn lse_prescalers_give_one_hertz() {
        let rtc = RtcInit {
            clock: RtcClock::Lse,
            async_prescaler: 127,
            sync_prescaler: 255,
            wakeup_seconds: 0,
        };
        assert_eq!(rtc.calendar_hz(), Some(1));
    }
}
