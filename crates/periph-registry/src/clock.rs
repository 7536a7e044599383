//! Bus clock gating tokens.
//!
//! A peripheral's registers stay dead until its bus clock is enabled in the
//! reset and clock controller. [`ClockToken`] names the enable bit an
//! instance needs; clock-gated kinds keep a token table parallel to their
//! descriptor table.
//!
//! Bring-up order: enable a kind's clocks with [`enable_clocks`], then program
//! each instance from its descriptor.

use crate::factory::ClockGated;
#[cfg(feature = "defmt")]
use crate::id::PeripheralId;

/// Peripheral buses with their own clock-enable register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    /// AHB1: GPIO ports, DMA controllers, CRC.
    Ahb1,
    /// AHB2: ADCs on parts with a dedicated analog domain, RNG.
    Ahb2,
    /// APB1: low-speed timers, USART2-5, I2C, DAC, PWR.
    Apb1,
    /// APB2: advanced timers, USART1/6, SPI1, ADC, SYSCFG/EXTI.
    Apb2,
    /// Backup domain: RTC and backup registers.
    Backup,
}

/// One clock-enable bit: bus register plus bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockToken {
    bus: Bus,
    bit: u8,
}

impl ClockToken {
    /// Enable bit `bit` of `bus`'s clock-enable register.
    ///
    /// Enable registers are 32 bits wide; a token built in a `static` with a
    /// larger bit fails to build.
    ///
    /// # Panics
    ///
    /// When `bit` is 32 or more. In const context this is a build error.
    #[must_use]
    pub const fn new(bus: Bus, bit: u8) -> Self {
        assert!(bit < 32, "clock-enable bit out of range");
        Self { bus, bit }
    }

    /// Bus whose enable register holds the bit.
    #[must_use]
    pub const fn bus(self) -> Bus {
        self.bus
    }

    /// Bit position in the enable register.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self.bit
    }

    /// Register mask with only this token's bit set.
    #[must_use]
    #[allow(clippy::cast_lossless)] // u32::from is not const
    pub const fn mask(self) -> u32 {
        match 1u32.checked_shl(self.bit as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }
}

/// Reset and clock controller as seen by bring-up code.
pub trait ClockControl {
    /// Set the enable bit named by `token`.
    fn enable(&mut self, token: ClockToken);

    /// Clear the enable bit named by `token`.
    fn disable(&mut self, token: ClockToken);
}

/// Enable the bus clock of every identifier of kind `K`, in identifier order.
///
/// Instances sharing an enable bit get it set once per instance; setting a
/// bit is idempotent. Returns the number of tokens applied.
pub fn enable_clocks<K: ClockGated>(control: &mut impl ClockControl) -> usize {
    let table = K::clocks();
    for (_id, token) in table.iter() {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "clock on: {=str}::{=str} ({})",
            K::KIND,
            _id.name(),
            token
        );
        control.enable(*token);
    }
    table.len()
}

/// Disable the bus clock of every identifier of kind `K`, in reverse
/// identifier order.
pub fn disable_clocks<K: ClockGated>(control: &mut impl ClockControl) -> usize {
    let table = K::clocks();
    for token in table.as_slice().iter().rev() {
        control.disable(*token);
    }
    table.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_sets_only_the_token_bit() {
        assert_eq!(ClockToken::new(Bus::Apb2, 0).mask(), 0x0000_0001);
        assert_eq!(ClockToken::new(Bus::Ahb1, 22).mask(), 0x0040_0000);
        assert_eq!(ClockToken::new(Bus::Apb1, 31).mask(), 0x8000_0000);
    }

    #[test]
    fn accessors_return_parts() {
        let token = ClockToken::new(Bus::Backup, 15);
        assert_eq!(token.bus(), Bus::Backup);
        assert_eq!(token.bit(), 15);
    }

    #[test]
    #[should_panic(expected = "clock-enable bit out of range")]
    fn runtime_token_with_bad_bit_halts() {
        let bit = core::hint::black_box(32);
        let _ = ClockToken::new(Bus::Apb1, bit);
    }
}
