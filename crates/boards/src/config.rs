//! Firmware and board identity constants
//!
//! Naming and clock values used across the boards. Reference these constants
//! rather than repeating the values.

/// Firmware family name
pub const FIRMWARE_NAME: &str = "periph-boards";

/// Firmware version (synchronized with Cargo.toml)
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static facts about one board variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfo {
    /// Board name, as printed in boot banners
    pub name: &'static str,
    /// Microcontroller part number
    pub mcu: &'static str,
    /// Core clock after bring-up, in Hz
    pub sysclk_hz: u32,
    /// APB1 timer kernel clock, in Hz
    pub apb1_timer_hz: u32,
    /// APB2 timer kernel clock, in Hz
    pub apb2_timer_hz: u32,
}

/// BLDC motor controller, first revision.
pub const MOTOR_V1: BoardInfo = BoardInfo {
    name: "motor-v1",
    mcu: "STM32F446RE",
    sysclk_hz: 180_000_000,
    apb1_timer_hz: 90_000_000,
    apb2_timer_hz: 180_000_000,
};

/// Low-power sensor node, second revision. Runs slower to save power.
pub const SENSOR_V2: BoardInfo = BoardInfo {
    name: "sensor-v2",
    mcu: "STM32F413RH",
    sysclk_hz: 84_000_000,
    apb1_timer_hz: 84_000_000,
    apb2_timer_hz: 84_000_000,
};
