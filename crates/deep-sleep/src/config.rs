//! Coordinator sizing.
//!
//! All values are compile-time constants; change them here rather than at the
//! use sites.

/// Capacity of the process-wide coordinator ([`DEEP_SLEEP`](crate::DEEP_SLEEP)).
///
/// One slot per live power-aware module. The motor controller registers one
/// driver per half-bridge, the sensor node its RTC keeper; 16 leaves room for
/// application-level modules.
pub const MAX_POWER_AWARE_MODULES: usize = 16;
