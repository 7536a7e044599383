//! Power-aware peripheral owners.
//!
//! Each driver is built from its descriptor, wrapped in a
//! [`deep_sleep::PowerAwareNode`] by its owner and registered with the
//! coordinator. Both spell out their sleep behaviour; neither relies on the
//! blocking default callbacks.

pub mod half_bridge;
pub mod rtc_keeper;

pub use half_bridge::HalfBridgeDriver;
pub use rtc_keeper::RtcKeeper;
