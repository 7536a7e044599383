//! Board variants: peripheral identities, descriptors and power-aware drivers.
//!
//! Each board module declares one identifier enum per peripheral kind it
//! uses, and fills the descriptor and clock tables for them. The two boards
//! share kind names (both have a `Timer`, an `Adc`, ...) but their enums are
//! unrelated types, so an identifier of one board cannot reach the other
//! board's tables.
//!
//! ```compile_fail
//! use boards::{motor_v1, sensor_v2};
//!
//! // A motor-v1 ADC is not a sensor-v2 ADC.
//! let _ = periph_registry::get_clock::<sensor_v2::Adc>(motor_v1::Adc::Phase);
//! ```
//!
//! ```text
//! families (init bundles: TimerInit, UsartInit, AdcInit, ...)
//!         ↓
//! motor_v1 / sensor_v2 (identifier enums + descriptor_table!/clock_table!)
//!         ↓
//! bring-up: enable_clocks() then get()/get_for_dma() per instance
//!         ↓
//! drivers (PowerAware modules registered with deep_sleep::DEEP_SLEEP)
//! ```
//!
//! # Features
//!
//! - `motor-v1`: BLDC motor controller board (default)
//! - `sensor-v2`: low-power sensor node board (default)
//! - `defmt`: derive `defmt::Format` and log bring-up and transitions

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod drivers;
pub mod families;

#[cfg(feature = "motor-v1")]
pub mod motor_v1;
#[cfg(feature = "sensor-v2")]
pub mod sensor_v2;

pub use config::BoardInfo;
