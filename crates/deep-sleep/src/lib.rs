//! Deep-sleep lifecycle coordination.
//!
//! Modules that own peripheral state (drivers, composite controllers, ...)
//! implement [`PowerAware`] and register with a [`DeepSleepCoordinator`].
//! Power-management code then drives two global transitions,
//! [`enter_global_deep_sleep`] and [`exit_global_deep_sleep`], which call every
//! registered module in registration order.
//!
//! # Ownership
//!
//! ```text
//! owner ──owns──▶ PowerAwareNode<T> ──contains──▶ T: PowerAware
//!                       │ pinned; registers on demand, deregisters on Drop
//!                       ▼
//! DeepSleepCoordinator ──non-owning pointer──▶ T
//! ```
//!
//! The coordinator never owns a module. A node must be pinned before it can
//! register, and pinning guarantees its `Drop` (and so its deregistration)
//! runs before the module's memory is reused.
//!
//! # Example
//!
//! ```
//! use core::pin::pin;
//! use core::sync::atomic::{AtomicBool, Ordering};
//! use deep_sleep::{DeepSleepCoordinator, PowerAware, PowerAwareNode};
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//!
//! struct Uart {
//!     parked: AtomicBool,
//! }
//!
//! impl PowerAware for Uart {
//!     fn enter_deep_sleep(&self) {
//!         self.parked.store(true, Ordering::Relaxed);
//!     }
//!
//!     fn exit_deep_sleep(&self) {
//!         self.parked.store(false, Ordering::Relaxed);
//!     }
//! }
//!
//! static COORDINATOR: DeepSleepCoordinator<CriticalSectionRawMutex, 4> =
//!     DeepSleepCoordinator::new();
//!
//! let uart = pin!(PowerAwareNode::new(&COORDINATOR, Uart { parked: AtomicBool::new(false) }));
//! uart.as_ref().register().unwrap();
//!
//! COORDINATOR.enter_deep_sleep();
//! assert!(uart.parked.load(Ordering::Relaxed));
//! COORDINATOR.exit_deep_sleep();
//! assert!(!uart.parked.load(Ordering::Relaxed));
//! ```
//!
//! # Features
//!
//! - `defmt`: derive `defmt::Format` for public types and log transitions

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
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod coordinator;
pub mod global;
pub mod module;
pub mod node;

pub use coordinator::{DeepSleepCoordinator, RegisterError};
pub use global::{
    enter_global_deep_sleep, exit_global_deep_sleep, GlobalCoordinator, GlobalNode, DEEP_SLEEP,
};
pub use module::PowerAware;
pub use node::PowerAwareNode;
