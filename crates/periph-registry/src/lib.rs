//! Compile-time peripheral descriptor registry.
//!
//! Every peripheral kind a board uses (timers, serial ports, DMA streams, ...)
//! gets its own closed enumeration of logical identifiers and one immutable
//! descriptor per identifier. Bring-up code asks the registry for a descriptor
//! by identifier instead of repeating base addresses and init constants by hand.
//!
//! # Layers
//!
//! ```text
//! Board crate (identifier enums + descriptor/clock data)
//!         ↓  peripheral_ids! / descriptor_table! / clock_table!
//! Factory, ClockGated (this crate - typed lookup)
//!         ↓
//! DescriptorTable<I, D> (indexed immutable storage)
//! ```
//!
//! # Build-time guarantees
//!
//! - A kind's identifier enum has no "size" sentinel variant. The count is
//!   [`PeripheralId::COUNT`], so an out-of-range identifier cannot be written.
//! - [`DescriptorTable::new`] refuses (at compile time) a table whose length
//!   differs from the identifier count.
//! - [`descriptor_table!`] and [`clock_table!`] refuse entries listed out of
//!   identifier order.
//!
//! ```compile_fail
//! use periph_registry::{peripheral_ids, DescriptorTable};
//!
//! peripheral_ids! {
//!     pub enum Timer { A, B }
//! }
//!
//! // Two identifiers, three entries: rejected while building.
//! static TABLE: DescriptorTable<Timer, u32> = DescriptorTable::new(&[1, 2, 3]);
//! ```
//!
//! # Features
//!
//! - `defmt`: derive `defmt::Format` for registry types and log lookup failures

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)] // lookups are cheap; callers decide

pub mod clock;
pub mod descriptor;
pub mod factory;
pub mod id;
pub mod table;

pub use clock::{disable_clocks, enable_clocks, Bus, ClockControl, ClockToken};
pub use descriptor::{BaseAddress, Descriptor, DmaLink, DmaMode, Irq};
pub use factory::{get, get_clock, get_for_dma, ClockGated, Factory};
pub use id::{PeripheralId, UnknownId};
pub use table::DescriptorTable;
