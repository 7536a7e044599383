//! Typed lookup from identifier to descriptor.
//!
//! A board implements [`Factory`] once per peripheral kind (normally through
//! [`descriptor_table!`](crate::descriptor_table)) and [`ClockGated`] for the
//! kinds that sit behind a bus clock gate. Lookups are plain indexing into
//! `'static` tables; an identifier from another kind or another board is a
//! type error.
//!
//! ```
//! use periph_registry::{
//!     clock_table, descriptor_table, get, get_clock, peripheral_ids, Bus, ClockToken,
//! };
//!
//! peripheral_ids! {
//!     pub enum Timer { A, B }
//! }
//!
//! descriptor_table! {
//!     Timer: &'static str {
//!         A => "descA",
//!         B => "descB",
//!     }
//! }
//!
//! clock_table! {
//!     Timer {
//!         A => ClockToken::new(Bus::Apb2, 0),
//!         B => ClockToken::new(Bus::Apb1, 1),
//!     }
//! }
//!
//! assert_eq!(*get(Timer::A), "descA");
//! assert_eq!(*get(Timer::B), "descB");
//! assert_eq!(get_clock(Timer::B), ClockToken::new(Bus::Apb1, 1));
//! ```

use crate::clock::ClockToken;
use crate::descriptor::{Descriptor, DmaMode};
use crate::id::PeripheralId;
use crate::table::DescriptorTable;

/// A peripheral kind with one immutable descriptor per identifier.
pub trait Factory: PeripheralId {
    /// Descriptor shape for this kind.
    type Descriptor: 'static;

    /// The kind's descriptor table.
    fn descriptors() -> &'static DescriptorTable<Self, Self::Descriptor>;

    /// Descriptor for this identifier.
    #[inline]
    fn descriptor(self) -> &'static Self::Descriptor {
        Self::descriptors().get(self)
    }
}

/// A peripheral kind whose instances need a bus clock enabled.
pub trait ClockGated: PeripheralId {
    /// The kind's clock token table, parallel to its descriptor table.
    fn clocks() -> &'static DescriptorTable<Self, ClockToken>;

    /// Clock token for this identifier.
    #[inline]
    fn clock(self) -> ClockToken {
        *Self::clocks().get(self)
    }
}

/// Descriptor for `id`.
///
/// Returns the same `'static` reference on every call.
#[inline]
pub fn get<K: Factory>(id: K) -> &'static K::Descriptor {
    id.descriptor()
}

/// Clock token for `id`. Only exists for clock-gated kinds.
#[inline]
pub fn get_clock<K: ClockGated>(id: K) -> ClockToken {
    id.clock()
}

/// DMA-driven variant of `id`'s descriptor (see [`Descriptor::for_dma`]).
///
/// # Panics
///
/// Halts when the board linked no DMA stream to `id`. Programming the
/// peripheral for DMA without a stream would leave it raising requests that
/// nothing services; there is no safe fallback descriptor.
#[allow(clippy::panic)] // misconfigured board data: fail fast, never substitute a descriptor
pub fn get_for_dma<K, P>(id: K) -> Descriptor<P>
where
    K: Factory<Descriptor = Descriptor<P>>,
    P: DmaMode + 'static,
{
    match id.descriptor().for_dma() {
        Some(descriptor) => descriptor,
        None => {
            #[cfg(feature = "defmt")]
            defmt::error!("{=str}::{=str} has no DMA link", K::KIND, id.name());
            panic!("{}::{} has no DMA link", K::KIND, id.name())
        }
    }
}
