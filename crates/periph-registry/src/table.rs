//! Indexed immutable tables, one per peripheral kind.

use core::marker::PhantomData;

use crate::id::PeripheralId;

/// Immutable values keyed by a kind's identifiers.
///
/// Entry `i` belongs to the identifier whose [`PeripheralId::index`] is `i`.
/// The table borrows `'static` storage, so a lookup hands out the same
/// reference every time and never copies the descriptor.
pub struct DescriptorTable<I: 'static, D: 'static> {
    entries: &'static [D],
    _id: PhantomData<fn() -> I>,
}

impl<I: PeripheralId, D> DescriptorTable<I, D> {
    /// Wrap `entries`, one per identifier of `I`, in identifier order.
    ///
    /// The length check runs at compile time: a table with more or fewer
    /// entries than `I::COUNT` does not build.
    pub const fn new<const N: usize>(entries: &'static [D; N]) -> Self {
        const {
            assert!(
                N == I::COUNT,
                "descriptor table length must equal the identifier count"
            );
        }
        Self {
            entries,
            _id: PhantomData,
        }
    }

    /// Entry for `id`.
    ///
    /// # Panics
    ///
    /// Only if `id.index()` is outside `0..COUNT`, which the generated
    /// [`PeripheralId`] impls never produce. A hand-written impl that does is
    /// halted here rather than handed a neighbouring descriptor.
    #[inline]
    #[allow(clippy::indexing_slicing)] // index() < COUNT == entries.len(), checked in new()
    pub fn get(&self, id: I) -> &'static D {
        let entries: &'static [D] = self.entries;
        &entries[id.index()]
    }

    /// Entry at a raw `index`, for identifiers that only exist as numbers.
    pub fn get_index(&self, index: usize) -> Option<&'static D> {
        let entries: &'static [D] = self.entries;
        entries.get(index)
    }

    /// `(identifier, entry)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &'static D)> {
        let entries: &'static [D] = self.entries;
        I::ALL.iter().copied().zip(entries.iter())
    }

    /// Number of entries (always `I::COUNT`).
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a kind with no identifiers.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in identifier order.
    pub const fn as_slice(&self) -> &'static [D] {
        self.entries
    }
}

impl<I, D> core::fmt::Debug for DescriptorTable<I, D>
where
    I: PeripheralId,
    D: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(id, entry)| (id.name(), entry)))
            .finish()
    }
}

/// Implement [`Factory`](crate::Factory) for an identifier enum from a list
/// of `Variant => descriptor` entries.
///
/// Entries must appear in identifier order and cover every identifier; both
/// are checked while building.
///
/// ```
/// use periph_registry::{descriptor_table, peripheral_ids, Factory};
///
/// peripheral_ids! {
///     pub enum Timer { A, B }
/// }
///
/// descriptor_table! {
///     Timer: u32 {
///         A => 0x4001_0000,
///         B => 0x4000_0400,
///     }
/// }
///
/// assert_eq!(*Timer::B.descriptor(), 0x4000_0400);
/// ```
///
/// ```compile_fail
/// use periph_registry::{descriptor_table, peripheral_ids};
///
/// peripheral_ids! {
///     pub enum Timer { A, B }
/// }
///
/// descriptor_table! {
///     Timer: u32 {
///         B => 0x4000_0400,
///         A => 0x4001_0000,
///     }
/// }
/// ```
#[macro_export]
macro_rules! descriptor_table {
    ($kind:ident : $desc:ty { $($variant:ident => $entry:expr),+ $(,)? }) => {
        $crate::__assert_entry_order!($kind, $($variant),+);

        impl $crate::Factory for $kind {
            type Descriptor = $desc;

            fn descriptors() -> &'static $crate::DescriptorTable<Self, $desc> {
                static TABLE: $crate::DescriptorTable<$kind, $desc> =
                    $crate::DescriptorTable::new(&[$($entry),+]);
                &TABLE
            }
        }
    };
}

/// Implement [`ClockGated`](crate::ClockGated) for an identifier enum from a
/// list of `Variant => clock token` entries.
///
/// Same ordering and completeness rules as [`descriptor_table!`].
#[macro_export]
macro_rules! clock_table {
    ($kind:ident { $($variant:ident => $token:expr),+ $(,)? }) => {
        $crate::__assert_entry_order!($kind, $($variant),+);

        impl $crate::ClockGated for $kind {
            fn clocks() -> &'static $crate::DescriptorTable<Self, $crate::ClockToken> {
                static TABLE: $crate::DescriptorTable<$kind, $crate::ClockToken> =
                    $crate::DescriptorTable::new(&[$($token),+]);
                &TABLE
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_entry_order {
    ($kind:ident, $($variant:ident),+) => {
        #[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
        const _: () = {
            let order = [$($kind::$variant as usize),+];
            let mut position = 0;
            while position < order.len() {
                ::core::assert!(
                    order[position] == position,
                    ::core::concat!(
                        "entries for ",
                        ::core::stringify!($kind),
                        " must be listed in identifier order"
                    )
                );
                position += 1;
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::peripheral_ids! {
        enum Spi { Flash, Display, Radio }
    }

    static NAMES: DescriptorTable<Spi, &str> =
        DescriptorTable::new(&["flash", "display", "radio"]);

    #[test]
    fn get_follows_identifier_index() {
        assert_eq!(*NAMES.get(Spi::Flash), "flash");
        assert_eq!(*NAMES.get(Spi::Display), "display");
        assert_eq!(*NAMES.get(Spi::Radio), "radio");
    }

    #[test]
    fn repeated_get_returns_same_reference() {
        assert!(core::ptr::eq(NAMES.get(Spi::Radio), NAMES.get(Spi::Radio)));
    }

    #[test]
    fn get_index_rejects_count() {
        assert_eq!(NAMES.get_index(2), Some(&"radio"));
        assert_eq!(NAMES.get_index(Spi::COUNT), None);
    }

    #[test]
    fn iter_pairs_ids_with_entries() {
        let pairs: Vec<_> = NAMES.iter().map(|(id, name)| (id, *name)).collect();
        assert_eq!(
            pairs,
            vec![
                (Spi::Flash, "flash"),
                (Spi::Display, "display"),
                (Spi::Radio, "radio")
            ]
        );
        assert_eq!(NAMES.len(), 3);
        assert!(!NAMES.is_empty());
    }

    #[test]
    fn debug_uses_identifier_names() {
        let rendered = format!("{NAMES:?}");
        assert_eq!(
            rendered,
            r#"{"Flash": "flash", "Display": "display", "Radio": "radio"}"#
        );
    }
}
