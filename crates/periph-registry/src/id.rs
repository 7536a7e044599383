//! Logical peripheral identifiers.
//!
//! Each peripheral kind on a board is a closed, fieldless enum. The enum's
//! discriminant is the identifier's index into every table of that kind, and
//! [`PeripheralId::COUNT`] plays the role of the "size" bound: it is an
//! associated constant, never a variant, so it cannot be looked up.
//!
//! ```compile_fail
//! use periph_registry::peripheral_ids;
//!
//! peripheral_ids! {
//!     pub enum Timer { A, B }
//! }
//!
//! // There is no sentinel variant to pass.
//! let _ = Timer::Size;
//! ```

/// A closed set of logical identifiers for one peripheral kind on one board.
///
/// Usually implemented through [`peripheral_ids!`](crate::peripheral_ids),
/// which keeps `index()` equal to the declaration position.
pub trait PeripheralId: Copy + Eq + 'static {
    /// Every identifier, in declaration (= index) order.
    const ALL: &'static [Self];

    /// Number of identifiers. Valid indices are `0..COUNT`.
    const COUNT: usize = Self::ALL.len();

    /// Kind name used in diagnostics (e.g. `"Timer"`).
    const KIND: &'static str;

    /// Position of this identifier in its kind's tables.
    fn index(self) -> usize;

    /// Identifier name used in diagnostics (e.g. `"Tim1"`).
    fn name(self) -> &'static str;

    /// Identifier at `index`, or `None` when `index >= COUNT`.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Raw value that does not name any identifier of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownId {
    /// Kind the value was converted for.
    pub kind: &'static str,
    /// The rejected raw value.
    pub index: usize,
}

impl core::fmt::Display for UnknownId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} has no identifier with index {}", self.kind, self.index)
    }
}

impl core::error::Error for UnknownId {}

/// Declare a peripheral kind's identifier enum.
///
/// Generates a `#[repr(u8)]` enum with the usual value derives, its
/// [`PeripheralId`] impl and a `TryFrom<u8>` conversion for identifiers that
/// arrive as raw numbers (e.g. from a host command).
///
/// The enum also derives `defmt::Format` when the *calling* crate's `defmt`
/// feature is on, so that crate must depend on `defmt` under that feature.
///
/// ```
/// use periph_registry::{peripheral_ids, PeripheralId};
///
/// peripheral_ids! {
///     /// Timers on this board.
///     pub enum Timer { Tim1, Tim3 }
/// }
///
/// assert_eq!(Timer::COUNT, 2);
/// assert_eq!(Timer::Tim3.index(), 1);
/// assert_eq!(Timer::try_from(0u8), Ok(Timer::Tim1));
/// assert!(Timer::try_from(2u8).is_err());
/// ```
#[macro_export]
macro_rules! peripheral_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $kind:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        $vis enum $kind {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::PeripheralId for $kind {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const KIND: &'static str = ::core::stringify!($kind);

            #[inline(always)]
            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => ::core::stringify!($variant)),+
                }
            }
        }

        impl ::core::convert::TryFrom<u8> for $kind {
            type Error = $crate::UnknownId;

            fn try_from(value: u8) -> ::core::result::Result<Self, Self::Error> {
                <Self as $crate::PeripheralId>::from_index(usize::from(value)).ok_or(
                    $crate::UnknownId {
                        kind: <Self as $crate::PeripheralId>::KIND,
                        index: usize::from(value),
                    },
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    peripheral_ids! {
        enum Dma { Stream0, Stream1, Stream7 }
    }

    #[test]
    fn count_excludes_any_sentinel() {
        assert_eq!(Dma::COUNT, 3);
        assert_eq!(Dma::ALL, &[Dma::Stream0, Dma::Stream1, Dma::Stream7]);
    }

    #[test]
    fn index_is_declaration_position() {
        for (position, id) in Dma::ALL.iter().enumerate() {
            assert_eq!(id.index(), position);
            assert_eq!(Dma::from_index(position), Some(*id));
        }
    }

    #[test]
    fn index_past_count_is_rejected() {
        assert_eq!(Dma::from_index(Dma::COUNT), None);
        assert_eq!(
            Dma::try_from(3u8),
            Err(UnknownId {
                kind: "Dma",
                index: 3
            })
        );
    }

    #[test]
    fn names_come_from_variants() {
        assert_eq!(Dma::KIND, "Dma");
        assert_eq!(Dma::Stream7.name(), "Stream7");
    }

    #[test]
    fn unknown_id_display_names_kind_and_index() {
        let err = UnknownId {
            kind: "Dma",
            index: 9,
        };
        assert_eq!(err.to_string(), "Dma has no identifier with index 9");
    }
}
