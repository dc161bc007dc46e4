//! Type-level keys.
//!
//! A [`Tag`] is a zero-sized witness of one enumerator (or of any `u64`). Two
//! tags are the same type exactly when their payloads are equal, which is what
//! lets element lookup be decided by trait selection instead of at runtime.

use std::fmt;

/// Zero-sized key for the enumerator (or index) `N`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag<const N: u64>;

impl<const N: u64> Tag<N> {
    /// The payload carried by this tag type.
    pub const VALUE: u64 = N;

    /// Returns the payload carried by this tag.
    #[inline]
    pub const fn value(self) -> u64 {
        N
    }
}

impl<const N: u64> fmt::Debug for Tag<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag<{}>", N)
    }
}

/// Zero-sized name of a storage position inside a container.
///
/// Tag lookup is keyed on `(Tag, Slot)` pairs. When an enumerator occurs once
/// the slot is inferred; when it occurs more than once the lookup is
/// ambiguous and the build stops at the call site.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot<const I: usize>;

impl<const I: usize> Slot<I> {
    /// The position named by this slot type.
    pub const INDEX: usize = I;
}

impl<const I: usize> fmt::Debug for Slot<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot<{}>", I)
    }
}

/// Builds the [`Tag`] value for an enumerator or an unsigned integer.
///
/// ```
/// # use cafberiht::{tag, Tag};
/// #[derive(Clone, Copy)]
/// enum Phase { Warmup, Steady }
///
/// let steady: Tag<1> = tag!(Phase::Steady);
/// assert_eq!(steady.value(), 1);
/// assert_eq!(tag!(7), Tag::<7>);
/// # let _ = Phase::Warmup;
/// ```
#[macro_export]
macro_rules! tag {
    ($value:expr) => {
        $crate::Tag::<{ ($value) as u64 }>
    };
}
