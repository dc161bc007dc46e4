//! Element interface.

use crate::enumerator::Enumerator;

/// A per-enumerator record held by a container.
///
/// Element families are generic over one `const E: u64` parameter; each
/// instantiation is a distinct type that knows its own enumerator. The derive
/// also gives every element exactly one tag-keyed access, `Index<Tag<E>>`,
/// returning the element itself. Containers answer tag lookups by delegating
/// to that impl, so a tag that no element is keyed on has no candidate.
///
/// ```
/// use cafberiht::{tag, Element, Enumerator};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// enum Op { Gate, Up, #[enumerator(count)] Count }
///
/// #[derive(Default, Element)]
/// #[element(enumerator = Op)]
/// struct Kernel<const E: u64> {
///     runs: u64,
/// }
///
/// let mut up = Kernel::<1>::default();
/// up[tag!(Op::Up)].runs += 1;
///
/// assert_eq!(Kernel::<1>::ENUMERATOR, Op::Up);
/// assert_eq!(up.enumerator(), Op::Up);
/// assert_eq!(up.runs, 1);
/// ```
///
/// Any other tag is rejected:
///
/// ```compile_fail,E0277
/// # use cafberiht::{tag, Element, Enumerator};
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// # enum Op { Gate, Up, #[enumerator(count)] Count }
/// # #[derive(Default, Element)]
/// # #[element(enumerator = Op)]
/// # struct Kernel<const E: u64> { runs: u64 }
/// let up = Kernel::<1>::default();
/// let _ = up[tag!(Op::Gate)].runs;
/// ```
pub trait Element: Default + 'static {
    type Enum: Enumerator;

    /// Numeric identity of the enumerator this element is keyed on.
    const ENUMERATOR_VALUE: u64;
    /// The enumerator this element is keyed on.
    const ENUMERATOR: Self::Enum;

    #[inline]
    fn enumerator(&self) -> Self::Enum {
        Self::ENUMERATOR
    }
}
