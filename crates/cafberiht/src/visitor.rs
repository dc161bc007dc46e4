//! Visitor protocol.
//!
//! A visitor is a type implementing [`Visitor`] for every element type it may
//! meet. `ADMIT` depends only on the element type and is read in a constant
//! context at each unrolled step of a walk, so a step whose element is not
//! admitted compiles to nothing. Admitted steps run in aggregator order and
//! all receive the same `args`, which they may mutate.

use crate::element::Element;

/// Mutating visitor over elements of type `E`, threading `A` through a walk.
///
/// ```
/// use cafberiht::{cafberiht, Cafberiht, Element, Enumerator, Visitor};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// enum Op { Q, K, V, #[enumerator(count)] Count }
///
/// #[derive(Default, Element)]
/// #[element(enumerator = Op)]
/// struct Head<const E: u64>;
///
/// cafberiht! {
///     struct Attention: Head<Op> = first(3);
/// }
///
/// /// Records the enumerators of odd elements.
/// struct Odd;
///
/// impl<const E: u64> Visitor<Head<E>, Vec<u64>> for Odd {
///     const ADMIT: bool = E % 2 == 1;
///
///     fn apply(_: &mut Head<E>, seen: &mut Vec<u64>) {
///         seen.push(E);
///     }
/// }
///
/// let mut seen = Vec::new();
/// Attention::default().walk::<Odd, _>(&mut seen);
/// assert_eq!(seen, [1]);
/// ```
pub trait Visitor<E: Element, A: ?Sized> {
    /// Whether this visitor acts on `E` at all.
    const ADMIT: bool;

    fn apply(element: &mut E, args: &mut A);
}

/// Read-only counterpart of [`Visitor`].
///
/// Inspections borrow the container shared, so several may run at once.
pub trait Inspector<E: Element, A: ?Sized> {
    const ADMIT: bool;

    fn inspect(element: &E, args: &mut A);
}
