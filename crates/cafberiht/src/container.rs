//! The meta-container.
//!
//! Containers are declared with [`cafberiht!`](crate::cafberiht), which turns
//! a layout into a struct with one field per element and implements the traits
//! below for it, one impl per slot. Every lookup is trait selection:
//!
//! - [`Locate`] answers `get(tag)`: one impl per `(Tag<eᵢ>, Slot<i>)`, each
//!   delegating to the element's own `Index<Tag<eᵢ>>`. The slot is inferred,
//!   so a tag that occurs twice in the layout is ambiguous at the call site.
//! - [`At`] answers `get_by_index::<N>()`.
//! - [`Contains`] answers "is `E` one of my element types".
//! - [`VisitAll`] and [`InspectAll`] are the unrolled walks.
//!
//! Lookups that have no impl are reported with the diagnostic kinds of
//! [`ErrorKind`](crate::ErrorKind):
//!
//! ```compile_fail,E0277
//! # use cafberiht::{cafberiht, Cafberiht, Element, Enumerator};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Q, K, V, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Head<const E: u64>;
//! cafberiht! {
//!     struct Attention: Head<Op> = first(2);
//! }
//! // error: get_core_by_index_oob: `Attention` has no element at index 2
//! let attention = Attention::default();
//! let _ = attention.get_by_index::<2>();
//! ```
//!
//! ```compile_fail,E0277
//! # use cafberiht::{cafberiht, tag, Cafberiht, Element, Enumerator};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Q, K, V, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Head<const E: u64>;
//! cafberiht! {
//!     struct Attention: Head<Op> = [Op::Q, Op::K];
//! }
//! // error: `Attention` holds no element keyed by `Tag<2>`
//! let attention = Attention::default();
//! let _ = attention.get(tag!(Op::V));
//! ```
//!
//! ```compile_fail,E0277
//! # use cafberiht::{cafberiht, Cafberiht, Element, Enumerator, Visitor};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Q, K, V, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Head<const E: u64>;
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Other<const E: u64>;
//! # struct Touch;
//! # impl<const E: u64> Visitor<Other<E>, ()> for Touch {
//! #     const ADMIT: bool = true;
//! #     fn apply(_: &mut Other<E>, _: &mut ()) {}
//! # }
//! cafberiht! {
//!     struct Attention: Head<Op> = first(3);
//! }
//! // error: invalid_base_cast: `Other<0>` is not an element of `Attention`
//! let mut attention = Attention::default();
//! attention.visit::<Touch, Other<0>, _, _>(&mut ());
//! ```
//!
//! A duplicated enumerator keeps positional access but makes tag access
//! ambiguous:
//!
//! ```compile_fail
//! # use cafberiht::{cafberiht, tag, Cafberiht, Element, Enumerator};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Q, K, V, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Head<const E: u64>;
//! cafberiht! {
//!     struct Twice: Head<Op> = [Op::K, Op::K];
//! }
//! let twice = Twice::default();
//! let _ = twice.get_by_index::<1>();
//! let _ = twice.get(tag!(Op::K));
//! ```

use crate::aggregator::{self, NOT_FOUND};
use crate::diag::{self, Diagnostic, ErrorKind};
use crate::element::Element;
use crate::enumerator::{self, Enumerator};
use crate::visitor::Visitor;

use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// Lookup traits
// ---------------------------------------------------------------------------

/// Tag-keyed access to the element stored at slot `P`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` holds no element keyed by `{K}`",
    label = "no element of this container is keyed by `{K}`",
    note = "tags must name an enumerator that appears exactly once in the container's layout"
)]
pub trait Locate<K, P> {
    type Output: Element;

    fn locate(&self) -> &Self::Output;
    fn locate_mut(&mut self) -> &mut Self::Output;
}

/// Positional access to the `N`-th element.
#[diagnostic::on_unimplemented(
    message = "get_core_by_index_oob: `{Self}` has no element at index {N}",
    label = "index {N} is out of bounds",
    note = "positions run from 0 to `SIZE - 1`"
)]
pub trait At<const N: usize> {
    type Output: Element;

    fn at(&self) -> &Self::Output;
    fn at_mut(&mut self) -> &mut Self::Output;
}

/// Membership of the element type `E`, stored at slot `P`.
#[diagnostic::on_unimplemented(
    message = "invalid_base_cast: `{E}` is not an element of `{Self}`",
    label = "`{E}` is not part of this container's layout"
)]
pub trait Contains<E, P> {
    fn element(&self) -> &E;
    fn element_mut(&mut self) -> &mut E;
}

// ---------------------------------------------------------------------------
// Walks
// ---------------------------------------------------------------------------

/// Applies `V` to every admitted element, in layout order.
pub trait VisitAll<V, A: ?Sized> {
    fn visit_all(&mut self, args: &mut A);
}

/// Applies the inspector `V` to every admitted element, in layout order.
pub trait InspectAll<V, A: ?Sized> {
    fn inspect_all(&self, args: &mut A);
}

// ---------------------------------------------------------------------------
// Cafberiht
// ---------------------------------------------------------------------------

/// A container generated by [`cafberiht!`](crate::cafberiht).
pub trait Cafberiht: Default + Sized {
    type Enum: Enumerator;

    /// Number of elements.
    const SIZE: usize;
    /// Position → enumerator value.
    const INDEX_MAP: &'static [u64];

    /// The element keyed by `tag`.
    #[inline(always)]
    fn get<K, P>(&self, tag: K) -> &<Self as Locate<K, P>>::Output
    where
        Self: Locate<K, P>,
    {
        let _ = tag;
        self.locate()
    }

    #[inline(always)]
    fn get_mut<K, P>(&mut self, tag: K) -> &mut <Self as Locate<K, P>>::Output
    where
        Self: Locate<K, P>,
    {
        let _ = tag;
        self.locate_mut()
    }

    /// The element at position `N`.
    #[inline(always)]
    fn get_by_index<const N: usize>(&self) -> &<Self as At<N>>::Output
    where
        Self: At<N>,
    {
        self.at()
    }

    #[inline(always)]
    fn get_by_index_mut<const N: usize>(&mut self) -> &mut <Self as At<N>>::Output
    where
        Self: At<N>,
    {
        self.at_mut()
    }

    /// The enumerator at position `N`, bounds-checked at compile time.
    ///
    /// `N >= SIZE` stops the build when the call is instantiated:
    ///
    /// ```text
    /// cafberiht error[get_core_by_index_oob]: index = 2, size = 2
    /// ```
    #[inline]
    fn enumerator_at<const N: usize>() -> Self::Enum {
        let () = IndexBound::<Self, N>::OK;
        enumerator::nth::<Self::Enum>(Self::INDEX_MAP[N])
    }

    /// Position of `enumerator` in the layout, if present.
    fn position(enumerator: Self::Enum) -> Option<usize> {
        match aggregator::position_in(Self::INDEX_MAP, enumerator.value()) {
            NOT_FOUND => None,
            position => Some(position as usize),
        }
    }

    /// Walks every element in layout order, applying `V` where it admits.
    #[inline(always)]
    fn walk<V, A: ?Sized>(&mut self, args: &mut A)
    where
        Self: VisitAll<V, A>,
    {
        self.visit_all(args)
    }

    /// Read-only walk.
    #[inline(always)]
    fn inspect<V, A: ?Sized>(&self, args: &mut A)
    where
        Self: InspectAll<V, A>,
    {
        self.inspect_all(args)
    }

    /// Applies `V` to the single element of type `E`, if `V` admits it.
    #[inline(always)]
    fn visit<V, E, P, A: ?Sized>(&mut self, args: &mut A)
    where
        Self: Contains<E, P>,
        E: Element,
        V: Visitor<E, A>,
    {
        if const { <V as Visitor<E, A>>::ADMIT } {
            V::apply(self.element_mut(), args);
        }
    }
}

// ---------------------------------------------------------------------------
// Compile-time queries
// ---------------------------------------------------------------------------

/// Position of the enumerator value `E` in `C`, or [`NOT_FOUND`].
///
/// ```
/// # use cafberiht::{cafberiht, Element, Enumerator, PositionOf, NOT_FOUND};
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// # enum Op { Q, K, V, #[enumerator(count)] Count }
/// # #[derive(Default, Element)]
/// # #[element(enumerator = Op)]
/// # struct Head<const E: u64>;
/// cafberiht! {
///     struct Attention: Head<Op> = [Op::V, Op::Q];
/// }
///
/// assert_eq!(PositionOf::<Attention, { Op::Q as u64 }>::VALUE, 1);
/// assert_eq!(PositionOf::<Attention, { Op::K as u64 }>::VALUE, NOT_FOUND);
/// ```
pub struct PositionOf<C, const E: u64>(PhantomData<C>);

impl<C: Cafberiht, const E: u64> PositionOf<C, E> {
    pub const VALUE: u64 = aggregator::position_in(C::INDEX_MAP, E);
}

/// Holds only when `N < C::SIZE`; otherwise raises `get_core_by_index_oob`.
pub struct IndexBound<C, const N: usize>(PhantomData<C>);

impl<C: Cafberiht, const N: usize> IndexBound<C, N> {
    pub const OK: () = diag::require(
        N < C::SIZE,
        Diagnostic::new(ErrorKind::GetCoreByIndexOob)
            .with("index", N as u64)
            .with("size", C::SIZE as u64),
    );
}
