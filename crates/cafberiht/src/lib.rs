//! Compile-time heterogeneous operation arrays.
//!
//! A *cafberiht* is a fixed-shape record whose elements all have distinct
//! types, one per enumerator of a closed enumerator set. The participating
//! enumerators and their order are chosen by an aggregator and baked into the
//! container type, so that:
//!
//! - element access by tag or by position is resolved by trait selection and
//!   costs nothing at runtime;
//! - a visitor walk is an unrolled sequence of calls in aggregator order, where
//!   each step's admission predicate is a constant and rejected steps emit no
//!   code;
//! - misuse (empty layouts, out-of-range positions, foreign element types) is a
//!   build failure whose text names the error kind and the offending values.
//!
//! ```
//! use cafberiht::{cafberiht, tag, Cafberiht, Element, Enumerator, Visitor};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! enum Op {
//!     Load,
//!     Add,
//!     Store,
//!     #[enumerator(count)]
//!     Count,
//! }
//!
//! #[derive(Debug, Default, Element)]
//! #[element(enumerator = Op)]
//! struct Kernel<const E: u64> {
//!     runs: u64,
//! }
//!
//! cafberiht! {
//!     struct Pipeline: Kernel<Op> = [Op::Load, Op::Store];
//! }
//!
//! struct Run;
//!
//! impl<const E: u64> Visitor<Kernel<E>, u64> for Run {
//!     const ADMIT: bool = true;
//!
//!     fn apply(kernel: &mut Kernel<E>, total: &mut u64) {
//!         kernel.runs += 1;
//!         *total += E;
//!     }
//! }
//!
//! let mut pipeline = Pipeline::default();
//! let mut total = 0u64;
//! pipeline.walk::<Run, _>(&mut total);
//!
//! assert_eq!(total, Op::Load as u64 + Op::Store as u64);
//! assert_eq!(pipeline.get(tag!(Op::Store)).runs, 1);
//! assert_eq!(Pipeline::position_of::<{ Op::Store as u64 }>(), 1);
//! ```

extern crate self as cafberiht;

pub mod aggregator;
pub mod container;
pub mod diag;
pub mod element;
pub mod enumerator;
pub mod tag;
pub mod visitor;

pub use aggregator::{Aggregator, FirstN, NOT_FOUND};
pub use container::{At, Cafberiht, Contains, InspectAll, Locate, PositionOf, VisitAll};
pub use diag::{Diagnostic, ErrorKind};
pub use element::Element;
pub use enumerator::{Enumerator, EnumeratorError};
pub use tag::{Slot, Tag};
pub use visitor::{Inspector, Visitor};

/// Derives [`Enumerator`] for a fieldless enum ending in a
/// `#[enumerator(count)]` sentinel.
pub use cafberiht_macros::Enumerator;

/// Derives [`Element`] and its tag-keyed access for a struct with a single
/// `const _: u64` parameter.
pub use cafberiht_macros::Element;

/// Declares one or more containers from an element family and a layout.
///
/// ```text
/// cafberiht! {
///     #[derive(Debug)]
///     pub struct Name: Family<Enum> = [Enum::A, Enum::B];
///     pub struct Wide: Family<Enum> = first(8) as SomeAggregator;
/// }
/// ```
pub use cafberiht_macros::cafberiht;
