//! Aggregators: which enumerators participate, and in what order.

use crate::diag::{self, Diagnostic, ErrorKind};
use crate::enumerator::Enumerator;

use std::marker::PhantomData;

/// Position reported for an enumerator that is not part of a layout.
pub const NOT_FOUND: u64 = u64::MAX;

/// A compile-time ordered sequence of enumerator values.
pub trait Aggregator {
    type Enum: Enumerator;

    const VALUES: &'static [u64];
    const LENGTH: usize = Self::VALUES.len();
}

/// The first `W` enumerators of `E`, in declaration order.
///
/// ```
/// use cafberiht::{Aggregator, Enumerator, FirstN};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// enum Op { A, B, C, #[enumerator(count)] Count }
///
/// assert_eq!(<FirstN<Op, 2> as Aggregator>::VALUES, &[0, 1]);
/// assert_eq!(<FirstN<Op, 2> as Aggregator>::LENGTH, 2);
/// ```
pub struct FirstN<E, const W: usize>(PhantomData<E>);

impl<E: Enumerator, const W: usize> FirstN<E, W> {
    const LAYOUT: [u64; W] = first_n::<W>();
}

impl<E: Enumerator, const W: usize> Aggregator for FirstN<E, W> {
    type Enum = E;

    const VALUES: &'static [u64] = &Self::LAYOUT;
}

const fn first_n<const W: usize>() -> [u64; W] {
    let mut values = [0; W];
    let mut i = 0;
    while i < W {
        values[i] = i as u64;
        i += 1;
    }
    values
}

// ---------------------------------------------------------------------------
// Support Functions
// ---------------------------------------------------------------------------

/// Smallest `i` with `values[i] == value`, or [`NOT_FOUND`].
pub const fn position_in(values: &[u64], value: u64) -> u64 {
    let mut i = 0;
    while i < values.len() {
        if values[i] == value {
            return i as u64;
        }
        i += 1;
    }
    NOT_FOUND
}

pub const fn same_layout(lhs: &[u64], rhs: &[u64]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut i = 0;
    while i < lhs.len() {
        if lhs[i] != rhs[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Rejects any value at or past the sentinel of `E`.
#[track_caller]
pub const fn validate<E: Enumerator>(values: &[u64]) {
    let mut i = 0;
    while i < values.len() {
        diag::require(
            values[i] < E::COUNT,
            Diagnostic::new(ErrorKind::EnumeratorOutOfRange)
                .with("position", i as u64)
                .with("value", values[i])
                .with("count", E::COUNT),
        );
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, crate::Enumerator)]
    enum Ffn {
        Gate,
        Up,
        Silu,
        Down,
        #[enumerator(count)]
        Count,
    }

    struct Reversed;

    impl Aggregator for Reversed {
        type Enum = Ffn;
        const VALUES: &'static [u64] = &[3, 2, 1, 0];
    }

    #[test]
    fn first_n_counts_up() {
        assert_eq!(<FirstN<Ffn, 4> as Aggregator>::VALUES, &[0, 1, 2, 3]);
        assert_eq!(<FirstN<Ffn, 1> as Aggregator>::LENGTH, 1);
        assert!(<FirstN<Ffn, 0> as Aggregator>::VALUES.is_empty());
    }

    #[test]
    fn positions() {
        assert_eq!(position_in(Reversed::VALUES, Ffn::Gate as u64), 3);
        assert_eq!(position_in(Reversed::VALUES, Ffn::Down as u64), 0);
        assert_eq!(position_in(&[1, 1, 2], 1), 0);
        assert_eq!(position_in(&[0, 1], 7), NOT_FOUND);
        assert_eq!(position_in(&[], 0), NOT_FOUND);

        const SILU: u64 = position_in(Reversed::VALUES, 2);
        assert_eq!(SILU, 1);
    }

    #[test]
    fn layouts_compare_elementwise() {
        assert!(same_layout(<FirstN<Ffn, 2> as Aggregator>::VALUES, &[0, 1]));
        assert!(!same_layout(Reversed::VALUES, &[0, 1, 2, 3]));
        assert!(!same_layout(&[0], &[0, 1]));
    }

    #[test]
    fn validate_accepts_members() {
        const _: () = validate::<Ffn>(Reversed::VALUES);
    }

    #[test]
    #[should_panic(expected = "position = 1, value = 4, count = 4")]
    fn validate_rejects_the_sentinel() {
        validate::<Ffn>(&[0, Ffn::Count as u64]);
    }
}
