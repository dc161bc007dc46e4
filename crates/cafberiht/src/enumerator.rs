//! Closed enumerator sets.
//!
//! An enumerator set is a fieldless enum whose variants have the implicit
//! identities `0, 1, 2, …` and whose last variant is a `count` sentinel. The
//! sentinel bounds every table generated from the set and is never a valid
//! element enumerator.

use crate::diag::{self, Diagnostic, ErrorKind};

use std::fmt::Debug;

/// Trait for enums usable as element keys.
///
/// Implemented with `#[derive(Enumerator)]`:
///
/// ```
/// use cafberiht::Enumerator;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// enum Op {
///     MulMat,
///     SoftMax,
///     #[enumerator(name = "rms")]
///     RmsNorm,
///     #[enumerator(count)]
///     Count,
/// }
///
/// assert_eq!(Op::COUNT, 3);
/// assert_eq!(Op::SoftMax.to_string(), "soft_max");
/// assert_eq!("rms".parse::<Op>(), Ok(Op::RmsNorm));
/// assert_eq!(Op::try_from(0), Ok(Op::MulMat));
/// assert!(Op::try_from(3).is_err());
/// ```
pub trait Enumerator: Copy + Eq + Debug + 'static {
    /// Number of members, excluding the sentinel.
    const COUNT: u64;
    /// Members in declaration order; `ALL[i].value() == i`.
    const ALL: &'static [Self];
    /// Names of the members followed by the name of the sentinel.
    const NAMES: &'static [&'static str];
    /// The `count` sentinel.
    const SENTINEL: Self;

    /// Numeric identity of this enumerator.
    fn value(self) -> u64;

    #[inline]
    fn name(self) -> &'static str {
        Self::NAMES[self.value() as usize]
    }

    #[inline]
    fn is_sentinel(self) -> bool {
        self.value() == Self::COUNT
    }

    /// Iterates the members in declaration order.
    fn iter() -> std::iter::Copied<std::slice::Iter<'static, Self>> {
        Self::ALL.iter().copied()
    }
}

/// Runtime lookup failures. Compile-time lookups go through [`nth`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumeratorError {
    #[error("enumerator value {value} is out of range (the set has {count} members)")]
    OutOfRange { value: u64, count: u64 },
    #[error("`{name}` names the count sentinel, not a member")]
    Sentinel { name: &'static str },
    #[error("unknown enumerator `{0}`")]
    UnknownName(String),
}

/// Recovers the enumerator with identity `value` in a constant context.
///
/// A value at or past the sentinel stops the build with
/// `enumerator_out_of_range`.
pub const fn nth<E: Enumerator>(value: u64) -> E {
    diag::require(
        value < E::COUNT,
        Diagnostic::new(ErrorKind::EnumeratorOutOfRange)
            .with("value", value)
            .with("count", E::COUNT),
    );
    E::ALL[value as usize]
}

pub fn from_value<E: Enumerator>(value: u64) -> Result<E, EnumeratorError> {
    if value < E::COUNT {
        Ok(E::ALL[value as usize])
    } else {
        Err(EnumeratorError::OutOfRange {
            value,
            count: E::COUNT,
        })
    }
}

pub fn from_name<E: Enumerator>(name: &str) -> Result<E, EnumeratorError> {
    match E::NAMES.iter().position(|candidate| *candidate == name) {
        Some(index) if (index as u64) < E::COUNT => Ok(E::ALL[index]),
        Some(index) => Err(EnumeratorError::Sentinel {
            name: E::NAMES[index],
        }),
        None => Err(EnumeratorError::UnknownName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, crate::Enumerator)]
    enum Layer {
        TokenEmbd,
        AttnQ,
        KqSoftMax,
        Node1016GetRows,
        #[enumerator(name = "lm_head")]
        Output,
        #[enumerator(count)]
        Count,
    }

    #[test]
    fn constants_follow_declaration_order() {
        assert_eq!(Layer::COUNT, 5);
        assert_eq!(Layer::ALL.len(), 5);
        assert_eq!(Layer::NAMES.len(), 6);
        assert_eq!(Layer::SENTINEL, Layer::Count);
        for (i, layer) in Layer::iter().enumerate() {
            assert_eq!(layer.value(), i as u64);
            assert!(!layer.is_sentinel());
        }
        assert!(Layer::Count.is_sentinel());
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Layer::TokenEmbd.name(), "token_embd");
        assert_eq!(Layer::AttnQ.name(), "attn_q");
        assert_eq!(Layer::KqSoftMax.name(), "kq_soft_max");
        assert_eq!(Layer::Node1016GetRows.name(), "node_1016_get_rows");
        assert_eq!(Layer::Output.to_string(), "lm_head");
        assert_eq!(Layer::Count.name(), "count");
    }

    #[test]
    fn nth_in_a_constant() {
        const SECOND: Layer = nth::<Layer>(1);
        assert_eq!(SECOND, Layer::AttnQ);
    }

    #[test]
    #[should_panic(expected = "enumerator_out_of_range]: value = 5, count = 5")]
    fn nth_rejects_the_sentinel() {
        let _ = nth::<Layer>(Layer::Count as u64);
    }

    #[test]
    fn runtime_lookups() {
        assert_eq!(from_value::<Layer>(2), Ok(Layer::KqSoftMax));
        assert_eq!(
            from_value::<Layer>(5),
            Err(EnumeratorError::OutOfRange { value: 5, count: 5 })
        );
        assert_eq!("attn_q".parse::<Layer>(), Ok(Layer::AttnQ));
        assert_eq!(
            "count".parse::<Layer>(),
            Err(EnumeratorError::Sentinel { name: "count" })
        );
        assert_eq!(
            "attn_z".parse::<Layer>(),
            Err(EnumeratorError::UnknownName("attn_z".to_string()))
        );
        assert_eq!(Layer::try_from(4), Ok(Layer::Output));
    }

    #[test]
    fn errors_render() {
        let err = from_value::<Layer>(9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "enumerator value 9 is out of range (the set has 5 members)"
        );
    }
}
