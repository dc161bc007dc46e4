//! Static diagnostic channel.
//!
//! Every contract of a container is checked before the program runs. A check
//! is a [`Diagnostic`] built in a constant context: the error kind plus any
//! number of named `u64` values, rendered into a fixed buffer. When the
//! condition passed to [`require`] does not hold the diagnostic is raised,
//! which inside a constant is a build error whose text is the rendered
//! diagnostic:
//!
//! ```text
//! error[E0080]: evaluation panicked: cafberiht error[get_core_by_index_oob]: index = 4, size = 4
//! ```
//!
//! Checks that depend on a missing trait impl (an unknown tag, a position past
//! the end, a foreign element type) use the same kind names through
//! `#[diagnostic::on_unimplemented]` on the lookup traits.
//!
//! A container with no elements does not build:
//!
//! ```compile_fail,E0080
//! # use cafberiht::{cafberiht, Element, Enumerator};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Load, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Kernel<const E: u64>;
//! cafberiht! {
//!     struct Nothing: Kernel<Op> = [];
//! }
//! ```
//!
//! Neither does a layout naming something outside the enumerator set:
//!
//! ```compile_fail,E0080
//! # use cafberiht::{cafberiht, Element, Enumerator};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
//! # enum Op { Load, Store, #[enumerator(count)] Count }
//! # #[derive(Default, Element)]
//! # #[element(enumerator = Op)]
//! # struct Kernel<const E: u64>;
//! cafberiht! {
//!     struct TooWide: Kernel<Op> = first(3);
//! }
//! ```

use std::fmt;

/// Capacity of the rendered text. Longer diagnostics are truncated.
pub const CAPACITY: usize = 192;

const PREFIX: &str = "cafberiht error[";

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// The closed set of compile-time failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Positional access at or past the container size.
    GetCoreByIndexOob,
    /// A type was treated as an element of a container that does not hold it.
    InvalidBaseCast,
    /// A container was declared with no elements.
    EmptyCafberihtBasesPack,
    /// An enumerator value at or past the `count` sentinel.
    EnumeratorOutOfRange,
    /// A container layout disagrees with the aggregator it claims to follow.
    AggregatorLayoutMismatch,
}

impl ErrorKind {
    /// The spelling used in diagnostic text.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::GetCoreByIndexOob => "get_core_by_index_oob",
            ErrorKind::InvalidBaseCast => "invalid_base_cast",
            ErrorKind::EmptyCafberihtBasesPack => "empty_cafberiht_bases_pack",
            ErrorKind::EnumeratorOutOfRange => "enumerator_out_of_range",
            ErrorKind::AggregatorLayoutMismatch => "aggregator_layout_mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A rendered compile-time diagnostic.
///
/// Built by value so every step is usable in a constant:
///
/// ```
/// use cafberiht::{Diagnostic, ErrorKind};
///
/// const OOB: Diagnostic = Diagnostic::new(ErrorKind::GetCoreByIndexOob)
///     .with("index", 10)
///     .with("size", 10);
///
/// assert_eq!(
///     OOB.as_str(),
///     "cafberiht error[get_core_by_index_oob]: index = 10, size = 10"
/// );
/// ```
#[derive(Clone, Copy)]
pub struct Diagnostic {
    kind: ErrorKind,
    buf: [u8; CAPACITY],
    len: usize,
    values: usize,
}

impl Diagnostic {
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            buf: [0; CAPACITY],
            len: 0,
            values: 0,
        }
        .push_str(PREFIX)
        .push_str(kind.name())
        .push_str("]")
    }

    /// Appends a named value.
    pub const fn with(self, name: &str, value: u64) -> Self {
        let separator = if self.values == 0 { ": " } else { ", " };
        let mut next = self.push_str(separator).push_str(name).push_str(" = ").push_u64(value);
        next.values += 1;
        next
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Number of values attached with [`Diagnostic::with`].
    #[inline]
    pub const fn value_count(&self) -> usize {
        self.values
    }

    pub const fn as_str(&self) -> &str {
        let (text, _) = self.buf.split_at(self.len);
        match std::str::from_utf8(text) {
            Ok(text) => text,
            // Truncation can split a multi-byte name.
            Err(_) => PREFIX,
        }
    }

    /// Stops evaluation with the rendered text.
    ///
    /// Inside a constant this is a build error.
    #[track_caller]
    pub const fn raise(&self) -> ! {
        panic!("{}", self.as_str())
    }

    const fn push_str(mut self, s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() && self.len < CAPACITY {
            self.buf[self.len] = bytes[i];
            self.len += 1;
            i += 1;
        }
        self
    }

    const fn push_u64(mut self, value: u64) -> Self {
        let mut digits = [0u8; 20];
        let mut count = 0;
        let mut rest = value;
        loop {
            digits[count] = b'0' + (rest % 10) as u8;
            count += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        while count > 0 && self.len < CAPACITY {
            count -= 1;
            self.buf[self.len] = digits[count];
            self.len += 1;
        }
        self
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("kind", &self.kind)
            .field("text", &self.as_str())
            .finish()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.as_str() == other.as_str()
    }
}

impl Eq for Diagnostic {}

// ---------------------------------------------------------------------------
// Support Functions
// ---------------------------------------------------------------------------

/// Raises `diagnostic` unless `holds`.
#[track_caller]
pub const fn require(holds: bool, diagnostic: Diagnostic) {
    if !holds {
        diagnostic.raise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_kind_without_values() {
        let diag = Diagnostic::new(ErrorKind::EmptyCafberihtBasesPack);
        assert_eq!(diag.as_str(), "cafberiht error[empty_cafberiht_bases_pack]");
        assert_eq!(diag.value_count(), 0);
        assert_eq!(diag.kind(), ErrorKind::EmptyCafberihtBasesPack);
    }

    #[test]
    fn renders_values_in_order() {
        let diag = Diagnostic::new(ErrorKind::EnumeratorOutOfRange)
            .with("position", 3)
            .with("value", 0)
            .with("count", u64::MAX);
        assert_eq!(
            diag.to_string(),
            "cafberiht error[enumerator_out_of_range]: position = 3, value = 0, count = 18446744073709551615"
        );
        assert_eq!(diag.value_count(), 3);
    }

    #[test]
    fn built_in_a_constant() {
        const DIAG: Diagnostic = Diagnostic::new(ErrorKind::InvalidBaseCast).with("value", 42);
        assert!(DIAG.as_str().contains("invalid_base_cast"));
        assert!(DIAG.as_str().ends_with("value = 42"));
    }

    #[test]
    fn long_text_is_truncated() {
        let mut diag = Diagnostic::new(ErrorKind::AggregatorLayoutMismatch);
        for i in 0..64 {
            diag = diag.with("position", i);
        }
        assert_eq!(diag.as_str().len(), CAPACITY);
        assert!(diag.as_str().starts_with("cafberiht error[aggregator_layout_mismatch]: "));
    }

    #[test]
    fn require_passes_when_holding() {
        const _: () = require(true, Diagnostic::new(ErrorKind::GetCoreByIndexOob));
        require(1 < 2, Diagnostic::new(ErrorKind::GetCoreByIndexOob).with("index", 1));
    }

    #[test]
    #[should_panic(expected = "cafberiht error[get_core_by_index_oob]: index = 8, size = 8")]
    fn require_raises_when_failing() {
        let index = 8;
        require(
            index < 8,
            Diagnostic::new(ErrorKind::GetCoreByIndexOob)
                .with("index", index)
                .with("size", 8),
        );
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ErrorKind::GetCoreByIndexOob.to_string(), "get_core_by_index_oob");
        assert_eq!(ErrorKind::InvalidBaseCast.name(), "invalid_base_cast");
        assert_eq!(
            ErrorKind::EmptyCafberihtBasesPack.name(),
            "empty_cafberiht_bases_pack"
        );
    }
}
