mod container;
mod element;
mod enumerator;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

// ============================================================================
// #[derive(Enumerator)]
// ============================================================================

/// Derive macro for the `Enumerator` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerator)]
/// enum CoreType {
///     AttnQ,
///     AttnK,
///     #[enumerator(name = "kq_soft_max")]
///     KqSoftMax,
///     #[enumerator(count)]
///     Count,
/// }
/// ```
///
/// - Variants must be fieldless and must not carry explicit discriminants;
///   their identity is their declaration index.
/// - The last variant must be marked `#[enumerator(count)]`. It is the
///   sentinel and is not a member of the set.
/// - `#[enumerator(name = "...")]` overrides the default snake_case name.
///
/// Also implements `Display`, `FromStr` and `TryFrom<u64>`.
#[proc_macro_derive(Enumerator, attributes(enumerator))]
pub fn derive_enumerator(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enumerator::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

// ============================================================================
// #[derive(Element)]
// ============================================================================

/// Derive macro for the `Element` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Debug, Default, Element)]
/// #[element(enumerator = CoreType)]
/// struct CoreInterface<const E: u64> {
///     kernel_iteration_count: u64,
/// }
/// ```
///
/// The struct must have exactly one `const _: u64` parameter, the enumerator
/// value it is keyed on. Besides `Element`, the derive implements
/// `Index<Tag<E>>` and `IndexMut<Tag<E>>` returning the element itself.
#[proc_macro_derive(Element, attributes(element))]
pub fn derive_element(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    element::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

// ============================================================================
// cafberiht! { ... }
// ============================================================================

/// Declares containers.
///
/// # Usage
///
/// ```ignore
/// cafberiht! {
///     /// Every attention projection, in graph order.
///     #[derive(Debug)]
///     pub struct Attention: CoreInterface<CoreType> = [
///         CoreType::AttnQ,
///         CoreType::AttnK,
///         CoreType::AttnV,
///     ];
///
///     pub struct Default10: CoreInterface<CoreType> = first(10) as CoreAggregator;
/// }
/// ```
///
/// Layout entries are enumerator paths or integer literals (any constant
/// expression castable to `u64` is accepted). `first(N)` is the first `N`
/// enumerators. The optional `as Aggregator` clause checks at compile time
/// that the layout equals the aggregator's `VALUES`.
#[proc_macro]
pub fn cafberiht(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as container::Definitions);
    TokenStream::from(container::expand(&input))
}
