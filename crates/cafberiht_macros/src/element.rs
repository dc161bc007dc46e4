use proc_macro2::TokenStream;
use quote::quote;
use syn::{ConstParam, Data, DeriveInput, Path, Type};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new_spanned(
            name,
            "Element can only be derived for structs",
        ));
    }

    let enumerator = parse_enumerator_attr(input)?;
    let key = key_param(input)?;
    let key_ident = &key.ident;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::cafberiht::Element for #name #ty_generics #where_clause {
            type Enum = #enumerator;

            const ENUMERATOR_VALUE: u64 = #key_ident;
            const ENUMERATOR: #enumerator = ::cafberiht::enumerator::nth::<#enumerator>(#key_ident);
        }

        impl #impl_generics ::core::ops::Index<::cafberiht::Tag<#key_ident>> for #name #ty_generics #where_clause {
            type Output = Self;

            #[inline(always)]
            fn index(&self, _: ::cafberiht::Tag<#key_ident>) -> &Self {
                self
            }
        }

        impl #impl_generics ::core::ops::IndexMut<::cafberiht::Tag<#key_ident>> for #name #ty_generics #where_clause {
            #[inline(always)]
            fn index_mut(&mut self, _: ::cafberiht::Tag<#key_ident>) -> &mut Self {
                self
            }
        }
    })
}

/// Reads `#[element(enumerator = Path)]`.
fn parse_enumerator_attr(input: &DeriveInput) -> syn::Result<Path> {
    let mut enumerator = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("element") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("enumerator") {
                enumerator = Some(meta.value()?.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("expected `enumerator = Path`"))
            }
        })?;
    }

    enumerator.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "missing `#[element(enumerator = ...)]` attribute",
        )
    })
}

/// The single `const _: u64` parameter the element is keyed on.
fn key_param(input: &DeriveInput) -> syn::Result<&ConstParam> {
    let params: Vec<&ConstParam> = input.generics.const_params().collect();

    let key = match params.as_slice() {
        [key] => *key,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "an element needs exactly one `const _: u64` parameter",
            ))
        }
    };

    match &key.ty {
        Type::Path(ty) if ty.qself.is_none() && ty.path.is_ident("u64") => Ok(key),
        other => Err(syn::Error::new_spanned(
            other,
            "the element key must be a `u64`",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_keyed_impls() {
        let input: DeriveInput = syn::parse_quote! {
            #[element(enumerator = ops::CoreType)]
            struct CoreInterface<const E: u64> {
                kernel_iteration_count: u64,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("type Enum = ops :: CoreType"));
        assert!(tokens.contains(":: cafberiht :: enumerator :: nth :: < ops :: CoreType > (E)"));
        assert!(tokens.contains("Index < :: cafberiht :: Tag < E >"));
        assert!(tokens.contains("IndexMut < :: cafberiht :: Tag < E >"));
    }

    #[test]
    fn keeps_other_generics() {
        let input: DeriveInput = syn::parse_quote! {
            #[element(enumerator = Op)]
            struct Buffer<T: Default + 'static, const E: u64> {
                data: Vec<T>,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("for Buffer < T , E >"));
    }

    fn error_of(input: DeriveInput) -> String {
        expand(&input).unwrap_err().to_string()
    }

    #[test]
    fn rejects_misuse() {
        assert!(error_of(syn::parse_quote! {
            #[element(enumerator = Op)]
            enum Core { A }
        })
        .contains("only be derived for structs"));
        assert!(error_of(syn::parse_quote! {
            struct Core<const E: u64>;
        })
        .contains("missing `#[element(enumerator = ...)]`"));
        assert!(error_of(syn::parse_quote! {
            #[element(enumerator = Op)]
            struct Core;
        })
        .contains("exactly one `const _: u64`"));
        assert!(error_of(syn::parse_quote! {
            #[element(enumerator = Op)]
            struct Core<const A: u64, const B: u64>;
        })
        .contains("exactly one `const _: u64`"));
        assert!(error_of(syn::parse_quote! {
            #[element(enumerator = Op)]
            struct Core<const E: usize>;
        })
        .contains("must be a `u64`"));
    }
}
