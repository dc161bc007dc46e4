use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    bracketed, parenthesized, Attribute, Expr, ExprLit, GenericArgument, Ident, Lit, LitInt, Path,
    PathArguments, Token, Type, Visibility,
};

/// Every container declared in one `cafberiht!` invocation.
pub struct Definitions(Vec<Definition>);

/// `[attrs] vis struct Name: Family<Enum> = layout [as Aggregator];`
struct Definition {
    attrs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    family: Path,
    enumerator: Type,
    /// One const argument per slot, in layout order.
    keys: Vec<TokenStream>,
    aggregator: Option<Type>,
}

impl Parse for Definitions {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut definitions = Vec::new();
        while !input.is_empty() {
            definitions.push(input.parse()?);
        }
        Ok(Definitions(definitions))
    }
}

impl Parse for Definition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let ident: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let (family, enumerator) = parse_family(input)?;
        input.parse::<Token![=]>()?;
        let keys = parse_layout(input)?;

        let aggregator = if input.peek(Token![as]) {
            input.parse::<Token![as]>()?;
            Some(input.parse::<Type>()?)
        } else {
            None
        };
        input.parse::<Token![;]>()?;

        Ok(Definition {
            attrs,
            vis,
            ident,
            family,
            enumerator,
            keys,
            aggregator,
        })
    }
}

/// Splits `path::Family<Enum>` into `path::Family` and `Enum`.
fn parse_family(input: ParseStream) -> syn::Result<(Path, Type)> {
    let mut family: Path = input.parse()?;

    let last = family
        .segments
        .last_mut()
        .ok_or_else(|| input.error("expected an element family"))?;

    let arguments = std::mem::replace(&mut last.arguments, PathArguments::None);
    let enumerator = match arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => {
            match args.args.into_iter().next() {
                Some(GenericArgument::Type(ty)) => Some(ty),
                _ => None,
            }
        }
        _ => None,
    };

    match enumerator {
        Some(enumerator) => Ok((family, enumerator)),
        None => Err(syn::Error::new_spanned(
            &family,
            "expected `Family<Enumerator>`, e.g. `CoreInterface<CoreType>`",
        )),
    }
}

/// `[e0, e1, ...]` or `first(N)`.
fn parse_layout(input: ParseStream) -> syn::Result<Vec<TokenStream>> {
    if input.peek(syn::token::Bracket) {
        let content;
        bracketed!(content in input);
        let entries = Punctuated::<Expr, Token![,]>::parse_terminated(&content)?;
        return entries.iter().map(key_arg).collect();
    }

    let keyword: Ident = input.parse()?;
    if keyword != "first" {
        return Err(syn::Error::new(
            keyword.span(),
            "expected a layout: `[...]` or `first(N)`",
        ));
    }

    let content;
    parenthesized!(content in input);
    let width: LitInt = content.parse()?;
    let width = width.base10_parse::<u64>()?;

    Ok((0..width)
        .map(|value| Literal::u64_unsuffixed(value).into_token_stream())
        .collect())
}

/// A layout entry as a `u64` const argument.
fn key_arg(entry: &Expr) -> syn::Result<TokenStream> {
    match entry {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => {
            let value = lit.base10_parse::<u64>()?;
            Ok(Literal::u64_unsuffixed(value).into_token_stream())
        }
        Expr::Path(_) => Ok(quote! { { #entry as u64 } }),
        _ => Ok(quote! { { (#entry) as u64 } }),
    }
}

pub fn expand(input: &Definitions) -> TokenStream {
    input.0.iter().map(expand_definition).collect()
}

fn expand_definition(definition: &Definition) -> TokenStream {
    let Definition {
        attrs,
        vis,
        ident,
        family,
        enumerator,
        keys,
        ..
    } = definition;

    let size = keys.len();
    let fields: Vec<Ident> = (0..size).map(|i| format_ident!("slot_{}", i)).collect();
    let slots: Vec<Literal> = (0..size).map(Literal::usize_unsuffixed).collect();
    let elements: Vec<TokenStream> = keys.iter().map(|key| quote! { #family<#key> }).collect();

    let checks = expand_checks(definition, &elements);

    let slot_impls = fields
        .iter()
        .zip(&slots)
        .zip(keys.iter().zip(&elements))
        .map(|((field, slot), (key, element))| {
            quote! {
                impl ::cafberiht::Locate<::cafberiht::Tag<#key>, ::cafberiht::Slot<#slot>> for #ident {
                    type Output = #element;

                    #[inline(always)]
                    fn locate(&self) -> &#element {
                        &self.#field[::cafberiht::Tag::<#key>]
                    }

                    #[inline(always)]
                    fn locate_mut(&mut self) -> &mut #element {
                        &mut self.#field[::cafberiht::Tag::<#key>]
                    }
                }

                impl ::cafberiht::At<#slot> for #ident {
                    type Output = #element;

                    #[inline(always)]
                    fn at(&self) -> &#element {
                        &self.#field
                    }

                    #[inline(always)]
                    fn at_mut(&mut self) -> &mut #element {
                        &mut self.#field
                    }
                }

                impl ::cafberiht::Contains<#element, ::cafberiht::Slot<#slot>> for #ident {
                    #[inline(always)]
                    fn element(&self) -> &#element {
                        &self.#field
                    }

                    #[inline(always)]
                    fn element_mut(&mut self) -> &mut #element {
                        &mut self.#field
                    }
                }
            }
        });

    let visit_bounds = if size == 0 {
        TokenStream::new()
    } else {
        quote! { where #(V: ::cafberiht::Visitor<#elements, A>,)* }
    };
    let inspect_bounds = if size == 0 {
        TokenStream::new()
    } else {
        quote! { where #(V: ::cafberiht::Inspector<#elements, A>,)* }
    };

    quote! {
        #(#attrs)*
        #vis struct #ident {
            #(#fields: #elements,)*
        }

        impl ::core::default::Default for #ident {
            #[inline]
            fn default() -> Self {
                Self {
                    #(#fields: ::core::default::Default::default(),)*
                }
            }
        }

        #[allow(dead_code)]
        impl #ident {
            /// Number of elements.
            pub const SIZE: usize = #size;
            /// Position → enumerator value.
            pub const INDEX_MAP: [u64; #size] = [#(#keys),*];

            pub fn new() -> Self {
                ::core::default::Default::default()
            }

            /// Position of the enumerator value `E`, or `NOT_FOUND`.
            pub const fn position_of<const E: u64>() -> u64 {
                ::cafberiht::aggregator::position_in(&Self::INDEX_MAP, E)
            }

            pub const fn position_of_value(value: u64) -> u64 {
                ::cafberiht::aggregator::position_in(&Self::INDEX_MAP, value)
            }
        }

        #checks

        impl ::cafberiht::Cafberiht for #ident {
            type Enum = #enumerator;

            const SIZE: usize = #size;
            const INDEX_MAP: &'static [u64] = &#ident::INDEX_MAP;
        }

        #(#slot_impls)*

        impl<V, A: ?Sized> ::cafberiht::VisitAll<V, A> for #ident #visit_bounds {
            #[inline(always)]
            #[allow(unused_variables)]
            fn visit_all(&mut self, args: &mut A) {
                #(
                    if const { <V as ::cafberiht::Visitor<#elements, A>>::ADMIT } {
                        <V as ::cafberiht::Visitor<#elements, A>>::apply(&mut self.#fields, args);
                    }
                )*
            }
        }

        impl<V, A: ?Sized> ::cafberiht::InspectAll<V, A> for #ident #inspect_bounds {
            #[inline(always)]
            #[allow(unused_variables)]
            fn inspect_all(&self, args: &mut A) {
                #(
                    if const { <V as ::cafberiht::Inspector<#elements, A>>::ADMIT } {
                        <V as ::cafberiht::Inspector<#elements, A>>::inspect(&self.#fields, args);
                    }
                )*
            }
        }
    }
}

/// Definition-site checks, evaluated whether or not the container is used.
fn expand_checks(definition: &Definition, elements: &[TokenStream]) -> TokenStream {
    let Definition {
        ident,
        enumerator,
        aggregator,
        ..
    } = definition;

    let family_check = elements.first().map(|element| {
        quote! {
            const _: fn(<#element as ::cafberiht::Element>::Enum) -> #enumerator = |e| e;
        }
    });

    let aggregator_check = aggregator.as_ref().map(|aggregator| {
        quote! {
            const _: fn(<#aggregator as ::cafberiht::Aggregator>::Enum) -> #enumerator = |e| e;

            const _: () = ::cafberiht::diag::require(
                ::cafberiht::aggregator::same_layout(
                    &#ident::INDEX_MAP,
                    <#aggregator as ::cafberiht::Aggregator>::VALUES,
                ),
                ::cafberiht::Diagnostic::new(::cafberiht::ErrorKind::AggregatorLayoutMismatch)
                    .with("size", #ident::SIZE as u64)
                    .with("length", <#aggregator as ::cafberiht::Aggregator>::LENGTH as u64),
            );
        }
    });

    quote! {
        const _: () = ::cafberiht::diag::require(
            #ident::SIZE != 0,
            ::cafberiht::Diagnostic::new(::cafberiht::ErrorKind::EmptyCafberihtBasesPack)
                .with("size", #ident::SIZE as u64),
        );

        const _: () = ::cafberiht::aggregator::validate::<#enumerator>(&#ident::INDEX_MAP);

        #family_check
        #aggregator_check
    }
}
