use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Variant};

struct Member {
    ident: Ident,
    name: String,
}

#[derive(Default)]
struct VariantAttrs {
    count: bool,
    name: Option<LitStr>,
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Enumerator can only be derived for enums",
            ))
        }
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "enumerator sets cannot be generic",
        ));
    }

    let total = data.variants.len();
    let mut members = Vec::with_capacity(total);
    let mut sentinel = None;

    for (index, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.fields,
                "enumerator variants cannot carry fields",
            ));
        }
        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                discriminant,
                "enumerators take their identity from declaration order; remove the discriminant",
            ));
        }

        let attrs = parse_variant_attrs(variant)?;
        let member = Member {
            ident: variant.ident.clone(),
            name: attrs
                .name
                .map(|name| name.value())
                .unwrap_or_else(|| snake_case(&variant.ident.to_string())),
        };

        if attrs.count {
            if index + 1 != total {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    "the `count` sentinel must be the last variant",
                ));
            }
            sentinel = Some(member);
        } else {
            members.push(member);
        }
    }

    let sentinel = sentinel.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "missing `count` sentinel; mark the last variant with `#[enumerator(count)]`",
        )
    })?;

    for (i, member) in members.iter().enumerate() {
        if members[..i].iter().any(|other| other.name == member.name) || member.name == sentinel.name
        {
            return Err(syn::Error::new_spanned(
                &member.ident,
                format!("duplicate enumerator name `{}`", member.name),
            ));
        }
    }

    let count = members.len() as u64;
    let idents = members.iter().map(|m| &m.ident);
    let names = members.iter().map(|m| &m.name);
    let sentinel_ident = &sentinel.ident;
    let sentinel_name = &sentinel.name;

    Ok(quote! {
        impl ::cafberiht::Enumerator for #name {
            const COUNT: u64 = #count;
            const ALL: &'static [Self] = &[#(Self::#idents),*];
            const NAMES: &'static [&'static str] = &[#(#names,)* #sentinel_name];
            const SENTINEL: Self = Self::#sentinel_ident;

            #[inline]
            fn value(self) -> u64 {
                self as u64
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(::cafberiht::Enumerator::name(*self))
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = ::cafberiht::EnumeratorError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::cafberiht::enumerator::from_name(s)
            }
        }

        impl ::core::convert::TryFrom<u64> for #name {
            type Error = ::cafberiht::EnumeratorError;

            fn try_from(value: u64) -> ::core::result::Result<Self, Self::Error> {
                ::cafberiht::enumerator::from_value(value)
            }
        }
    })
}

fn parse_variant_attrs(variant: &Variant) -> syn::Result<VariantAttrs> {
    let mut attrs = VariantAttrs::default();

    for attr in &variant.attrs {
        if !attr.path().is_ident("enumerator") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("count") {
                attrs.count = true;
                Ok(())
            } else if meta.path.is_ident("name") {
                attrs.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `count` or `name = \"...\"`"))
            }
        })?;
    }

    Ok(attrs)
}

/// `KqSoftMax` → `kq_soft_max`, `KCacheView` → `k_cache_view`,
/// `Node1016GetRows` → `node_1016_get_rows`.
pub fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = if c.is_uppercase() {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
            } else if c.is_ascii_digit() {
                prev.is_alphabetic()
            } else {
                false
            };
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
