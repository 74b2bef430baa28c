use crate::derive_utils::{DeriveDebugConfig, apply_derives};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

/// #[entity_id] 宏实现
/// 仅支持 `struct Xxx(Uuid);`，包装类型的零值（nil）视为“未设置”的标识
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as DeriveDebugConfig);
    let input = parse_macro_input!(item as Item);

    let st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => {}
        syn::Fields::Unnamed(f) => {
            return syn::Error::new(
                f.span(),
                "#[entity_id] requires a tuple struct with exactly one field",
            )
            .to_compile_error()
            .into();
        }
        _ => {
            return syn::Error::new(
                st.span(),
                "#[entity_id] supports only tuple struct, e.g., struct OrderId(Uuid);",
            )
            .to_compile_error()
            .into();
        }
    }

    if !st.generics.params.is_empty() {
        return syn::Error::new(st.generics.span(), "#[entity_id] does not support generics")
            .to_compile_error()
            .into();
    }

    let mut st_out = st.clone();
    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Copy),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
        syn::parse_quote!(PartialOrd),
        syn::parse_quote!(Ord),
        syn::parse_quote!(::serde::Serialize),
        syn::parse_quote!(::serde::Deserialize),
    ];
    if cfg.derive_debug() {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st_out.attrs, required);
    st_out.attrs.push(syn::parse_quote!(#[serde(transparent)]));

    let ident = &st_out.ident;

    let out = quote! {
        #st_out

        impl #ident {
            pub const fn new(value: ::uuid::Uuid) -> Self { Self(value) }

            /// 生成新的随机标识
            pub fn generate() -> Self { Self(::uuid::Uuid::new_v4()) }

            pub const fn nil() -> Self { Self(::uuid::Uuid::nil()) }

            pub fn is_nil(&self) -> bool { self.0.is_nil() }

            pub const fn as_uuid(&self) -> &::uuid::Uuid { &self.0 }
        }

        impl ::std::str::FromStr for #ident {
            type Err = ::uuid::Error;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                ::std::result::Result::Ok(Self(s.parse()?))
            }
        }

        impl ::std::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::convert::AsRef<::uuid::Uuid> for #ident {
            fn as_ref(&self) -> &::uuid::Uuid { &self.0 }
        }

        impl ::core::convert::From<#ident> for ::uuid::Uuid {
            fn from(value: #ident) -> Self { value.0 }
        }

        impl ::core::convert::From<::uuid::Uuid> for #ident {
            fn from(value: ::uuid::Uuid) -> Self { Self(value) }
        }
    };

    TokenStream::from(out)
}
