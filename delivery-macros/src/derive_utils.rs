use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Token, parse::Parse, parse::ParseStream};

// 提取非 derive 属性与已有 derive 列表
pub(crate) fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs.iter() {
        if attr.path().is_ident("derive") {
            if let Ok(list) =
                attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            {
                existing.extend(list);
            }
        } else {
            retained.push(attr.clone());
        }
    }
    (retained, existing)
}

// 合并默认与已有 derive（去重，优先保留 required）
pub(crate) fn merge_derives(existing: Vec<syn::Path>, required: Vec<syn::Path>) -> Attribute {
    let mut seen = std::collections::HashSet::<String>::new();
    let mut final_list: Vec<syn::Path> = Vec::new();
    for p in required.into_iter().chain(existing) {
        if seen.insert(derive_key(&p)) {
            final_list.push(p);
        }
    }
    syn::parse_quote!(#[derive(#(#final_list),*)])
}

// 归一化 derive 的 key，避免 Serialize/serde::Serialize 重复
pub(crate) fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let last_ident = last.ident.to_string();
            match last_ident.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{last_ident}"),
                _ => last_ident,
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

// 直接在 attrs 上应用默认派生合并
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (retained, existing) = split_derives(attrs);
    let merged = merge_derives(existing, required);
    *attrs = std::iter::once(merged).chain(retained).collect();
}

/// 宏参数：目前只有 `debug = bool`
pub(crate) struct DeriveDebugConfig {
    pub(crate) derive_debug: Option<bool>,
}

impl DeriveDebugConfig {
    pub(crate) fn derive_debug(&self) -> bool {
        self.derive_debug.unwrap_or(true)
    }
}

impl Parse for DeriveDebugConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut derive_debug: Option<bool> = None;
        let pairs: Punctuated<DebugElem, Token![,]> = Punctuated::parse_terminated(input)?;

        for DebugElem(b) in pairs {
            if derive_debug.is_some() {
                return Err(syn::Error::new(
                    proc_macro2::Span::call_site(),
                    "duplicate key 'debug' in attribute",
                ));
            }
            derive_debug = Some(b);
        }
        Ok(Self { derive_debug })
    }
}

struct DebugElem(bool);

impl Parse for DebugElem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key != "debug" {
            return Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'debug'",
            ));
        }
        let _eq: Token![=] = input.parse()?;
        let expr: syn::Expr = input.parse()?;
        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Bool(b),
                ..
            }) => Ok(Self(b.value())),
            other => Err(syn::Error::new(
                other.span(),
                "expected boolean literal for 'debug'",
            )),
        }
    }
}
