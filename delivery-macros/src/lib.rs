//! 配送领域的过程宏
//!
//! - `#[entity_id]`：为 `struct XxxId(Uuid);` 形式的聚合/实体标识生成常用实现；
//! - `#[value_object]`：为值对象补齐以值相等为准所需的派生。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity_id;
mod value_object;

/// 实体 ID 宏
///
/// 仅支持包裹 `Uuid` 的单字段 `tuple struct`，例如 `struct CourierId(Uuid);`。
/// 自动生成：
/// - 派生：Clone, Copy, (Debug 可控), PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize
/// - `new(value)`、`generate()`（v4 随机）、`nil()`、`is_nil()`
/// - `Display`、`FromStr`、`AsRef<Uuid>` 以及与 `Uuid` 的双向 `From`
///
/// 参数：`#[entity_id(debug = true|false)]`，默认 true
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
///
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Clone, (Debug 可控), PartialEq, Eq, Hash, Serialize
/// - 不派生 `Default`：值对象只能经由校验构造
/// - 参数：`#[value_object(debug = true|false)]`，默认 true
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
