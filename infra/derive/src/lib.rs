#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the strata crates.
//!
//! ## Usage
//! Every crate in the workspace declares its error enum through [`macro@strata_error`]:
//! ```toml
//! [dependencies]
//! strata-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, ErrorName>`.
/// * **Conversions**: Implements `From<T>` (and `.context()` on `Result<_, T>`) for variants made
///   of exactly a `source` and a `context` field, provided the source type appears in no other
///   variant. Source types shared by several variants stay unconverted, so the caller has to pick
///   the variant explicitly.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   with a `message` field exists.
/// * **Kind**: A `kind(&self) -> &'static str` accessor returning the variant name, meant for
///   structured log fields.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants must use named fields; tuple and unit variants are rejected.
/// 3. Variants with a `source` field must also declare `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[strata_derive::strata_error]
/// pub enum DriveError {
///     #[error("List failed at {path}{}: {source}", format_context(.context))]
///     List { path: Cow<'static, str>, source: StoreError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// assert_eq!(DriveError::from("boom").kind(), "Internal");
/// ```
#[proc_macro_attribute]
pub fn strata_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
