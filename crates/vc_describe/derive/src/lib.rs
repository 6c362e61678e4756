//! See [`Describe`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static DESCRIBE_ATTRIBUTE_NAME: &str = "describe";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `Describe`
///
/// Implements `Describe` for a struct with named fields, describing it as a
/// record whose fields are listed in declaration order.
///
/// ```rust, ignore
/// #[derive(Describe)]
/// struct Foo {
///     id: u32,
///     name: String,
/// }
/// ```
///
/// Every described field type must implement `Describe` itself.
///
/// ## Field Attributes
///
/// Use a different name for a field:
///
/// ```rust, ignore
/// #[derive(Describe)]
/// struct Foo {
///     #[describe(rename = "type")]
///     kind: String,
/// }
/// ```
///
/// Leave a field out of the description. It is never written, and it is not
/// a known member when reading:
///
/// ```rust, ignore
/// #[derive(Describe)]
/// struct Foo {
///     id: u32,
///     #[describe(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type Attributes
///
/// The path of the `vc_describe` crate is found by scanning the caller's
/// `Cargo.toml`. It can be given explicitly instead:
///
/// ```rust, ignore
/// #[derive(Describe)]
/// #[describe(crate = "my_reexport::describe")]
/// struct Foo {
///     id: u32,
/// }
/// ```
///
/// ## Rejected Inputs
///
/// Enums, unions, tuple and unit structs, generic structs, structs with no
/// described field, and duplicate field names are compile errors.
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::DescribeStruct::from_input(&ast) {
        Ok(info) => impls::impl_describe(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
