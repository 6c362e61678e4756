//! The path of the `vc_describe` crate as seen from the derive's caller.

/// Get the correct access path to the `vc_describe` crate.
///
/// 1. For crates that depend on `vc_describe`, `::vc_describe` is returned.
/// 2. For crates that depend on `vc_desc`, `::vc_desc::describe` is returned.
/// 3. For other situations, `::vc_describe` is returned, but this may be incorrect.
///
/// This scans the caller's `Cargo.toml`, call it once per derive.
pub(crate) fn vc_describe() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_describe"))
}
