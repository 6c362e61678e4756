use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

use crate::DESCRIBE_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[describe(...)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[describe(crate = "path")]`
    pub crate_path: Option<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in describe_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    if result.crate_path.is_some() {
                        return Err(meta.error("duplicate `crate` attribute"));
                    }
                    result.crate_path = Some(meta.value()?.parse::<LitStr>()?.parse()?);
                    Ok(())
                } else {
                    Err(unknown(&meta, "`crate`"))
                }
            })?;
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[describe(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[describe(rename = "name")]`
    pub rename: Option<LitStr>,
    /// `#[describe(skip)]`
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in describe_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if result.rename.is_some() {
                        return Err(meta.error("duplicate `rename` attribute"));
                    }
                    result.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    if result.skip.is_some() {
                        return Err(meta.error("duplicate `skip` attribute"));
                    }
                    result.skip = Some(meta.path.span());
                } else {
                    return Err(unknown(&meta, "`rename` or `skip`"));
                }
                Ok(())
            })?;
        }

        if let (Some(rename), Some(_)) = (&result.rename, result.skip) {
            return Err(syn::Error::new(
                rename.span(),
                "`rename` has no effect on a skipped field",
            ));
        }

        Ok(result)
    }
}

fn describe_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(DESCRIBE_ATTRIBUTE_NAME))
}

fn unknown(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("?"), ToString::to_string);
    meta.error(format!("unknown attribute `{name}`, expected {expected}"))
}
