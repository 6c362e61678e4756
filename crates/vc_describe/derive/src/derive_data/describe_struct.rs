use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Path, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// DescribedField

/// A field that takes part in the description.
pub(crate) struct DescribedField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The name used in the field list.
    pub name: String,
    pub name_span: Span,
}

// -----------------------------------------------------------------------------
// DescribeStruct

/// A validated `#[derive(Describe)]` input.
pub(crate) struct DescribeStruct<'a> {
    ident: &'a Ident,
    crate_path: Path,
    fields: Vec<DescribedField<'a>>,
}

impl<'a> DescribeStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let type_attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Describe` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Describe` cannot be derived for unions",
                ));
            }
        };

        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Describe` can only be derived for structs with named fields",
            ));
        };

        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Describe` cannot be derived for generic structs",
            ));
        }

        let mut fields = Vec::with_capacity(named.named.len());
        let mut seen = BTreeMap::new();

        for field in &named.named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip.is_some() {
                continue;
            }

            // named fields always have an ident
            let Some(ident) = &field.ident else {
                continue;
            };

            let (name, name_span) = match &attrs.rename {
                Some(lit) => (lit.value(), lit.span()),
                None => (ident.to_string(), ident.span()),
            };

            if let Some(first) = seen.insert(name.clone(), name_span) {
                let mut err = syn::Error::new(name_span, format!("duplicate field name `{name}`"));
                err.combine(syn::Error::new(first, "first used here"));
                return Err(err);
            }

            fields.push(DescribedField {
                ident,
                ty: &field.ty,
                name,
                name_span,
            });
        }

        if fields.is_empty() {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Describe` requires at least one described field",
            ));
        }

        Ok(Self {
            ident: &input.ident,
            crate_path: type_attrs.crate_path.unwrap_or_else(crate::path::vc_describe),
            fields,
        })
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn crate_path(&self) -> &Path {
        &self.crate_path
    }

    #[inline]
    pub fn fields(&self) -> &[DescribedField<'a>] {
        &self.fields
    }
}
