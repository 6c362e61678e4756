use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use crate::derive_data::DescribeStruct;

/// Implement `Describe` for a struct, as a record of its described fields.
pub(crate) fn impl_describe(info: &DescribeStruct) -> TokenStream {
    let vc_describe = info.crate_path();
    let ident = info.ident();

    let entries = info.fields().iter().map(|field| {
        let name = LitStr::new(&field.name, field.name_span);
        let member = field.ident;
        let ty = field.ty;
        quote! { #name => #member: #ty }
    });

    quote! {
        impl #vc_describe::Describe for #ident {
            fn description() -> #vc_describe::Description<Self> {
                #vc_describe::Description::Record(
                    #vc_describe::field_list!(#ident; #(#entries),*)
                )
            }
        }
    }
}
