use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, Ident, PathArguments, Type, parse_macro_input,
};

pub fn bindable_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;

    let variants = match &input.data {
        Data::Enum(e) => &e.variants,
        _ => {
            return Error::new_spanned(
                &input.ident,
                "`#[derive(Bindable)]` can only be applied to enums",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut all_impls = Vec::new();

    for variant in variants {
        let var_ident = &variant.ident;

        if variant.attrs.iter().any(is_bindable_ignore) {
            continue;
        }

        // unit variants such as `Null` have nothing to convert from
        if matches!(variant.fields, Fields::Unit) {
            continue;
        }

        // keep #[cfg(...)] so feature gated variants only get impls when enabled
        let cfg_attrs: Vec<&Attribute> = variant
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect();

        let inner_ty = match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
            _ => {
                return Error::new_spanned(
                    &variant.ident,
                    "each bindable variant must hold a single unnamed field, e.g. `Text(String)`",
                )
                .to_compile_error()
                .into();
            }
        };

        if is_option(inner_ty) {
            return Error::new_spanned(
                inner_ty,
                "optional values are handled by the unit `Null` variant, use the inner type here",
            )
            .to_compile_error()
            .into();
        }

        all_impls.push(quote! {
            #(#cfg_attrs)*
            impl From<#inner_ty> for #enum_name {
                fn from(value: #inner_ty) -> Self {
                    #enum_name::#var_ident(value)
                }
            }

            #(#cfg_attrs)*
            impl crate::IntoBind for #inner_ty {
                fn into_bind(self) -> #enum_name {
                    #enum_name::#var_ident(self)
                }
            }
        });
    }

    all_impls.push(quote! {
        impl crate::IntoBind for #enum_name {
            fn into_bind(self) -> #enum_name {
                self
            }
        }
    });

    quote! {
        #(#all_impls)*
    }
    .into()
}

/// Returns true if the attribute is exactly `#[bindable(ignore)]`.
fn is_bindable_ignore(attr: &Attribute) -> bool {
    if !attr.path().is_ident("bindable") {
        return false;
    }
    matches!(attr.parse_args::<Ident>(), Ok(ident) if ident == "ignore")
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|seg| {
        seg.ident == "Option" && matches!(seg.arguments, PathArguments::AngleBracketed(_))
    })
}
