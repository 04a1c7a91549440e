use darling::{FromDeriveInput, FromField, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(projection), supports(struct_named))]
struct ProjectionInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), ProjectionField>,
    table: String,
}

#[derive(Debug, FromField)]
#[darling(attributes(projection))]
struct ProjectionField {
    ident: Option<syn::Ident>,
    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    table: Option<String>,
    #[darling(default)]
    uuid: bool,
    #[darling(default)]
    ignore: bool,
}

pub fn projection_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let info = match ProjectionInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let name = &info.ident;
    let (impl_gen, ty_gen, where_clause) = info.generics.split_for_impl();
    let default_table = &info.table;

    let fields = info
        .data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let columns = fields.iter().filter(|f| !f.ignore).filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let column = match field.rename {
            Some(ref rename) => rename.clone(),
            None => {
                let raw = ident.to_string();
                raw.trim_start_matches("r#").to_snake_case()
            }
        };
        let table = field.table.as_deref().unwrap_or(default_table);
        let ctor = if field.uuid {
            quote! { ::qnative::Column::uuid(#table, #column) }
        } else {
            quote! { ::qnative::Column::new(#table, #column) }
        };
        Some(ctor)
    });

    quote! {
        impl #impl_gen ::qnative::ProjectionSchema for #name #ty_gen #where_clause {
            fn projection() -> ::qnative::Projection {
                <::qnative::Projection as ::core::iter::FromIterator<::qnative::Column>>::from_iter([#(#columns),*])
            }
        }
    }
    .into()
}
