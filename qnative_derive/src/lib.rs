use proc_macro::TokenStream;

mod bindable;
mod projection;

#[proc_macro_derive(Bindable, attributes(bindable))]
pub fn bindable_derive(input: TokenStream) -> TokenStream {
    bindable::bindable_derive_impl(input)
}

#[proc_macro_derive(Projection, attributes(projection))]
pub fn projection_derive(input: TokenStream) -> TokenStream {
    projection::projection_derive_impl(input)
}
