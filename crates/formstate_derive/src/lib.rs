use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(FormModel)]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "FormModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "FormModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let root = formstate_path();
    let mut key_methods = Vec::new();
    let mut inserts = Vec::new();
    let mut reads = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_name = field_ident.to_string();

        key_methods.push(quote! {
            pub const fn #field_ident(&self) -> #root::form::FieldKey {
                #root::form::FieldKey::from_static(#field_name)
            }
        });

        inserts.push(quote! {
            values.insert(
                #root::form::FieldKey::from_static(#field_name),
                #root::form::FieldValue::from(::core::clone::Clone::clone(&self.#field_ident)),
            );
        });

        reads.push(quote! {
            #field_ident: #root::form::read_field(
                values,
                #root::form::FieldKey::from_static(#field_name),
            )?,
        });
    }

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#key_methods)*
        }

        impl #root::form::FormModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }

            fn to_values(&self) -> #root::form::FieldMap {
                let mut values = #root::form::FieldMap::new();
                #(#inserts)*
                values
            }

            fn from_values(
                values: &#root::form::FieldMap,
            ) -> #root::form::FormResult<Self> {
                ::core::result::Result::Ok(Self {
                    #(#reads)*
                })
            }
        }
    }
    .into()
}

fn formstate_path() -> TokenStream2 {
    match crate_name("formstate") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::formstate),
    }
}
