use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr};

pub fn derive_pure_object(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let entity = extract_entity(&input);

    let fields = match named_fields(&input) {
        Some(fields) => fields,
        None => {
            return syn::Error::new_spanned(
                &input.ident,
                "PureObject derive: only structs with named fields are supported",
            )
            .to_compile_error()
            .into()
        }
    };

    let primary_key = match marked_field(&fields, "primary_key")
        .or_else(|| fields.iter().find(|f| is_named(f, "id")).copied())
    {
        Some(field) => field,
        None => {
            return syn::Error::new_spanned(
                &input.ident,
                "PureObject derive: no field marked with #[pure(primary_key)] and no field named `id`",
            )
            .to_compile_error()
            .into()
        }
    };
    let primary_key_name = field_name(primary_key);

    let version = marked_field(&fields, "version");

    let version_key = match version {
        Some(field) => {
            let key = field_name(field);
            quote! { Some(#key) }
        }
        None => quote! { None },
    };

    let versioned_impl = version.map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            impl persist_rx::VersionedObject for #name {
                type Version = #ty;

                fn version(&self) -> &#ty {
                    &self.#ident
                }

                fn set_version(&mut self, version: #ty) {
                    self.#ident = version;
                }
            }
        }
    });

    let expanded = quote! {
        impl persist_rx::PureObject for #name {
            const ENTITY: &'static str = #entity;
            const PRIMARY_KEY: &'static str = #primary_key_name;
            const VERSION_KEY: Option<&'static str> = #version_key;
        }

        #versioned_impl
    };

    TokenStream::from(expanded)
}

fn extract_entity(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("pure") {
            continue;
        }

        let mut entity = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("entity") {
                let value: LitStr = meta.value()?.parse()?;
                entity = Some(value.value());
            }
            Ok(())
        });

        if let Some(e) = entity {
            return e;
        }
    }

    // Default: the struct name
    input.ident.to_string()
}

fn named_fields(input: &DeriveInput) -> Option<Vec<&Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Some(fields.named.iter().collect());
        }
    }
    None
}

fn marked_field<'a>(fields: &[&'a Field], marker: &str) -> Option<&'a Field> {
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("pure") {
                continue;
            }
            let mut marked = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(marker) {
                    marked = true;
                }
                Ok(())
            });
            if marked {
                return Some(*field);
            }
        }
    }
    None
}

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().map(|i| i == name).unwrap_or(false)
}

fn field_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
        .unwrap_or_default()
}
