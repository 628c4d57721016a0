use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derives `crate::traits::TableRow` for a struct with named fields.
///
/// Every field becomes a column named after the field, rendered through
/// `crate::traits::Cell`. `#[table_row(skip)]` leaves a field out and
/// `#[table_row(rename = "...")]` changes its header.
#[proc_macro_derive(TableRow, attributes(table_row))]
pub fn derive_table_row(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = ast.ident;

    let fields = match ast.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(named) => named.named,
            _ => {
                return syn::Error::new_spanned(name, "TableRow needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "TableRow only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut headers = Vec::new();
    let mut cells = Vec::new();
    for field in fields {
        let Some(ident) = field.ident else { continue };
        let mut skip = false;
        let mut header = ident.to_string();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("table_row")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    header = value.value();
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `rename = \"...\"`"))
                }
            });
            if let Err(e) = parsed {
                return e.to_compile_error().into();
            }
        }
        if skip {
            continue;
        }
        headers.push(header);
        cells.push(quote! { crate::traits::Cell::cell(&self.#ident) });
    }

    let gen = quote! {
        impl crate::traits::TableRow for #name {
            fn headers() -> Vec<&'static str> {
                vec![#(#headers),*]
            }

            fn cells(&self) -> Vec<String> {
                vec![#(#cells),*]
            }
        }
    };
    gen.into()
}
