use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, DeriveInput, LitStr, Token};

pub fn expand_index_model_provider(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let mut collection: Option<LitStr> = None;
    let mut index_exprs = vec![];

    for attr in &ast.attrs {
        if attr.path().is_ident("mongo_collection") {
            collection = Some(attr.parse_args::<LitStr>()?);
        } else if attr.path().is_ident("mongo_index") {
            index_exprs.push(parse_index(attr)?);
        }
    }

    let collection = collection
        .ok_or_else(|| syn::Error::new_spanned(name, "missing #[mongo_collection(\"...\")] attribute"))?;

    Ok(quote! {
        impl ::common::index_trait::MongoIndexModelProvider for #name {
            fn collection_name() -> &'static str {
                #collection
            }

            fn index_models() -> Vec<::mongodb::IndexModel> {
                vec![
                    #(#index_exprs),*
                ]
            }
        }
    })
}

/// `#[mongo_index(fields["a", "b"], unique, order = "desc", name = "idx")]`
fn parse_index(attr: &syn::Attribute) -> syn::Result<TokenStream> {
    let mut fields: Vec<String> = vec![];
    let mut is_unique = false;
    let mut sort_order = 1i32;
    let mut index_name: Option<String> = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("fields") {
            let content;
            syn::bracketed!(content in meta.input);
            let lits = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            fields.extend(lits.into_iter().map(|lit| lit.value()));
            Ok(())
        } else if meta.path.is_ident("unique") {
            is_unique = true;
            Ok(())
        } else if meta.path.is_ident("order") {
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().eq_ignore_ascii_case("desc") {
                sort_order = -1;
            }
            Ok(())
        } else if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            index_name = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("unsupported mongo_index property"))
        }
    })?;

    if fields.is_empty() {
        return Err(syn::Error::new_spanned(attr, "mongo_index requires at least one field"));
    }

    let keys = fields.iter().map(|field| quote! { keys.insert(#field, #sort_order); });

    let mut options = quote! { ::mongodb::options::IndexOptions::builder() };
    if is_unique {
        options = quote! { #options.unique(true) };
    }
    if let Some(ref name) = index_name {
        options = quote! { #options.name(#name.to_string()) };
    }

    Ok(quote! {
        {
            let mut keys = ::mongodb::bson::Document::new();
            #(#keys)*
            ::mongodb::IndexModel::builder()
                .keys(keys)
                .options(#options.build())
                .build()
        }
    })
}
