use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

// 单个字段的派生信息
struct RecordField {
    ident: syn::Ident,
    name: String,
}

/// 为具名字段结构体生成 `Record` 与 `Schema` 实现
///
/// 字段类型需要实现 `formrule::ToFieldValue`。支持的字段属性：
/// - `#[record(rename = "...")]`：使用其他字段名
/// - `#[record(skip)]`：不暴露该字段
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let mut record_name = ident.to_string();
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    record_name = value.value();
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute, expected `rename` or `skip`"))
                }
            })?;
        }

        if !skip {
            fields.push(RecordField {
                ident,
                name: record_name,
            });
        }
    }

    let match_arms = fields.iter().map(|field| {
        let ident = &field.ident;
        let key = &field.name;
        quote! {
            #key => ::formrule::ToFieldValue::to_field_value(&self.#ident),
        }
    });
    let field_names = fields.iter().map(|field| &field.name);

    Ok(quote! {
        impl #impl_generics ::formrule::Record for #name #ty_generics #where_clause {
            fn field_value(&self, name: &str) -> ::core::option::Option<::std::string::String> {
                match name {
                    #(#match_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::formrule::Schema for #name #ty_generics #where_clause {
            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }
        }
    })
}
