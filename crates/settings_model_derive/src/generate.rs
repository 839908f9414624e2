use proc_macro2::TokenStream;
use quote::quote;
use syn::Data;
use syn::DeriveInput;
use syn::Error;
use syn::Expr;
use syn::ExprLit;
use syn::Field;
use syn::Fields;
use syn::GenericArgument;
use syn::Ident;
use syn::Lit;
use syn::Meta;
use syn::PathArguments;
use syn::Result;
use syn::Token;
use syn::Type;
use syn::TypePath;
use syn::punctuated::Punctuated;

struct FieldInfo {
    ident: Ident,
    ty: Type,
    name: String,
    key: Option<String>,
    required: bool,
    max_length: Option<usize>,
    nested: bool,
}

pub fn expand_settings_model(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    // Only support structs with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "SettingsModel only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "SettingsModel only supports structs",
            ));
        }
    };

    let mut infos = Vec::new();
    for field in fields {
        infos.push(parse_field(field)?);
    }

    let specs: Vec<_> = infos
        .iter()
        .map(|info| {
            let field_name = &info.name;
            let key = match &info.key {
                Some(key) => quote! { Some(#key) },
                None => quote! { None },
            };
            let required = info.required;
            quote! {
                ::settings_model::FieldSpec {
                    name: #field_name,
                    key: #key,
                    required: #required,
                }
            }
        })
        .collect();

    let assign_arms: Vec<_> = infos
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let ident = &info.ident;
            let ty = &info.ty;
            quote! {
                #index => match raw.clone().try_into::<#ty>() {
                    Ok(value) => {
                        self.#ident = value;
                        Ok(())
                    }
                    Err(e) => Err(::settings_model::CoerceError::new(e.to_string())),
                },
            }
        })
        .collect();

    // Rule checks per field, in declaration order; within one field the
    // order is required, max_length, nested.
    let checks: Vec<_> = infos
        .iter()
        .map(|info| {
            let ident = &info.ident;
            let field_name = &info.name;
            let mut tokens = TokenStream::new();

            if info.required {
                tokens.extend(quote! {
                    if let Some(error) =
                        ::settings_model::rules::required(&self.#ident, #field_name)
                    {
                        violations.push(error);
                    }
                });
            }

            if let Some(max) = info.max_length {
                tokens.extend(quote! {
                    if let Some(error) =
                        ::settings_model::rules::max_length(&self.#ident, #field_name, #max)
                    {
                        violations.push(error);
                    }
                });
            }

            if info.nested {
                let check = if is_option_type(&info.ty).is_some() {
                    quote! { ::settings_model::rules::nested_opt(&self.#ident, #field_name) }
                } else {
                    quote! { ::settings_model::rules::nested(&self.#ident, #field_name) }
                };
                tokens.extend(quote! {
                    if let Some(error) = #check {
                        violations.push(error);
                    }
                });
            }

            tokens
        })
        .collect();

    Ok(quote! {
        impl ::settings_model::SettingsModel for #name {
            const MODEL_NAME: &'static str = stringify!(#name);

            fn field_specs() -> &'static [::settings_model::FieldSpec] {
                const SPECS: &[::settings_model::FieldSpec] = &[
                    #(#specs,)*
                ];
                SPECS
            }

            fn assign(
                &mut self,
                field: ::settings_model::FieldId,
                raw: &::settings_model::Value,
            ) -> Result<(), ::settings_model::CoerceError> {
                match field {
                    #(#assign_arms)*
                    _ => {
                        let _ = raw;
                        Ok(())
                    }
                }
            }

            fn field_violations(&self) -> Vec<::settings_model::ValidationError> {
                #[allow(unused_mut)]
                let mut violations = Vec::new();
                #(#checks)*
                violations
            }
        }
    })
}

/// Parse the `#[settings(...)]` attributes of a field.
fn parse_field(field: &Field) -> Result<FieldInfo> {
    let ident = field.ident.as_ref().unwrap().clone();
    let name = ident.to_string();

    let mut key = None;
    let mut required = false;
    let mut max_length = None;
    let mut nested = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("settings") {
            continue;
        }

        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in metas {
            match meta {
                Meta::Path(path) if path.is_ident("required") => required = true,
                Meta::Path(path) if path.is_ident("nested") => nested = true,
                Meta::NameValue(nv) if nv.path.is_ident("key") => {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(lit_str),
                        ..
                    }) = &nv.value
                    {
                        key = Some(lit_str.value());
                    } else {
                        return Err(Error::new_spanned(
                            &nv.value,
                            "expected a string literal: #[settings(key = \"...\")]",
                        ));
                    }
                }
                Meta::NameValue(nv) if nv.path.is_ident("max_length") => {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Int(lit_int),
                        ..
                    }) = &nv.value
                    {
                        max_length = Some(lit_int.base10_parse::<usize>()?);
                    } else {
                        return Err(Error::new_spanned(
                            &nv.value,
                            "expected an integer literal: #[settings(max_length = N)]",
                        ));
                    }
                }
                other => {
                    return Err(Error::new_spanned(other, "unsupported settings attribute"));
                }
            }
        }
    }

    Ok(FieldInfo {
        ident,
        ty: field.ty.clone(),
        name,
        key,
        required,
        max_length,
        nested,
    })
}

fn is_option_type(ty: &Type) -> Option<Type> {
    if let Type::Path(TypePath { path, .. }) = ty {
        if let Some(segment) = path.segments.last() {
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if args.args.len() == 1 {
                        if let GenericArgument::Type(inner) = &args.args[0] {
                            return Some(inner.clone());
                        }
                    }
                }
            }
        }
    }
    None
}
