//! Derive macro implementation for envshape

use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract inner type from Option<T>
fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            if seg.ident != "Option" {
                return None;
            }
            if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// `EnvShape` derive macro
///
/// Implements `envshape::EnvShape` and an inherent `from_env()` method.
/// Each field is a declared variable; its output key is computed here, at
/// compile time, from the prefix and `no_prefix` markers.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "NEXT_PUBLIC")]`: Read and report fields as `NEXT_PUBLIC_{NAME}`
/// - `#[env(empty_string_as_undefined)]`: Treat empty variables as absent
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Logical variable name
/// - `#[env(no_prefix)]`: Exempt this field from the prefix
/// - `#[env(validate = "expr")]`: Validator expression (default: `FromStr` of the field type)
/// - `#[env(default = "raw")]`: Raw value validated when the variable is absent
///
/// # Example
///
/// See the `envshape` crate documentation for usage examples.
#[proc_macro_derive(EnvShape, attributes(env))]
pub fn derive_envshape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    // Struct name
    let struct_name = &input.ident;

    let struct_attrs = StructAttrs::from_input(input)?;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvShape only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvShape only supports structs",
            ));
        }
    };

    let mut names = HashSet::new();
    let mut keys = HashSet::new();
    let mut schema_vars = Vec::new();
    let mut disabled = Vec::new();
    let mut output_keys = Vec::new();
    let mut field_initializers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;
        let option_inner = extract_option_inner_type(field_type);

        // Logical name: explicit or UPPER_SNAKE_CASE of the field name
        let name = attrs.name.clone().unwrap_or_else(|| {
            field_name
                .to_string()
                .trim_start_matches("r#")
                .to_uppercase()
        });
        if !names.insert(name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("variable '{name}' is declared by more than one field"),
            ));
        }

        if option_inner.is_some() && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Option<T> fields cannot have default attribute (they default to None automatically)",
            ));
        }

        // Output key, mirroring EnvOptions::output_key
        let output_key = match &struct_attrs.prefix {
            Some(prefix) if !prefix.is_empty() && !attrs.no_prefix => format!("{prefix}_{name}"),
            _ => name.clone(),
        };
        if !keys.insert(output_key.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("output key '{output_key}' is produced by more than one field"),
            ));
        }
        if attrs.no_prefix {
            disabled.push(name.clone());
        }

        // Validator expression
        let value_type = option_inner.unwrap_or(field_type);
        let mut validator = match &attrs.validate {
            Some(expr) => quote! { #expr },
            None => quote! { ::envshape::de::default_validator::<#value_type>() },
        };
        if let Some(default) = &attrs.default {
            validator = quote! {
                ::envshape::validate::ValidatorExt::default_raw(#validator, #default)
            };
        }
        if option_inner.is_some() {
            validator = quote! {
                ::envshape::validate::ValidatorExt::optional(#validator)
            };
        }
        schema_vars.push(quote! {
            let schema = schema.var(#name, #validator)?;
        });

        // Field extraction from the validated variables
        let extract = match option_inner {
            Some(inner) => quote! {
                ::envshape::de::extract_optional::<#inner>(vars, #output_key)?
            },
            None => quote! {
                ::envshape::de::extract_required::<#field_type>(vars, #output_key)?
            },
        };
        field_initializers.push(quote! {
            #field_name: #extract
        });

        output_keys.push(output_key);
    }

    let prefix = struct_attrs.prefix.unwrap_or_default();
    let empty_string_as_undefined = struct_attrs.empty_string_as_undefined;
    let disabled_len = disabled.len();

    Ok(quote! {
        impl ::envshape::EnvShape for #struct_name {
            fn schema() -> ::std::result::Result<::envshape::Schema, ::envshape::EnvError> {
                let schema = ::envshape::Schema::new();
                #(#schema_vars)*
                ::std::result::Result::Ok(schema)
            }

            fn options() -> ::envshape::EnvOptions {
                let disabled: [&str; #disabled_len] = [#(#disabled),*];
                ::envshape::EnvOptions::new()
                    .prefix(#prefix)
                    .disable_prefix(disabled)
                    .empty_string_as_undefined(#empty_string_as_undefined)
            }

            fn output_keys() -> &'static [&'static str] {
                &[#(#output_keys),*]
            }

            fn from_vars(
                vars: &::envshape::EnvVars,
            ) -> ::std::result::Result<Self, ::envshape::EnvError> {
                ::std::result::Result::Ok(Self {
                    #(#field_initializers),*
                })
            }
        }

        impl #struct_name {
            /// Load and validate configuration from environment variables
            ///
            /// # Errors
            ///
            /// - Declared variables are missing or fail validation
            /// - Validated values do not fit the field types
            pub fn from_env() -> ::envshape::anyhow::Result<Self> {
                ::std::result::Result::Ok(
                    <Self as ::envshape::EnvShape>::load_from(&::envshape::ProcessEnv)?,
                )
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_expand_rejects_colliding_output_keys() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "A")]
            struct Collide {
                b: String,
                #[env(no_prefix)]
                a_b: String,
            }
        };
        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("output key 'A_B'"));
    }

    #[test]
    fn test_expand_rejects_duplicate_names() {
        let input: DeriveInput = parse_quote! {
            struct Twice {
                port: u16,
                #[env(name = "PORT")]
                other: u16,
            }
        };
        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("'PORT'"));
    }

    #[test]
    fn test_expand_accepts_distinct_keys() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "NEXT_PUBLIC")]
            struct Public {
                api_url: String,
                #[env(no_prefix)]
                api_key: String,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("\"NEXT_PUBLIC_API_URL\""));
        assert!(tokens.contains("\"API_KEY\""));
    }
}
