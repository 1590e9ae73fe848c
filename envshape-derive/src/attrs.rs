//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from the
//! struct and its fields during macro expansion.

use syn::{DeriveInput, Expr, Field, Lit};

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix joined with `_` to every field not marked `no_prefix`.
    pub prefix: Option<String>,

    /// Treat empty-string variables as absent before validation.
    pub empty_string_as_undefined: bool,
}

impl StructAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    match lit {
                        Lit::Str(s) => {
                            let prefix = s.value();
                            attrs.prefix = (!prefix.is_empty()).then_some(prefix);
                            return Ok(());
                        }
                        _ => return Err(meta.error("prefix must be a string literal")),
                    }
                }

                if meta.path.is_ident("empty_string_as_undefined") {
                    attrs.empty_string_as_undefined = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Logical variable name override.
    ///
    /// If `None`, the field name is converted to UPPER_SNAKE_CASE.
    pub name: Option<String>,

    /// Exempt this field from the struct-level prefix.
    pub no_prefix: bool,

    /// Validator expression, e.g. `envshape::validate::url()`.
    ///
    /// When `None`, the field type is parsed with `FromStr`.
    pub validate: Option<Expr>,

    /// Raw string validated in place of an absent variable.
    pub default: Option<String>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let name: Lit = value.parse()?;
                    if let Lit::Str(s) = name {
                        attrs.name = Some(s.value());
                        return Ok(());
                    }
                    return Err(meta.error("name must be a string literal"));
                }

                // no_prefix
                if meta.path.is_ident("no_prefix") {
                    attrs.no_prefix = true;
                    return Ok(());
                }

                // validate = "path::to::validator()"
                if meta.path.is_ident("validate") {
                    let value = meta.value()?;
                    let func: Lit = value.parse()?;
                    if let Lit::Str(s) = func {
                        attrs.validate = Some(s.parse()?);
                        return Ok(());
                    }
                    return Err(meta.error("validate must be a string literal"));
                }

                // default = "raw value"
                if meta.path.is_ident("default") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    if let Lit::Str(s) = lit {
                        attrs.default = Some(s.value());
                        return Ok(());
                    }
                    return Err(meta.error(
                        "default must be a string literal holding the raw environment value",
                    ));
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}
