//! Parsing of `#[baml(...)]` attributes and doc comments.

use bamlgen_core::utils::RenameRule;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, Meta, Token};

/// Container-level attributes.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Emitted type name, replacing the Rust identifier.
    pub rename: Option<String>,
    /// Applied to field names (structs) or values (enums).
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for meta in baml_metas(attrs)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    result.rename = Some(lit_str(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    let rule = lit_str(&nv.value)?;
                    let parsed = RenameRule::parse(&rule).ok_or_else(|| {
                        syn::Error::new_spanned(&nv.value, format!("unknown rename rule `{rule}`"))
                    })?;
                    result.rename_all = Some(parsed);
                }
                _ => return Err(unsupported(&meta, "container")),
            }
        }
        Ok(result)
    }

    fn apply(&self, name: &str) -> String {
        match self.rename_all {
            Some(rule) => rule.apply(name),
            None => name.to_string(),
        }
    }
}

/// Field-level attributes.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    /// Declared description; wins over the doc comment.
    pub description: Option<String>,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for meta in baml_metas(attrs)? {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    result.rename = Some(lit_str(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("description") => {
                    result.description = Some(lit_str(&nv.value)?);
                }
                _ => return Err(unsupported(&meta, "field")),
            }
        }
        Ok(result)
    }

    pub fn emitted_name(&self, ident: &str, container: &ContainerAttrs) -> String {
        match &self.rename {
            Some(rename) => rename.clone(),
            None => container.apply(ident),
        }
    }
}

/// Variant-level attributes.
#[derive(Debug, Default)]
pub struct VariantAttrs {
    pub rename: Option<String>,
    pub skip: bool,
}

impl VariantAttrs {
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for meta in baml_metas(attrs)? {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    result.rename = Some(lit_str(&nv.value)?);
                }
                _ => return Err(unsupported(&meta, "variant")),
            }
        }
        Ok(result)
    }

    pub fn emitted_value(&self, ident: &str, container: &ContainerAttrs) -> String {
        match &self.rename {
            Some(rename) => rename.clone(),
            None => container.apply(ident),
        }
    }
}

/// `///` lines, each trimmed, blank lines dropped, joined with single spaces.
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta
            && let Expr::Lit(syn::ExprLit {
                lit: Lit::Str(text),
                ..
            }) = &nv.value
        {
            let text = text.value();
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
    }
    (!lines.is_empty()).then(|| lines.join(" "))
}

fn baml_metas(attrs: &[Attribute]) -> syn::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("baml")) {
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn lit_str(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Str(text),
            ..
        }) => Ok(text.value()),
        _ => Err(syn::Error::new_spanned(expr, "expected string literal")),
    }
}

fn unsupported(meta: &Meta, position: &str) -> syn::Error {
    syn::Error::new_spanned(meta, format!("unsupported {position} attribute"))
}
