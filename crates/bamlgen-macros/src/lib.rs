//! `#[derive(Baml)]` for bamlgen.
//!
//! Structs with named fields become BAML classes; enums with only unit
//! variants become BAML enums. Generated code refers to the `bamlgen` crate.
//!
//! # Container Attributes
//!
//! - `#[baml(rename = "Name")]` - Emit under a different type name
//! - `#[baml(rename_all = "camelCase")]` - Rename all fields or values
//!
//! # Field Attributes
//!
//! - `#[baml(rename = "name")]` - Rename this field
//! - `#[baml(description = "...")]` - Description, preferred over the doc comment
//! - `#[baml(skip)]` - Leave this field out
//!
//! # Variant Attributes
//!
//! - `#[baml(rename = "value")]` - Emitted value for this variant
//! - `#[baml(skip)]` - Leave this variant out
//!
//! Doc comments on fields and variants are registered as member comments.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod attr;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, FieldsNamed, GenericParam, parse_macro_input};

use attr::{ContainerAttrs, FieldAttrs, VariantAttrs, doc_comment};

#[proc_macro_derive(Baml, attributes(baml))]
pub fn derive_baml(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if let Some(param) = input
        .generics
        .params
        .iter()
        .find(|param| !matches!(param, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            param,
            "Baml cannot be derived for types with type or const parameters",
        ));
    }

    let container = ContainerAttrs::from_ast(&input.attrs)?;
    let ident = &input.ident;
    let emitted = container
        .rename
        .clone()
        .unwrap_or_else(|| ident.to_string());

    let (descriptor, register) = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => (
                quote!(::bamlgen::TypeDescriptor::Record(
                    <Self as ::bamlgen::BamlSchema>::type_name()
                )),
                expand_record(fields, &container)?,
            ),
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Baml can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(data) => (
            quote!(::bamlgen::TypeDescriptor::Enum(
                <Self as ::bamlgen::BamlSchema>::type_name()
            )),
            expand_enum(data, &container)?,
        ),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                ident,
                "Baml cannot be derived for unions",
            ));
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bamlgen::BamlType for #ident #ty_generics #where_clause {
            fn descriptor() -> ::bamlgen::TypeDescriptor {
                #descriptor
            }

            fn register(catalog: &mut ::bamlgen::Catalog) {
                let name = <Self as ::bamlgen::BamlSchema>::type_name();
                if catalog.contains(&name) {
                    return;
                }
                #register
            }
        }

        impl #impl_generics ::bamlgen::BamlSchema for #ident #ty_generics #where_clause {
            fn type_name() -> ::bamlgen::TypeName {
                ::bamlgen::TypeName::new(concat!(module_path!(), "::", #emitted))
            }
        }
    })
}

/// Body of `register` for a struct: insert the record, then its comments,
/// then recurse into field types.
fn expand_record(fields: &FieldsNamed, container: &ContainerAttrs) -> syn::Result<TokenStream2> {
    let mut field_exprs = Vec::new();
    let mut comments = Vec::new();
    let mut nested = Vec::new();

    for field in &fields.named {
        let attrs = FieldAttrs::from_ast(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let name = attrs.emitted_name(&ident.to_string(), container);
        let ty = &field.ty;

        let description = attrs
            .description
            .as_ref()
            .map(|text| quote!(.with_description(#text)));
        field_exprs.push(quote! {
            ::bamlgen::Field::new(#name, <#ty as ::bamlgen::BamlType>::descriptor()) #description
        });

        if let Some(doc) = doc_comment(&field.attrs) {
            comments.push(quote! {
                catalog.comments_mut().insert(::std::clone::Clone::clone(&owner), #name, #doc);
            });
        }

        nested.push(quote! {
            <#ty as ::bamlgen::BamlType>::register(catalog);
        });
    }

    let owner = bind_owner(&comments);
    Ok(quote! {
        #owner
        catalog.insert_record(
            ::bamlgen::Record::new(name) #(.field(#field_exprs))*
        );
        #(#comments)*
        #(#nested)*
    })
}

/// Body of `register` for a unit-only enum.
fn expand_enum(data: &DataEnum, container: &ContainerAttrs) -> syn::Result<TokenStream2> {
    let mut values = Vec::new();
    let mut comments = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Baml enums may only have unit variants",
            ));
        }
        let attrs = VariantAttrs::from_ast(&variant.attrs)?;
        if attrs.skip {
            continue;
        }
        let member = variant.ident.to_string();
        let value = attrs.emitted_value(&member, container);
        values.push(quote!(.value(#value, #member)));

        if let Some(doc) = doc_comment(&variant.attrs) {
            comments.push(quote! {
                catalog.comments_mut().insert(::std::clone::Clone::clone(&owner), #member, #doc);
            });
        }
    }

    let owner = bind_owner(&comments);
    Ok(quote! {
        #owner
        catalog.insert_enum(::bamlgen::Enum::new(name) #(#values)*);
        #(#comments)*
    })
}

/// `owner` is only bound when some member carries a doc comment.
fn bind_owner(comments: &[TokenStream2]) -> Option<TokenStream2> {
    (!comments.is_empty())
        .then(|| quote!(let owner = ::std::string::ToString::to_string(name.short_name());))
}
