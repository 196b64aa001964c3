//! bamlgen: generate BAML schemas from typed declarations.
//!
//! # Example
//!
//! ```
//! use bamlgen::{Catalog, Config, Emitter, Field, Record, TypeDescriptor};
//!
//! let mut catalog = Catalog::new();
//! let user = catalog.insert_record(
//!     Record::new("app::User")
//!         .field(Field::new("name", TypeDescriptor::string()))
//!         .field(Field::new("email", TypeDescriptor::optional(TypeDescriptor::string()))),
//! );
//!
//! let baml = Emitter::new(&catalog, Config::default()).emit(&[user]).unwrap();
//! assert_eq!(baml, "class User {\n  name string\n  email string?\n}");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod describe;
pub mod docs;
pub mod emit;
pub mod render;
pub mod resolve;
pub mod tool;


pub use bamlgen_core::{
    Enum, EnumValue, Field, PrimitiveKind, Record, TypeDescriptor, TypeName, utils,
};
#[cfg(feature = "derive")]
pub use bamlgen_macros::Baml;

pub use catalog::Catalog;
pub use describe::{BamlSchema, BamlType, Schema};
pub use docs::{DocLookup, DocTable, NoDocs};
pub use emit::{Config, Emitter};
pub use render::render;
pub use resolve::{BackEdge, Resolution, Resolver, resolve};
pub use tool::ToolSchema;

/// Errors that can occur while building or emitting a schema.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested root is neither a record nor an enum in the catalog.
    #[error("unknown type `{0}`")]
    UnknownType(TypeName),

    /// Two distinct definitions would be emitted under the same name.
    #[error("`{first}` and `{second}` both emit as `{name}`")]
    NameCollision {
        name: String,
        first: TypeName,
        second: TypeName,
    },

    #[error("invalid catalog document: {0}")]
    InvalidCatalog(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("invalid tool schema: {0}")]
    InvalidToolSchema(#[source] serde_json::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
