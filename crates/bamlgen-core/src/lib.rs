#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for describing host types to bamlgen.
//!
//! Two layers:
//! - **Reference layer**: `TypeDescriptor`, a closed tree describing the type of
//!   a single field. Named types appear only as references (`Record`/`Enum`).
//! - **Definition layer**: `Record` and `Enum`, the named types themselves.
//!
//! Everything here is plain immutable data. Rendering, dependency resolution and
//! emission live in the `bamlgen` crate.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod utils;


// ============================================================================
// Identity
// ============================================================================

/// Qualified identity of a named type, e.g. `app::models::User`.
///
/// Only the last path segment is ever emitted. Two types whose qualified names
/// differ but whose short names agree are indistinguishable in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(qualified: impl Into<String>) -> Self {
        Self(qualified.into())
    }

    /// Full path as supplied by the host.
    pub fn qualified(&self) -> &str {
        &self.0
    }

    /// Last path segment, the name used in emitted schemas.
    pub fn short_name(&self) -> &str {
        utils::short_name(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Reference Layer
// ============================================================================

/// Scalar kinds a host type can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    /// Interned names (symbols, atoms). Serialized as strings.
    Symbol,
    /// Dates and timestamps. Serialized as strings.
    DateTime,
    Integer,
    Float,
    Boolean,
    Null,
    /// Arbitrary JSON, no structure known.
    Dynamic,
}

/// Description of a field's type.
///
/// A `Union` holding exactly one non-null member plus `Null` means the same as
/// `Optional`; the renderer normalizes both shapes to the same output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Optional(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    /// Key-value map. The key is kept for dependency tracking but always
    /// rendered as `string`.
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// Members in declaration order.
    Union(Vec<TypeDescriptor>),
    /// Reference to a record defined elsewhere.
    Record(TypeName),
    /// Reference to an enumeration defined elsewhere.
    Enum(TypeName),
    /// A host type the adapter could not classify.
    Unknown,
}

impl TypeDescriptor {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn integer() -> Self {
        Self::Primitive(PrimitiveKind::Integer)
    }

    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    pub fn null() -> Self {
        Self::Primitive(PrimitiveKind::Null)
    }

    pub fn dynamic() -> Self {
        Self::Primitive(PrimitiveKind::Dynamic)
    }

    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    pub fn record(name: impl Into<TypeName>) -> Self {
        Self::Record(name.into())
    }

    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        Self::Enum(name.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Null))
    }

    /// Visit this node and every nested node in pre-order.
    ///
    /// Map keys are visited before map values.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a TypeDescriptor)) {
        visit(self);
        match self {
            Self::Optional(inner) | Self::Array(inner) => inner.walk(visit),
            Self::Map { key, value } => {
                key.walk(visit);
                value.walk(visit);
            }
            Self::Union(members) => {
                for member in members {
                    member.walk(visit);
                }
            }
            Self::Primitive(_) | Self::Record(_) | Self::Enum(_) | Self::Unknown => {}
        }
    }
}

// ============================================================================
// Definition Layer
// ============================================================================

/// A named, typed member of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Description declared alongside the field. Wins over extracted comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A record type: named fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: TypeName,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Returns self for chaining.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn short_name(&self) -> &str {
        self.name.short_name()
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// String the value serializes to. This is what gets emitted.
    pub value: String,
    /// Member name in the host source, used for comment lookup.
    pub member: String,
}

/// A closed enumeration of string values in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: TypeName,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value. Returns self for chaining.
    pub fn value(mut self, value: impl Into<String>, member: impl Into<String>) -> Self {
        self.values.push(EnumValue {
            value: value.into(),
            member: member.into(),
        });
        self
    }

    pub fn short_name(&self) -> &str {
        self.name.short_name()
    }
}
