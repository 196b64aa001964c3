//! Registry of named type definitions.
//!
//! A `Catalog` maps qualified type names to their record or enum definitions
//! and carries the comment table the emitter falls back to for member
//! documentation.

use indexmap::IndexMap;
use serde::Deserialize;

use bamlgen_core::{Enum, Record, TypeDescriptor, TypeName};

use crate::describe::BamlType;
use crate::docs::DocTable;
use crate::resolve::record_refs;
use crate::{Error, Result};

/// Named definitions reachable from some set of roots, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: IndexMap<TypeName, Record>,
    enums: IndexMap<TypeName, Enum>,
    comments: DocTable,
}

/// JSON form of a catalog, for hosts that hand over their types as data.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    enums: Vec<Enum>,
    #[serde(default)]
    comments: DocTable,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON document with `records`, `enums` and
    /// `comments` keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json).map_err(Error::InvalidCatalog)?;
        let mut catalog = Self::new();
        for record in document.records {
            catalog.insert_record(record);
        }
        for enumeration in document.enums {
            catalog.insert_enum(enumeration);
        }
        catalog.comments = document.comments;
        Ok(catalog)
    }

    /// Add or replace a record definition. Returns its name.
    pub fn insert_record(&mut self, record: Record) -> TypeName {
        let name = record.name.clone();
        self.records.insert(name.clone(), record);
        name
    }

    /// Add or replace an enum definition. Returns its name.
    pub fn insert_enum(&mut self, enumeration: Enum) -> TypeName {
        let name = enumeration.name.clone();
        self.enums.insert(name.clone(), enumeration);
        name
    }

    /// Register a host type and everything it refers to.
    pub fn register<T: BamlType + ?Sized>(&mut self) {
        T::register(self);
    }

    /// Whether `name` is defined, as either a record or an enum.
    pub fn contains(&self, name: &TypeName) -> bool {
        self.records.contains_key(name) || self.enums.contains_key(name)
    }

    pub fn record(&self, name: &TypeName) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn enumeration(&self, name: &TypeName) -> Option<&Enum> {
        self.enums.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.enums.values()
    }

    pub fn len(&self) -> usize {
        self.records.len() + self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn comments(&self) -> &DocTable {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut DocTable {
        &mut self.comments
    }

    /// Records referenced inside `ty`, in first-occurrence order.
    ///
    /// Names with no definition in the catalog are skipped.
    pub fn record_refs_of(&self, ty: &TypeDescriptor) -> Vec<&Record> {
        record_refs(ty)
            .into_iter()
            .filter_map(|name| {
                let record = self.records.get(name);
                if record.is_none() {
                    tracing::warn!(name = %name, "referenced record is not in the catalog");
                }
                record
            })
            .collect()
    }
}
