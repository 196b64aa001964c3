//! Tool definitions described with JSON Schema, converted to BAML classes.
//!
//! A tool is a name, an optional description, and an object schema for its
//! parameters. Each parameter becomes a field; parameters not listed as
//! required become optional.

use indexmap::IndexMap;
use serde::Deserialize;

use bamlgen_core::{Field, Record, TypeDescriptor};

use crate::catalog::Catalog;
use crate::docs::NoDocs;
use crate::emit::{Config, Emitter};
use crate::{Error, Result};

/// A tool definition: `{ name, description, parameters }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "input_schema")]
    pub parameters: ToolParameters,
}

/// Object schema of a tool's parameters. Property order is preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolParameters {
    #[serde(default)]
    pub properties: IndexMap<String, ToolProperty>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// The subset of a JSON Schema property that maps onto BAML types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolProperty {
    #[serde(default, rename = "type")]
    pub ty: Option<JsonType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Option<Box<ToolProperty>>,
    #[serde(default, rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
}

/// `"type": "string"` or `"type": ["string", "null"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonType {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<ToolProperty>),
}

impl ToolSchema {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidToolSchema)
    }

    /// The parameters as a record named after the tool.
    pub fn to_record(&self) -> Record {
        let parameters = &self.parameters;
        parameters
            .properties
            .iter()
            .fold(Record::new(self.name.as_str()), |record, (name, property)| {
                let ty = property.descriptor();
                let ty = if parameters.required.contains(name) {
                    ty
                } else {
                    TypeDescriptor::optional(ty)
                };
                let mut field = Field::new(name.as_str(), ty);
                field.description = property.description.clone();
                record.field(field)
            })
    }

    pub fn to_baml(&self) -> String {
        self.to_baml_with(Config::default())
    }

    /// Render the tool as a class, preceded by a `// description` line when
    /// descriptions are enabled.
    pub fn to_baml_with(&self, config: Config) -> String {
        let catalog = Catalog::new();
        let emitter = Emitter::new(&catalog, config).with_docs(&NoDocs);

        let mut out = String::new();
        if config.include_descriptions
            && let Some(description) = self.description.as_deref()
            && !description.trim().is_empty()
        {
            out.push_str("// ");
            out.push_str(description);
            out.push('\n');
        }
        out.push_str(&emitter.emit_record(&self.to_record()));
        out
    }
}

impl ToolProperty {
    /// Map the JSON Schema type onto a descriptor. Anything unrecognized is a
    /// string.
    pub fn descriptor(&self) -> TypeDescriptor {
        match &self.ty {
            None => TypeDescriptor::string(),
            Some(JsonType::One(name)) => self.named(name),
            Some(JsonType::Many(names)) => {
                TypeDescriptor::union(names.iter().map(|name| self.named(name)))
            }
        }
    }

    fn named(&self, name: &str) -> TypeDescriptor {
        match name {
            "string" => TypeDescriptor::string(),
            "integer" => TypeDescriptor::integer(),
            "number" => TypeDescriptor::float(),
            "boolean" => TypeDescriptor::boolean(),
            "null" => TypeDescriptor::null(),
            "array" => TypeDescriptor::array(
                self.items
                    .as_deref()
                    .map_or_else(TypeDescriptor::string, ToolProperty::descriptor),
            ),
            "object" => {
                let value = match &self.additional_properties {
                    Some(AdditionalProperties::Schema(schema)) => schema.descriptor(),
                    _ => TypeDescriptor::string(),
                };
                TypeDescriptor::map(TypeDescriptor::string(), value)
            }
            other => {
                tracing::debug!(json_type = other, "unrecognized JSON Schema type, using string");
                TypeDescriptor::string()
            }
        }
    }
}
