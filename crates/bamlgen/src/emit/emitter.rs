use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use bamlgen_core::{Enum, Record, TypeName};

use super::Config;
use crate::catalog::Catalog;
use crate::docs::DocLookup;
use crate::render::render;
use crate::resolve::{Resolver, collect_enums};
use crate::{Error, Result};

/// Emits BAML `class` and `enum` blocks for catalog definitions.
pub struct Emitter<'a> {
    catalog: &'a Catalog,
    config: Config,
    docs: &'a dyn DocLookup,
}

#[derive(Clone, Copy)]
enum Definition<'a> {
    Record(&'a Record),
    Enum(&'a Enum),
}

impl<'a> Definition<'a> {
    fn name(&self) -> &'a TypeName {
        match *self {
            Self::Record(record) => &record.name,
            Self::Enum(enumeration) => &enumeration.name,
        }
    }
}

impl<'a> Emitter<'a> {
    /// Member comments come from the catalog's comment table unless replaced
    /// with [`Emitter::with_docs`].
    pub fn new(catalog: &'a Catalog, config: Config) -> Self {
        Self {
            catalog,
            config,
            docs: catalog.comments(),
        }
    }

    pub fn with_docs(mut self, docs: &'a dyn DocLookup) -> Self {
        self.docs = docs;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Emit the schema for `roots`.
    ///
    /// With dependencies on, the document holds every enum then every record
    /// reachable from the roots, records in dependency order. Otherwise only the
    /// roots are emitted, in the order given.
    pub fn emit(&self, roots: &[TypeName]) -> Result<String> {
        let plan = if self.config.include_dependencies {
            self.plan_with_dependencies(roots)?
        } else {
            self.plan_roots(roots)?
        };
        check_collisions(&plan)?;

        tracing::debug!(
            roots = roots.len(),
            definitions = plan.len(),
            "emitting schema"
        );

        let blocks: Vec<String> = plan
            .iter()
            .map(|definition| match definition {
                Definition::Record(record) => self.emit_record(record),
                Definition::Enum(enumeration) => self.emit_enum(enumeration),
            })
            .collect();
        Ok(blocks.join("\n\n"))
    }

    /// Render a single `class` block.
    pub fn emit_record(&self, record: &Record) -> String {
        let indent = self.config.indent();
        let mut out = format!("class {} {{\n", record.short_name());
        for field in &record.fields {
            out.push_str(&indent);
            out.push_str(&field.name);
            out.push(' ');
            out.push_str(&render(&field.ty));
            let description = field
                .description
                .clone()
                .filter(|text| !text.trim().is_empty())
                .or_else(|| self.comment(record.short_name(), &field.name));
            self.push_description(&mut out, description);
            out.push('\n');
        }
        out.push('}');
        out
    }

    /// Render a single `enum` block.
    pub fn emit_enum(&self, enumeration: &Enum) -> String {
        let indent = self.config.indent();
        let mut out = format!("enum {} {{\n", enumeration.short_name());
        for value in &enumeration.values {
            out.push_str(&indent);
            out.push('"');
            out.push_str(&value.value);
            out.push('"');
            let description = self.comment(enumeration.short_name(), &value.member);
            self.push_description(&mut out, description);
            out.push('\n');
        }
        out.push('}');
        out
    }

    fn comment(&self, owner: &str, member: &str) -> Option<String> {
        self.docs
            .lookup_comment(owner, member)
            .filter(|text| !text.trim().is_empty())
    }

    fn push_description(&self, out: &mut String, description: Option<String>) {
        if !self.config.include_descriptions {
            return;
        }
        if let Some(text) = description {
            out.push_str(" @description(\"");
            out.push_str(&escape(&text));
            out.push_str("\")");
        }
    }

    fn definition(&self, name: &TypeName) -> Result<Definition<'a>> {
        if let Some(record) = self.catalog.record(name) {
            Ok(Definition::Record(record))
        } else if let Some(enumeration) = self.catalog.enumeration(name) {
            Ok(Definition::Enum(enumeration))
        } else {
            Err(Error::UnknownType(name.clone()))
        }
    }

    fn plan_roots(&self, roots: &[TypeName]) -> Result<Vec<Definition<'a>>> {
        let mut seen = HashSet::new();
        let mut plan = Vec::with_capacity(roots.len());
        for name in roots {
            let definition = self.definition(name)?;
            if seen.insert(name) {
                plan.push(definition);
            }
        }
        Ok(plan)
    }

    fn plan_with_dependencies(&self, roots: &[TypeName]) -> Result<Vec<Definition<'a>>> {
        let catalog = self.catalog;
        let mut resolver = Resolver::new(|ty| catalog.record_refs_of(ty));
        let mut enum_names: IndexSet<&'a TypeName> = IndexSet::new();

        for name in roots {
            match self.definition(name)? {
                Definition::Record(record) => {
                    let start = resolver.order().len();
                    resolver.visit(record);
                    enum_names.extend(collect_enums(&resolver.order()[start..]));
                }
                Definition::Enum(enumeration) => {
                    enum_names.insert(&enumeration.name);
                }
            }
        }

        let resolution = resolver.finish();
        if !resolution.back_edges.is_empty() {
            tracing::debug!(
                back_edges = resolution.back_edges.len(),
                "schema contains reference cycles"
            );
        }
        let enums = enum_names.into_iter().filter_map(|name| {
            let enumeration = catalog.enumeration(name);
            if enumeration.is_none() {
                tracing::warn!(name = %name, "referenced enum is not in the catalog");
            }
            enumeration.map(Definition::Enum)
        });
        let records = resolution.order.into_iter().map(Definition::Record);
        Ok(enums.chain(records).collect())
    }
}

/// Two distinct definitions must not share an emitted name.
fn check_collisions(plan: &[Definition<'_>]) -> Result<()> {
    let mut emitted: HashMap<&str, Definition<'_>> = HashMap::new();
    for &definition in plan {
        let name = definition.name();
        let Some(&first) = emitted.get(name.short_name()) else {
            emitted.insert(name.short_name(), definition);
            continue;
        };
        let same = match (first, definition) {
            (Definition::Record(a), Definition::Record(b)) => a.name == b.name,
            (Definition::Enum(a), Definition::Enum(b)) => a.name == b.name,
            _ => false,
        };
        if !same {
            return Err(Error::NameCollision {
                name: name.short_name().to_string(),
                first: first.name().clone(),
                second: name.clone(),
            });
        }
    }
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
