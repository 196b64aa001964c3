//! Dependency ordering for record definitions.
//!
//! Records are ordered depth-first post-order: every record a definition
//! refers to is emitted before it. Cycles are tolerated; the edge that closes
//! a cycle is recorded as a [`BackEdge`] and its target renders as a forward
//! reference.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use bamlgen_core::{Record, TypeDescriptor, TypeName};

/// Record names referenced anywhere inside `ty`, in first-occurrence order.
pub fn record_refs(ty: &TypeDescriptor) -> IndexSet<&TypeName> {
    let mut refs = IndexSet::new();
    ty.walk(&mut |node| {
        if let TypeDescriptor::Record(name) = node {
            refs.insert(name);
        }
    });
    refs
}

/// Enum names referenced anywhere inside `ty`, in first-occurrence order.
pub fn enum_refs(ty: &TypeDescriptor) -> IndexSet<&TypeName> {
    let mut refs = IndexSet::new();
    ty.walk(&mut |node| {
        if let TypeDescriptor::Enum(name) = node {
            refs.insert(name);
        }
    });
    refs
}

/// Enums referenced by `records`, records in order, fields in declaration order.
pub fn collect_enums<'a>(records: &[&'a Record]) -> IndexSet<&'a TypeName> {
    let mut enums = IndexSet::new();
    for &record in records {
        for field in &record.fields {
            enums.extend(enum_refs(&field.ty));
        }
    }
    enums
}

/// Order `root` and everything it transitively references, root last.
///
/// `record_refs_of` maps a field type to the records it refers to.
pub fn resolve<'a, F>(root: &'a Record, record_refs_of: F) -> Vec<&'a Record>
where
    F: FnMut(&'a TypeDescriptor) -> Vec<&'a Record>,
{
    let mut resolver = Resolver::new(record_refs_of);
    resolver.visit(root);
    resolver.finish().order
}

/// An edge that closes a reference cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackEdge {
    /// Record whose field holds the reference.
    pub from: TypeName,
    /// Record still being explored when the reference was reached.
    pub to: TypeName,
}

/// Output of a [`Resolver`] run.
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    /// Records in emission order, each exactly once.
    pub order: Vec<&'a Record>,
    /// Cycle-closing edges, in discovery order.
    pub back_edges: Vec<BackEdge>,
}

/// Depth-first resolver sharing one visited set across several roots.
///
/// Visiting roots one after another yields the first-seen union of their
/// individual resolutions.
pub struct Resolver<'a, F> {
    record_refs_of: F,
    visited: HashSet<&'a TypeName>,
    in_progress: HashSet<&'a TypeName>,
    resolution: Resolution<'a>,
}

impl<'a, F> Resolver<'a, F>
where
    F: FnMut(&'a TypeDescriptor) -> Vec<&'a Record>,
{
    pub fn new(record_refs_of: F) -> Self {
        Self {
            record_refs_of,
            visited: HashSet::new(),
            in_progress: HashSet::new(),
            resolution: Resolution::default(),
        }
    }

    pub fn is_visited(&self, name: &TypeName) -> bool {
        self.visited.contains(name)
    }

    /// Records resolved so far, in emission order.
    pub fn order(&self) -> &[&'a Record] {
        &self.resolution.order
    }

    pub fn visit(&mut self, record: &'a Record) {
        // Marked before the children so that cycles terminate.
        if !self.visited.insert(&record.name) {
            return;
        }
        self.in_progress.insert(&record.name);

        let mut deps: IndexMap<&'a TypeName, &'a Record> = IndexMap::new();
        for field in &record.fields {
            for dep in (self.record_refs_of)(&field.ty) {
                deps.entry(&dep.name).or_insert(dep);
            }
        }

        for (name, dep) in deps {
            if self.in_progress.contains(name) {
                tracing::debug!(from = %record.name, to = %name, "reference cycle");
                self.resolution.back_edges.push(BackEdge {
                    from: record.name.clone(),
                    to: name.clone(),
                });
                continue;
            }
            self.visit(dep);
        }

        self.in_progress.remove(&record.name);
        self.resolution.order.push(record);
    }

    pub fn finish(self) -> Resolution<'a> {
        self.resolution
    }
}
