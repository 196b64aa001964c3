//! Documentation lookup for fields and enum values.
//!
//! The emitter asks a [`DocLookup`] for the comment attached to a member of a
//! named type. Lookups are best-effort: a missing comment is `None`, never an
//! error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod source;


/// Source of member comments, keyed by the owner's short name.
pub trait DocLookup {
    /// Comment for `member` of the type whose short name is `owner`.
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String>;

    /// Consult `self` first, then `fallback`.
    fn or<B: DocLookup>(self, fallback: B) -> Chain<Self, B>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: fallback,
        }
    }
}

impl<T: DocLookup + ?Sized> DocLookup for &T {
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String> {
        (**self).lookup_comment(owner, member)
    }
}

impl<T: DocLookup + ?Sized> DocLookup for Box<T> {
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String> {
        (**self).lookup_comment(owner, member)
    }
}

/// A lookup that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocs;

impl DocLookup for NoDocs {
    fn lookup_comment(&self, _owner: &str, _member: &str) -> Option<String> {
        None
    }
}

/// Two lookups tried in order. Built by [`DocLookup::or`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: DocLookup, B: DocLookup> DocLookup for Chain<A, B> {
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String> {
        self.first
            .lookup_comment(owner, member)
            .or_else(|| self.second.lookup_comment(owner, member))
    }
}

/// Lookup backed by a closure.
pub struct FromFn<F>(F);

/// Wrap a closure as a [`DocLookup`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str, &str) -> Option<String>,
{
    FromFn(f)
}

impl<F> DocLookup for FromFn<F>
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String> {
        (self.0)(owner, member)
    }
}

/// In-memory comment table: owner short name → member name → text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocTable {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl DocTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a comment, replacing any previous text for the same member.
    pub fn insert(
        &mut self,
        owner: impl Into<String>,
        member: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .entry(owner.into())
            .or_default()
            .insert(member.into(), text.into());
    }

    pub fn get(&self, owner: &str, member: &str) -> Option<&str> {
        self.entries.get(owner)?.get(member).map(String::as_str)
    }

    /// Number of stored comments across all owners.
    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: DocTable) {
        for (owner, members) in other.entries {
            let slot = self.entries.entry(owner).or_default();
            slot.extend(members);
        }
    }

    /// Iterate `(owner, member, text)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.entries.iter().flat_map(|(owner, members)| {
            members
                .iter()
                .map(move |(member, text)| (owner.as_str(), member.as_str(), text.as_str()))
        })
    }
}

impl DocLookup for DocTable {
    fn lookup_comment(&self, owner: &str, member: &str) -> Option<String> {
        self.get(owner, member).map(str::to_string)
    }
}
