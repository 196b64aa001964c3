//! Host adapters: describing Rust types to the schema generator.
//!
//! [`BamlType`] maps a Rust type onto a [`TypeDescriptor`] and registers any
//! named definitions it needs. Named types implement [`BamlSchema`], usually
//! through `#[derive(Baml)]`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::{IndexMap, IndexSet};

use bamlgen_core::{PrimitiveKind, TypeDescriptor, TypeName};

use crate::Result;
use crate::catalog::Catalog;
use crate::docs::DocTable;
use crate::emit::{Config, Emitter};

/// A Rust type that can appear in a schema.
pub trait BamlType {
    /// How a field of this type is described.
    fn descriptor() -> TypeDescriptor;

    /// Add the named definitions this type depends on.
    ///
    /// Implementations must insert their own definition before registering
    /// field types, so that recursive types terminate.
    fn register(catalog: &mut Catalog) {
        let _ = catalog;
    }
}

/// A named record or enum that can be emitted as a schema root.
pub trait BamlSchema: BamlType {
    /// Qualified name under which the definition is registered.
    fn type_name() -> TypeName;

    /// Schema for this type and everything it references.
    fn to_baml() -> Result<String> {
        Self::to_baml_with(Config::default())
    }

    fn to_baml_with(config: Config) -> Result<String> {
        Schema::new().with::<Self>().to_baml_with(config)
    }

    /// Schema for this type alone, as used for a tool definition.
    fn to_baml_tool() -> Result<String> {
        Self::to_baml_tool_with(Config::default())
    }

    fn to_baml_tool_with(config: Config) -> Result<String> {
        Self::to_baml_with(config.include_dependencies(false))
    }
}

/// Several roots emitted as one document.
///
/// ```ignore
/// let baml = Schema::new().with::<User>().with::<Order>().to_baml()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    catalog: Catalog,
    roots: Vec<TypeName>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `T` as a root.
    pub fn with<T: BamlSchema + ?Sized>(mut self) -> Self {
        self.add::<T>();
        self
    }

    pub fn add<T: BamlSchema + ?Sized>(&mut self) {
        self.catalog.register::<T>();
        let name = T::type_name();
        if !self.roots.contains(&name) {
            self.roots.push(name);
        }
    }

    /// Merge extra member comments, e.g. from [`crate::docs::source::load_comments`].
    pub fn with_comments(mut self, comments: DocTable) -> Self {
        self.catalog.comments_mut().merge(comments);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roots(&self) -> &[TypeName] {
        &self.roots
    }

    pub fn to_baml(&self) -> Result<String> {
        self.to_baml_with(Config::default())
    }

    pub fn to_baml_with(&self, config: Config) -> Result<String> {
        Emitter::new(&self.catalog, config).emit(&self.roots)
    }
}

// ============================================================================
// Std implementations
// ============================================================================

macro_rules! leaf {
    ($descriptor:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl BamlType for $ty {
                fn descriptor() -> TypeDescriptor {
                    $descriptor
                }
            }
        )+
    };
}

leaf!(TypeDescriptor::string() => String, str, char, PathBuf, Path);
leaf!(TypeDescriptor::integer() => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
leaf!(TypeDescriptor::float() => f32, f64);
leaf!(TypeDescriptor::boolean() => bool);
leaf!(TypeDescriptor::null() => ());
leaf!(TypeDescriptor::Primitive(PrimitiveKind::DateTime) => SystemTime);
leaf!(TypeDescriptor::dynamic() => serde_json::Value);

impl BamlType for serde_json::Map<String, serde_json::Value> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::dynamic())
    }
}

impl<T: BamlType> BamlType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }

    fn register(catalog: &mut Catalog) {
        T::register(catalog);
    }
}

macro_rules! transparent {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: BamlType + ?Sized> BamlType for $ty {
                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn register(catalog: &mut Catalog) {
                    T::register(catalog);
                }
            }
        )+
    };
}

transparent!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

macro_rules! sequence {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: BamlType> BamlType for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::array(T::descriptor())
                }

                fn register(catalog: &mut Catalog) {
                    T::register(catalog);
                }
            }
        )+
    };
}

sequence!([T], Vec<T>, VecDeque<T>, BTreeSet<T>);

impl<T: BamlType, const N: usize> BamlType for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn register(catalog: &mut Catalog) {
        T::register(catalog);
    }
}

impl<T: BamlType, S> BamlType for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn register(catalog: &mut Catalog) {
        T::register(catalog);
    }
}

impl<T: BamlType, S> BamlType for IndexSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn register(catalog: &mut Catalog) {
        T::register(catalog);
    }
}

macro_rules! mapping {
    ($($ty:ident<K, V $(, $s:ident)?>),+ $(,)?) => {
        $(
            impl<K: BamlType, V: BamlType $(, $s)?> BamlType for $ty<K, V $(, $s)?> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::map(K::descriptor(), V::descriptor())
                }

                fn register(catalog: &mut Catalog) {
                    K::register(catalog);
                    V::register(catalog);
                }
            }
        )+
    };
}

mapping!(HashMap<K, V, S>, BTreeMap<K, V>, IndexMap<K, V, S>);
