//! The symbol index consumed by the resolvers.
//!
//! [`SymbolIndex`] is the read-only lookup service that the type resolver,
//! the inheritance resolver and the variable classifier are written
//! against.  A miss is a normal `None`, never an error.
//!
//! [`SymbolTable`] is the in-memory implementation: one map per symbol kind
//! behind a `parking_lot` read/write lock, descriptors shared through `Arc`
//! so a lookup never copies a whole class.  An indexer fills it, calls
//! [`SymbolTable::mark_indexing_complete`], and from then on any number of
//! threads may resolve against it concurrently.
//!
//! A table can be persisted to and restored from a JSON snapshot
//! ([`IndexSnapshot`]); type sets are stored in their text encoding.
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::type_expr::TypeSet;
use crate::types::{ClassInfo, ConstantInfo, FunctionInfo};
use crate::util::{normalize_name, normalize_var_name};

/// Read-only symbol lookups.
///
/// Implementations are expected to be safe for concurrent readers once
/// indexing has completed; the resolvers take no locks of their own.
pub trait SymbolIndex {
    /// Look up a class or interface.
    fn get_class(&self, name: &str) -> Option<Arc<ClassInfo>>;
    /// Look up a trait.
    fn get_trait(&self, name: &str) -> Option<Arc<ClassInfo>>;
    /// Look up a free function.
    fn get_function(&self, name: &str) -> Option<Arc<FunctionInfo>>;
    /// The declared type of a global variable.
    fn get_global_var_type(&self, name: &str) -> Option<TypeSet>;
    /// Look up a global constant.
    fn get_constant(&self, name: &str) -> Option<Arc<ConstantInfo>>;
    /// Whether the whole program has been indexed.
    fn is_indexing_complete(&self) -> bool;
}

/// Errors raised while loading or saving a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to access index snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid index snapshot {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid index snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialisable form of a whole [`SymbolTable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexSnapshot {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub traits: Vec<ClassInfo>,
    #[serde(default)]
    pub functions: Vec<FunctionInfo>,
    #[serde(default)]
    pub global_vars: BTreeMap<String, TypeSet>,
    #[serde(default)]
    pub constants: Vec<ConstantInfo>,
    /// A snapshot is normally taken of a finished index.
    #[serde(default = "default_true")]
    pub indexing_complete: bool,
}

fn default_true() -> bool {
    true
}

/// In-memory, thread-safe [`SymbolIndex`].
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: RwLock<HashMap<String, Arc<ClassInfo>>>,
    traits: RwLock<HashMap<String, Arc<ClassInfo>>>,
    functions: RwLock<HashMap<String, Arc<FunctionInfo>>>,
    global_vars: RwLock<HashMap<String, TypeSet>>,
    constants: RwLock<HashMap<String, Arc<ConstantInfo>>>,
    indexing_complete: AtomicBool,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Population ─────────────────────────────────────────────────────────

    /// Add a class or interface, replacing any previous entry of that name.
    pub fn insert_class(&self, class: ClassInfo) {
        let key = normalize_name(&class.name).to_string();
        self.classes.write().insert(key, Arc::new(class));
    }

    pub fn insert_trait(&self, trait_info: ClassInfo) {
        let key = normalize_name(&trait_info.name).to_string();
        self.traits.write().insert(key, Arc::new(trait_info));
    }

    pub fn insert_function(&self, function: FunctionInfo) {
        let key = normalize_name(&function.name).to_string();
        self.functions.write().insert(key, Arc::new(function));
    }

    /// Record the declared type of a global variable (`$` prefix optional).
    pub fn insert_global_var(&self, name: &str, type_info: TypeSet) {
        let key = normalize_var_name(name).to_string();
        self.global_vars.write().insert(key, type_info);
    }

    pub fn insert_constant(&self, constant: ConstantInfo) {
        let key = normalize_name(&constant.name).to_string();
        self.constants.write().insert(key, Arc::new(constant));
    }

    /// Signal that every file has been indexed.
    pub fn mark_indexing_complete(&self) {
        self.indexing_complete.store(true, Ordering::Release);
    }

    // ─── Snapshots ──────────────────────────────────────────────────────────

    /// Capture the current contents, sorted by name for stable output.
    pub fn snapshot(&self) -> IndexSnapshot {
        fn sorted<T: Clone>(map: &HashMap<String, Arc<T>>) -> Vec<T> {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries.into_iter().map(|(_, v)| T::clone(v)).collect()
        }

        IndexSnapshot {
            classes: sorted(&self.classes.read()),
            traits: sorted(&self.traits.read()),
            functions: sorted(&self.functions.read()),
            global_vars: self
                .global_vars
                .read()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            constants: sorted(&self.constants.read()),
            indexing_complete: self.is_indexing_complete(),
        }
    }

    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        let table = SymbolTable::new();
        for class in snapshot.classes {
            table.insert_class(class);
        }
        for trait_info in snapshot.traits {
            table.insert_trait(trait_info);
        }
        for function in snapshot.functions {
            table.insert_function(function);
        }
        for (name, type_info) in snapshot.global_vars {
            table.insert_global_var(&name, type_info);
        }
        for constant in snapshot.constants {
            table.insert_constant(constant);
        }
        if snapshot.indexing_complete {
            table.mark_indexing_complete();
        }
        table
    }

    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let snapshot: IndexSnapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot previously written by [`SymbolTable::save_json`].
    pub fn load_json(path: &Path) -> Result<Self, IndexError> {
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: IndexSnapshot =
            serde_json::from_str(&content).map_err(|source| IndexError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            classes = snapshot.classes.len(),
            traits = snapshot.traits.len(),
            functions = snapshot.functions.len(),
            "loaded index snapshot"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(&self.snapshot()).map_err(|source| {
            IndexError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SymbolIndex for SymbolTable {
    fn get_class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.classes.read().get(normalize_name(name)).cloned()
    }

    fn get_trait(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.traits.read().get(normalize_name(name)).cloned()
    }

    fn get_function(&self, name: &str) -> Option<Arc<FunctionInfo>> {
        self.functions.read().get(normalize_name(name)).cloned()
    }

    fn get_global_var_type(&self, name: &str) -> Option<TypeSet> {
        self.global_vars.read().get(normalize_var_name(name)).cloned()
    }

    fn get_constant(&self, name: &str) -> Option<Arc<ConstantInfo>> {
        self.constants.read().get(normalize_name(name)).cloned()
    }

    fn is_indexing_complete(&self) -> bool {
        self.indexing_complete.load(Ordering::Acquire)
    }
}
