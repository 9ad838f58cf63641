//! Label to schema field mapping table.
//!
//! A [`MappingTable`] is built once (from a JSON file or the built-in
//! defaults) and only read afterwards. Hot reloading goes through
//! [`SharedMappingTable`], which swaps whole tables instead of mutating one.

mod defaults;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::MappingError;

use defaults::DEFAULT_MAPPINGS;

/// Immutable lookup from normalized display label to canonical field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<String, String>,
    targets: BTreeSet<String>,
}

impl MappingTable {
    /// Build a table from `(label, field)` pairs. Labels are lowercased and trimmed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(label, field)| (normalize_key(label.as_ref()), field.into()))
            .collect();
        let targets = entries.values().cloned().collect();

        Self { entries, targets }
    }

    /// The built-in benefits-document table.
    pub fn builtin() -> Self {
        Self::from_pairs(DEFAULT_MAPPINGS.iter().copied())
    }

    /// Load a table from a JSON file.
    ///
    /// Accepts either a flat object of `label: field` strings or an object
    /// holding such a map under `"mappings"`.
    pub fn from_file(path: &Path) -> Result<Self, MappingError> {
        let content = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&content, path)?;
        info!("Loaded {} field mappings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a table from JSON text, in the same shapes as [`MappingTable::from_file`].
    pub fn from_json_str(content: &str) -> Result<Self, MappingError> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, MappingError> {
        let parse_error = |reason: String| MappingError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let root: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let object = match root.get("mappings") {
            Some(Value::Object(inner)) => inner,
            _ => root
                .as_object()
                .ok_or_else(|| parse_error("expected a JSON object".to_string()))?,
        };

        let mut pairs = Vec::with_capacity(object.len());
        for (label, field) in object {
            let field = field
                .as_str()
                .ok_or_else(|| parse_error(format!("value for '{}' is not a string", label)))?;
            pairs.push((label.as_str(), field.to_string()));
        }

        if pairs.is_empty() {
            return Err(MappingError::Empty(path.to_path_buf()));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Load a table from `path`, falling back to [`MappingTable::builtin`]
    /// when no path is given or the file cannot be used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("No mapping file configured, using built-in table");
            return Self::builtin();
        };

        match Self::from_file(path) {
            Ok(table) => table,
            Err(e) => {
                warn!("Falling back to built-in mapping table: {}", e);
                Self::builtin()
            }
        }
    }

    /// Canonical field for a label, matched lowercased and trimmed.
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.entries.get(&normalize_key(label)).map(String::as_str)
    }

    /// Whether `field` is one of the table's canonical field names.
    pub fn is_target(&self, field: &str) -> bool {
        self.targets.contains(field)
    }

    /// Canonical field names, sorted and deduplicated.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    /// Entries sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Reloadable handle to the current mapping table.
///
/// Readers take an `Arc` snapshot and keep it for a whole extraction;
/// [`SharedMappingTable::replace`] publishes a new table without touching
/// snapshots already handed out.
#[derive(Debug, Clone)]
pub struct SharedMappingTable {
    current: Arc<RwLock<Arc<MappingTable>>>,
}

impl SharedMappingTable {
    /// Wrap an initial table.
    pub fn new(table: MappingTable) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<MappingTable> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Publish a new table. Returns the table it replaced.
    pub fn replace(&self, table: MappingTable) -> Arc<MappingTable> {
        let next = Arc::new(table);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!("Publishing mapping table with {} entries", next.len());
        std::mem::replace(&mut *guard, next)
    }

    /// Reload from `path` with the same fallback rules as
    /// [`MappingTable::load_or_default`].
    pub fn reload(&self, path: Option<&Path>) -> Arc<MappingTable> {
        self.replace(MappingTable::load_or_default(path))
    }
}

impl Default for SharedMappingTable {
    fn default() -> Self {
        Self::new(MappingTable::builtin())
    }
}
