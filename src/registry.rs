//! Type Registry
//!
//! The shared, append-only store of known type definitions that dependency
//! resolution reads from and lazily populates. The resolver only ever needs
//! the [`TypeRegistry`] seam; [`MemoryRegistry`] is the in-memory
//! implementation used by tests and by callers that assemble their
//! definitions up front.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::names;
use crate::schema::MessageSchema;

/// Registry of type definitions consulted during dependency resolution
///
/// The contract is "read-if-present, else load-and-register": `load_by_type`
/// produces a definition without registering it, and the resolver performs
/// the `register` call as an explicit, observable side effect. Entries are
/// never removed or mutated once registered.
pub trait TypeRegistry {
    /// Whether a type name is a builtin primitive (never expanded, never a
    /// dependency)
    fn is_builtin(&self, type_name: &str) -> bool;

    /// Whether a definition is registered under exactly this key
    fn is_registered(&self, type_name: &str) -> bool;

    /// Look up a registered definition, resolving unqualified names relative
    /// to `context_package`
    fn get_registered(&self, type_name: &str, context_package: &str) -> Option<MessageSchema>;

    /// Load a definition that is not yet registered
    ///
    /// Returns the registry key the definition should be registered under
    /// (always package-qualified) together with the definition itself. Fails
    /// when the type cannot be found on this registry's search path.
    fn load_by_type(
        &mut self,
        type_name: &str,
        context_package: &str,
    ) -> Result<(String, MessageSchema)>;

    /// Register a definition under a key
    fn register(&mut self, key: &str, schema: MessageSchema);

    /// Backing definition file path for a type
    fn msg_file(&self, package: &str, base_type: &str) -> PathBuf;
}

/// In-memory [`TypeRegistry`]
///
/// Holds three maps: the builtin name set (supplied by the caller; this
/// crate does not decide what counts as a primitive), the registered
/// definitions, and a pending set of loadable-but-not-yet-registered
/// definitions that stands in for on-disk lookup. Keeping loadable entries
/// separate lets tests assert exactly which types a resolution call
/// registered.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    builtins: HashSet<String>,
    registered: HashMap<String, MessageSchema>,
    pending: HashMap<String, MessageSchema>,
    root: PathBuf,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given builtin primitive names
    pub fn with_builtins<I, S>(builtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            builtins: builtins.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the root directory that `msg_file` paths are synthesized under
    pub fn set_root(&mut self, root: impl AsRef<Path>) {
        self.root = root.as_ref().to_path_buf();
    }

    pub fn add_builtin(&mut self, name: impl Into<String>) {
        self.builtins.insert(name.into());
    }

    /// Register a definition directly (already-known type)
    pub fn insert(&mut self, key: impl Into<String>, schema: MessageSchema) {
        self.registered.insert(key.into(), schema);
    }

    /// Make a definition loadable without registering it
    ///
    /// The definition only enters the registered set when a resolution walk
    /// reaches it and registers it.
    pub fn insert_loadable(&mut self, key: impl Into<String>, schema: MessageSchema) {
        self.pending.insert(key.into(), schema);
    }
}

impl TypeRegistry for MemoryRegistry {
    fn is_builtin(&self, type_name: &str) -> bool {
        self.builtins.contains(type_name)
    }

    fn is_registered(&self, type_name: &str) -> bool {
        self.registered.contains_key(type_name)
    }

    fn get_registered(&self, type_name: &str, context_package: &str) -> Option<MessageSchema> {
        if let Some(schema) = self.registered.get(type_name) {
            return Some(schema.clone());
        }
        let (pkg, res) = names::package_resource_name(type_name);
        if pkg.is_empty() && !context_package.is_empty() {
            // unqualified reference: resolve relative to the caller's package
            return self
                .registered
                .get(&names::qualify(res, context_package))
                .cloned();
        }
        if pkg == context_package {
            // qualified reference to a type registered under its local name
            return self.registered.get(res).cloned();
        }
        None
    }

    fn load_by_type(
        &mut self,
        type_name: &str,
        context_package: &str,
    ) -> Result<(String, MessageSchema)> {
        let qualified = names::qualify(type_name, context_package);
        if let Some(schema) = self.pending.get(&qualified) {
            debug!(key = %qualified, "loaded pending definition");
            return Ok((qualified, schema.clone()));
        }
        if let Some(schema) = self.pending.get(type_name) {
            debug!(key = %type_name, "loaded pending definition");
            return Ok((type_name.to_string(), schema.clone()));
        }
        // unqualified names resolve against the referencing context only,
        // never across packages, matching get_registered
        Err(SchemaError::UnresolvedType {
            name: type_name.to_string(),
        })
    }

    fn register(&mut self, key: &str, schema: MessageSchema) {
        self.registered.insert(key.to_string(), schema);
    }

    fn msg_file(&self, package: &str, base_type: &str) -> PathBuf {
        self.root
            .join(package)
            .join("msg")
            .join(format!("{}.msg", base_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> MessageSchema {
        MessageSchema::new("geom", "Point", vec![], vec![], "float64 x\nfloat64 y")
    }

    #[test]
    fn test_load_does_not_register() {
        let mut registry = MemoryRegistry::new();
        registry.insert_loadable("geom/Point", point());

        let (key, _) = registry.load_by_type("Point", "geom").unwrap();
        assert_eq!(key, "geom/Point");
        assert!(!registry.is_registered("geom/Point"));

        let (_, schema) = registry.load_by_type("geom/Point", "geom").unwrap();
        registry.register("geom/Point", schema);
        assert!(registry.is_registered("geom/Point"));
    }

    #[test]
    fn test_get_registered_unqualified_context() {
        let mut registry = MemoryRegistry::new();
        registry.insert("geom/Point", point());
        assert!(registry.get_registered("Point", "geom").is_some());
        assert!(registry.get_registered("Point", "other").is_none());
    }

    #[test]
    fn test_load_never_crosses_packages() {
        let mut registry = MemoryRegistry::new();
        registry.insert_loadable("other/Point", point());

        // an unqualified name qualifies against the referencing context only
        let err = registry.load_by_type("Point", "app").unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedType { name } if name == "Point"));
        assert!(registry.load_by_type("Point", "other").is_ok());
        assert!(registry.load_by_type("other/Point", "app").is_ok());
    }

    #[test]
    fn test_load_missing_type_fails() {
        let mut registry = MemoryRegistry::new();
        let err = registry.load_by_type("Missing", "geom").unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedType { name } if name == "Missing"));
    }

    #[test]
    fn test_msg_file_path() {
        let mut registry = MemoryRegistry::new();
        registry.set_root("/srv/defs");
        assert_eq!(
            registry.msg_file("geom", "Point"),
            PathBuf::from("/srv/defs/geom/msg/Point.msg")
        );
    }
}
