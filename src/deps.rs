//! Dependency Resolution
//!
//! Walks a schema's field types depth-first over a [`TypeRegistry`],
//! lazily loading and registering definitions that are referenced but not
//! yet known, and accumulates the transitive dependency set as a
//! [`DependencyBundle`].

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::names;
use crate::registry::TypeRegistry;
use crate::schema::{MessageSchema, Schema};

/// The resolved transitive dependencies of a single schema
///
/// `deps` preserves duplicates: a type appears once per reference edge that
/// reaches it, in first-discovery (pre-order, depth-first) order.
/// `uniquedeps` is the same list with duplicates removed, first occurrence
/// winning. All entries are package-qualified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyBundle {
    /// The root schema the bundle was resolved for
    pub spec: Schema,
    /// Package context unqualified dependency names were resolved against
    pub package: String,
    /// Dependency type names in discovery order, with duplicates
    pub deps: Vec<String>,
    /// `deps` deduplicated, first-occurrence order preserved
    pub uniquedeps: Vec<String>,
    /// Backing definition file per unique dependency, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<HashMap<String, PathBuf>>,
}

/// Resolve the transitive dependencies of a schema
///
/// For a message, walks its field types in declaration order; for a
/// service, walks the request then the response. Builtin types contribute
/// no dependency. A referenced type that is not yet registered is loaded
/// through the registry and registered under its returned key before the
/// walk recurses into it: the registration is deliberately visible to
/// subsequent calls on the same registry.
///
/// Unqualified references are recorded qualified by `package`, the
/// caller-supplied context, at every recursion depth.
///
/// Fails with [`SchemaError::UnresolvedType`] when a referenced type is
/// neither builtin nor loadable.
pub fn get_dependencies(
    registry: &mut dyn TypeRegistry,
    schema: &Schema,
    package: &str,
    compute_files: bool,
) -> Result<DependencyBundle> {
    let mut deps = Vec::new();
    match schema {
        Schema::Message(m) => add_msg_depends(registry, m, package, &mut deps)?,
        Schema::Service(s) => {
            add_msg_depends(registry, &s.request, package, &mut deps)?;
            add_msg_depends(registry, &s.response, package, &mut deps)?;
        }
    }

    let mut uniquedeps: Vec<String> = Vec::new();
    for d in &deps {
        if !uniquedeps.contains(d) {
            uniquedeps.push(d.clone());
        }
    }

    let files = if compute_files {
        let mut files = HashMap::new();
        for d in &uniquedeps {
            let (d_pkg, res) = names::package_resource_name(d);
            let d_pkg = if d_pkg.is_empty() { package } else { d_pkg };
            files.insert(d.clone(), registry.msg_file(d_pkg, res));
        }
        Some(files)
    } else {
        None
    };

    Ok(DependencyBundle {
        spec: schema.clone(),
        package: package.to_string(),
        deps,
        uniquedeps,
        files,
    })
}

/// One level of the depth-first dependency walk
///
/// Appends each non-builtin field type before recursing into its
/// definition. Recursion keeps the outermost caller's package context so
/// unqualified references nested arbitrarily deep resolve against it.
fn add_msg_depends(
    registry: &mut dyn TypeRegistry,
    schema: &MessageSchema,
    package_context: &str,
    deps: &mut Vec<String>,
) -> Result<()> {
    debug!(schema = %schema.full_name(), package = package_context, "resolving dependencies");
    for field in &schema.fields {
        let base = field.base_type();
        if registry.is_builtin(base) {
            continue;
        }
        let dep_schema = if registry.is_registered(base) {
            deps.push(names::qualify(base, package_context));
            registry
                .get_registered(base, package_context)
                .ok_or_else(|| SchemaError::UnresolvedType {
                    name: base.to_string(),
                })?
        } else {
            let (key, loaded) = registry.load_by_type(base, package_context)?;
            deps.push(key.clone());
            registry.register(&key, loaded.clone());
            loaded
        };
        add_msg_depends(registry, &dep_schema, package_context, deps)?;
    }
    Ok(())
}
