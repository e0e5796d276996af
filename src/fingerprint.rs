//! Fingerprint computation
//!
//! Canonicalizes a schema's declarations into hash text and digests it into
//! the structural fingerprint consumers compare at load time. The canonical
//! form strips comments and non-semantic whitespace (already absent from
//! the parsed declarations) and replaces every nested non-builtin field
//! type with that type's own recursively computed fingerprint, so renaming
//! or re-exporting a structurally identical nested type leaves the parent
//! fingerprint unchanged.
//!
//! Two schemes exist and are intentionally bit-incompatible:
//! [`fingerprint`] (canonical text) and [`fingerprint_legacy`] (raw
//! concatenated definition text, predating canonicalization). Both remain
//! available so old recorded values stay verifiable.

use std::fmt;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::deps::{get_dependencies, DependencyBundle};
use crate::error::{Result, SchemaError};
use crate::names;
use crate::registry::TypeRegistry;
use crate::schema::{MessageSchema, Schema};

/// MD5 fingerprint of a schema's structural content, lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(digest: Md5) -> Self {
        Self(format!("{:x}", digest.finalize()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Compute the canonical hash text for one message
///
/// Constants come first, in declaration order, as `<type> <name>=<value>`
/// lines. Fields follow in declaration order: builtin types verbatim as
/// `<type> <name>` (array annotations preserved), non-builtin types as
/// `<fingerprint> <name>` with the nested type's dependencies resolved
/// relative to its owning package (falling back to the bundle's package for
/// unqualified references). The trailing newline is stripped.
///
/// For a service, call once with the request and once with the response.
pub fn hash_text(
    registry: &mut dyn TypeRegistry,
    bundle: &DependencyBundle,
    schema: &MessageSchema,
) -> Result<String> {
    let compute_files = bundle.files.is_some();
    let mut buff = String::new();

    for c in &schema.constants {
        buff.push_str(&format!("{} {}={}\n", c.ty, c.name, c.value));
    }
    for field in &schema.fields {
        let base = field.base_type();
        if registry.is_builtin(base) {
            buff.push_str(&format!("{} {}\n", field.ty, field.name));
        } else {
            // the nested type participates by identity, not by name
            let (sub_pkg, _) = names::package_resource_name(base);
            let sub_pkg = if sub_pkg.is_empty() {
                bundle.package.as_str()
            } else {
                sub_pkg
            };
            let sub_schema = registry.get_registered(base, &bundle.package).ok_or_else(
                || SchemaError::UnresolvedType {
                    name: base.to_string(),
                },
            )?;
            let sub_bundle = get_dependencies(
                registry,
                &Schema::Message(sub_schema),
                sub_pkg,
                compute_files,
            )?;
            let sub_md5 = fingerprint(registry, &sub_bundle)?;
            buff.push_str(&format!("{} {}\n", sub_md5, field.name));
        }
    }

    Ok(buff.trim_end_matches('\n').to_string())
}

/// Compute the current-scheme fingerprint for a resolved bundle
///
/// A message digests its canonical hash text. A service digests the
/// request's canonical text then the response's, as two updates to one
/// running digest; request-before-response is a format contract.
pub fn fingerprint(
    registry: &mut dyn TypeRegistry,
    bundle: &DependencyBundle,
) -> Result<Fingerprint> {
    let mut digest = Md5::new();
    match &bundle.spec {
        Schema::Message(m) => {
            digest.update(hash_text(registry, bundle, m)?);
        }
        Schema::Service(s) => {
            digest.update(hash_text(registry, bundle, &s.request)?);
            digest.update(hash_text(registry, bundle, &s.response)?);
        }
    }
    Ok(Fingerprint::from_digest(digest))
}

/// Compute the legacy-scheme fingerprint for a resolved bundle
///
/// Digests the root definition's raw text, then each unique dependency's
/// raw text in `uniquedeps` order. No canonicalization and no field-level
/// substitution: this scheme is whitespace-, comment-, and
/// package-name-sensitive, and is retained only to verify fingerprints
/// recorded before the canonical scheme existed.
pub fn fingerprint_legacy(
    registry: &mut dyn TypeRegistry,
    bundle: &DependencyBundle,
) -> Result<Fingerprint> {
    let mut digest = Md5::new();
    digest.update(bundle.spec.text());
    for d in &bundle.uniquedeps {
        let dep = registry.get_registered(d, &bundle.package).ok_or_else(|| {
            SchemaError::UnresolvedType {
                name: d.to_string(),
            }
        })?;
        digest.update(&dep.text);
    }
    Ok(Fingerprint::from_digest(digest))
}
