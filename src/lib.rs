//! Message Schema Fingerprints
//!
//! Structural identity for message and service schema definitions: a stable
//! fingerprint hash, the canonical text it is computed from, and the
//! transitive set of other definitions a schema depends on.
//!
//! ## Features
//!
//! - **Dependency Resolution**: Depth-first walk over a type registry,
//!   lazily loading and registering definitions that are referenced but not
//!   yet known
//! - **Canonicalization**: Comment- and whitespace-free hash text in which
//!   nested types participate by fingerprint rather than by name
//! - **Fingerprints**: MD5 digests in two schemes: the current canonical
//!   scheme and the legacy raw-text scheme, kept bit-compatible with old
//!   recorded values
//! - **Full-Text Assembly**: One self-contained document embedding every
//!   transitive dependency's definition
//!
//! ## Pipeline
//!
//! ```text
//! Schema --get_dependencies--> DependencyBundle --+--> fingerprint / fingerprint_legacy
//!                                                 +--> full_text
//! ```
//!
//! Two schemas that are structurally identical, regardless of comments,
//! whitespace, or which package re-exports a nested type, produce the same
//! fingerprint, so consumers generated from either definition can be
//! verified interoperable at load time.

pub mod deps;
pub mod error;
pub mod fingerprint;
pub mod fulltext;
pub mod names;
pub mod registry;
pub mod schema;

pub use deps::{get_dependencies, DependencyBundle};
pub use error::{Result, SchemaError};
pub use fingerprint::{fingerprint, fingerprint_legacy, hash_text, Fingerprint};
pub use fulltext::full_text;
pub use registry::{MemoryRegistry, TypeRegistry};
pub use schema::{Constant, Field, MessageSchema, Schema, ServiceSchema};
