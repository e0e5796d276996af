//! Error types for schema resolution and fingerprinting

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema resolution and fingerprinting errors
///
/// All failures are unrecoverable at this crate's level: either the full
/// bundle/fingerprint/text is produced, or nothing is. Nothing is retried.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Cannot load type {name}. Perhaps the package is missing a dependency.")]
    UnresolvedType { name: String },

    #[error("Failed to load definition for {name}: {reason}")]
    LoadFailure { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
