//! Error types for the dump pipeline.

use std::path::PathBuf;

use schemadump_core::dump::LimitParseError;

/// Errors that can occur while dumping a schema.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// Database error during introspection or row fetching.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The output directory could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A migration artifact could not be written.
    #[error("Failed to write migration file '{path}': {source}")]
    ArtifactWrite {
        /// Path of the artifact that failed to write.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The `--limit` value could not be parsed.
    #[error("{0}")]
    Limit(#[from] LimitParseError),
}

/// Result type for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;
