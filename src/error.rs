//! Error types for the migration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, transforming or writing content
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Unparseable filename: {name} (expected YYYY-MM[-DD]-slug.ext)")]
    UnparseableFilename { name: String },

    #[error("{} unparseable filename(s): {}", .names.len(), .names.join(", "))]
    InvalidFilenames { names: Vec<String> },

    #[error("Missing front-matter block")]
    MissingFrontMatter,

    #[error("Invalid front-matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    #[error("Front-matter has no title")]
    MissingTitle,

    #[error("Content is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Two files map to the same target: {path:?}")]
    DuplicateTarget { path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
