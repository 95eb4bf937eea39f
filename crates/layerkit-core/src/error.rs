//! Error handling for LayerKit
//!
//! Provides the error types shared by all crates in the workspace:
//! - Layer store errors (construct-before-insert violations)
//! - Reader errors (file access)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Malformed G-code is never an error: the reader recovers from it locally.

use std::path::PathBuf;
use thiserror::Error;

/// Layer store error type
///
/// Raised when geometry is addressed to a layer record that was never created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// No layer record exists for the index
    #[error("Layer {index} does not exist")]
    UnknownLayer {
        /// The layer index that was addressed.
        index: i64,
    },
}

/// Reader error type
///
/// Represents failures to access the G-code source.
#[derive(Error, Debug, Clone)]
pub enum ReaderError {
    /// The file does not exist
    #[error("File does not exist: {}", path.display())]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The path exists but is not a regular file
    #[error("Path is not a file: {}", path.display())]
    NotAFile {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The file could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    ReadFailed {
        /// The path being read.
        path: PathBuf,
        /// The underlying failure.
        reason: String,
    },
}

/// Main error type for LayerKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Layer store error
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// Reader error
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

impl Error {
    /// Check if this is a reader error
    pub fn is_reader_error(&self) -> bool {
        matches!(self, Error::Reader(_))
    }

    /// Check if this is a layer store error
    pub fn is_layer_error(&self) -> bool {
        matches!(self, Error::Layer(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
