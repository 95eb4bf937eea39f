//! # LayerKit Core
//!
//! Core types, traits, and utilities for LayerKit.
//! Provides the error taxonomy and the collaborator contracts the reader
//! consumes: progress reporting, cancellation and build plate dimensions.

pub mod error;
pub mod machine;
pub mod progress;
pub mod types;

pub use error::{Error, LayerError, ReaderError, Result};
pub use machine::{BuildPlate, PlateSize};
pub use progress::{CallbackProgress, CancellationToken, NoOpProgress, ProgressReporter};
pub use types::{ProgressCallback, Rgba};
