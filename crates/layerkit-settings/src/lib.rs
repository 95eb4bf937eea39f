//! # LayerKit Settings
//!
//! Configuration for the G-code layer reader: build plate dimensions,
//! nominal line widths and the extruder color table.
//! Settings persist as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, MachineSettings, ReaderSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
