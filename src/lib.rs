//! # LayerKit
//!
//! Reads 3-D printer G-code into layered line geometry for visualization:
//! ordered polygons per printed layer, tagged with their print role (walls,
//! skin, skirt, support, infill, travel, retraction), plus per-layer height
//! and thickness.
//!
//! ## Architecture
//!
//! LayerKit is organized as a workspace with multiple crates:
//!
//! 1. **layerkit-core** - Error types and the collaborator traits (progress,
//!    cancellation, build plate)
//! 2. **layerkit-settings** - Machine and reader configuration, JSON/TOML files
//! 3. **layerkit-reader** - Tokenizer, motion tracking, layer segmentation,
//!    layer geometry and the `GcodeReader` entry point
//! 4. **layerkit** - This facade: re-exports and logging setup
//!
//! ## Example
//!
//! ```no_run
//! use layerkit::{Config, GcodeReader, ReadContext};
//!
//! let config = Config::default();
//! let reader = GcodeReader::from_settings(&config.reader);
//! let node = reader.read("part.gcode", ReadContext::new(&config.machine))?;
//! if let Some(node) = node {
//!     println!("{} layers", node.layer_data().map_or(0, |d| d.layer_count()));
//! }
//! # Ok::<(), layerkit::Error>(())
//! ```

use std::path::Path;

pub use layerkit_core::{
    BuildPlate, CallbackProgress, CancellationToken, Error, LayerError, NoOpProgress, PlateSize,
    ProgressReporter, ReaderError, Result, Rgba,
};

pub use layerkit_settings::{
    Config, ConfigError, MachineSettings, ReaderSettings, SettingsError, SettingsResult,
};

pub use layerkit_reader::{
    Aabb, FileEncoding, FileReadStats, GcodeFileReader, GcodeList, GcodeReader, Layer, LayerData,
    LayerDataBuilder, LayerPolygon, LineDefaults, LineType, NodeBounds, ParseStats, ReadContext,
    SceneNode, SegmentationMode, SUPPORTED_EXTENSIONS,
};

pub use layerkit_reader::{gcode, layers};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Read a file with the reader and machine settings of `config`.
///
/// Returns `Ok(None)` if `cancel` was triggered during the read.
pub fn load_file(
    path: impl AsRef<Path>,
    config: &Config,
    progress: &dyn ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Option<SceneNode>> {
    let reader = GcodeReader::from_settings(&config.reader);
    let ctx = ReadContext::new(&config.machine)
        .with_progress(progress)
        .with_cancellation(cancel);
    reader.read(path, ctx)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
