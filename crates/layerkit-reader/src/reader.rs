//! G-code file reader.
//!
//! A read makes two passes over the source. The first pass collects the
//! command echo, counts lines and picks the segmentation mode; the second
//! interprets every line while reporting progress and polling for
//! cancellation.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use glam::Vec3;
use layerkit_core::{
    BuildPlate, CancellationToken, Error, LayerError, NoOpProgress, ProgressReporter, ReaderError,
    Result, Rgba,
};
use layerkit_settings::ReaderSettings;
use tracing::{debug, warn};

use crate::gcode::{Interpreter, SegmentationMode};
use crate::layers::LineDefaults;
use crate::scene::{GcodeList, SceneNode};
use crate::utils::GcodeFileReader;

/// File extensions handled by [`GcodeReader`]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["gcode", "g"];

static NO_PROGRESS: NoOpProgress = NoOpProgress;

/// Collaborators of a single read
#[derive(Clone, Copy)]
pub struct ReadContext<'a> {
    progress: &'a dyn ProgressReporter,
    cancel: Option<&'a CancellationToken>,
    build_plate: &'a dyn BuildPlate,
}

impl<'a> ReadContext<'a> {
    /// Context without progress reporting or cancellation
    pub fn new(build_plate: &'a dyn BuildPlate) -> Self {
        Self {
            progress: &NO_PROGRESS,
            cancel: None,
            build_plate,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancellation(mut self, cancel: &'a CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }
}

impl std::fmt::Debug for ReadContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadContext")
            .field("cancel", &self.cancel)
            .field("build_plate", &self.build_plate.build_plate_size())
            .finish_non_exhaustive()
    }
}

/// Something that can be walked line by line, more than once
trait LineSource {
    /// Name used in log messages
    fn name(&self) -> String;

    fn for_each_line(&self, f: &mut dyn FnMut(&str) -> ControlFlow<()>) -> Result<()>;
}

struct FileSource(GcodeFileReader);

impl LineSource for FileSource {
    fn name(&self) -> String {
        self.0.path().display().to_string()
    }

    fn for_each_line(&self, f: &mut dyn FnMut(&str) -> ControlFlow<()>) -> Result<()> {
        self.0
            .read_lines(|line| f(line))
            .map_err(|e| ReaderError::ReadFailed {
                path: self.0.path().to_path_buf(),
                reason: format!("{:#}", e),
            })?;
        Ok(())
    }
}

struct StrSource<'a>(&'a str);

impl LineSource for StrSource<'_> {
    fn name(&self) -> String {
        "<memory>".to_string()
    }

    fn for_each_line(&self, f: &mut dyn FnMut(&str) -> ControlFlow<()>) -> Result<()> {
        for line in self.0.split_inclusive('\n') {
            if f(line).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Converts G-code into a scene node carrying per-layer line geometry.
///
/// The reader only holds configuration. Every call to [`GcodeReader::read`]
/// starts from a fresh interpreter, so one reader can serve many files.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeReader {
    defaults: LineDefaults,
    color_map: Vec<Rgba>,
}

impl Default for GcodeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GcodeReader {
    pub fn new() -> Self {
        Self::from_settings(&ReaderSettings::default())
    }

    pub fn from_settings(settings: &ReaderSettings) -> Self {
        Self {
            defaults: LineDefaults::from(settings),
            color_map: settings.extruder_colors.clone(),
        }
    }

    pub fn line_defaults(&self) -> &LineDefaults {
        &self.defaults
    }

    pub fn color_map(&self) -> &[Rgba] {
        &self.color_map
    }

    /// Whether the file extension is one this reader handles (case-insensitive)
    pub fn accepts(path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }

    /// Read a G-code file.
    ///
    /// Returns `Ok(None)` when the read was cancelled.
    ///
    /// # Errors
    /// Returns [`Error::Reader`] when the file is missing or unreadable.
    pub fn read(&self, path: impl AsRef<Path>, ctx: ReadContext<'_>) -> Result<Option<SceneNode>> {
        let path: PathBuf = path.as_ref().to_path_buf();
        debug!("Preparing to load {}", path.display());
        let file = GcodeFileReader::new(&path)?;
        self.parse(&FileSource(file), ctx)
    }

    /// Parse G-code held in memory. Same semantics as [`GcodeReader::read`].
    pub fn read_str(&self, text: &str, ctx: ReadContext<'_>) -> Result<Option<SceneNode>> {
        self.parse(&StrSource(text), ctx)
    }

    fn parse(&self, source: &dyn LineSource, ctx: ReadContext<'_>) -> Result<Option<SceneNode>> {
        let name = source.name();
        debug!("Opening file {}", name);

        let mut gcode_list = GcodeList::new();
        source.for_each_line(&mut |line: &str| {
            gcode_list.push(line);
            ControlFlow::Continue(())
        })?;

        let mode = SegmentationMode::detect(&gcode_list);
        let total_lines = gcode_list.len();
        let step = (total_lines / 100).max(1);

        ctx.progress.set_progress(0);
        ctx.progress.show();
        debug!(
            "Parsing {} ({} lines, {} segmentation)",
            name, total_lines, mode
        );

        let mut interpreter = Interpreter::new(mode, self.defaults);
        let mut current_line = 0usize;
        let mut cancelled = false;
        let mut failure: Option<LayerError> = None;

        source.for_each_line(&mut |line: &str| {
            if ctx.is_cancelled() {
                cancelled = true;
                return ControlFlow::Break(());
            }
            current_line += 1;
            if current_line % step == 0 {
                ctx.progress
                    .set_progress(percent(current_line, total_lines));
            }
            match interpreter.process_line(line) {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    failure = Some(e);
                    ControlFlow::Break(())
                }
            }
        })?;

        if let Some(e) = failure {
            ctx.progress.hide();
            return Err(Error::from(e));
        }
        if cancelled || ctx.is_cancelled() {
            debug!("Parsing {} cancelled", name);
            ctx.progress.hide();
            return Ok(None);
        }

        let parsed = interpreter.finish()?;
        let layer_data = parsed.builder.build(self.color_map.clone());

        let mut node = SceneNode::with_placeholder_bounds();
        node.set_gcode_list(gcode_list);

        debug!("Finished parsing {}", name);
        ctx.progress.hide();

        if layer_data.is_empty() {
            warn!("File {} doesn't contain any valid layers", name);
        }

        if !parsed.center_is_zero {
            let (width, depth) = ctx.build_plate.build_plate_size();
            node.set_position(Vec3::new((-width / 2.0) as f32, 0.0, (depth / 2.0) as f32));
        }

        node.set_layer_data(layer_data);
        node.set_parse_stats(parsed.stats);

        debug!("Loaded {}", name);
        Ok(Some(node))
    }
}

fn percent(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((current * 100) / total).min(100) as u8
}
