//! Layer segmentation.
//!
//! Decides when the in-flight path becomes a committed layer. Files that carry
//! `;LAYER:` markers are segmented by those markers; other files are segmented
//! by Z changes and tool changes.

use layerkit_core::LayerError;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::command::LAYER_KEYWORD;
use super::motion::PathPoint;
use crate::layers::{LayerDataBuilder, LayerPolygon, LineDefaults};

/// How layer boundaries are found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentationMode {
    /// Boundaries come from `;LAYER:<n>` markers
    Explicit,
    /// Boundaries are inferred from Z changes and tool changes
    Inferred,
}

impl SegmentationMode {
    /// Pick the mode for a file: explicit as soon as one line is a layer marker
    pub fn detect<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if lines.into_iter().any(|line| is_layer_marker(line.as_ref())) {
            Self::Explicit
        } else {
            Self::Inferred
        }
    }
}

impl std::fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Inferred => write!(f, "inferred"),
        }
    }
}

/// True if the line starts with `;LAYER:`
pub fn is_layer_marker(line: &str) -> bool {
    line.starts_with(LAYER_KEYWORD)
}

/// Outcome of closing the in-flight path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// A polygon was stored in the current layer
    Committed,
    /// The path was dropped
    Discarded,
    /// The mode does not flush on this event
    Skipped,
}

/// Accumulates path points and commits them to the layer store
#[derive(Debug)]
pub struct LayerSegmenter {
    mode: SegmentationMode,
    defaults: LineDefaults,
    builder: LayerDataBuilder,
    path: Vec<PathPoint>,
    layer_index: i64,
    previous_committed_z: f64,
    committed: usize,
    discarded: usize,
}

impl LayerSegmenter {
    pub fn new(mode: SegmentationMode, defaults: LineDefaults) -> Self {
        Self {
            mode,
            defaults,
            builder: LayerDataBuilder::new(),
            path: Vec::new(),
            layer_index: 0,
            previous_committed_z: 0.0,
            committed: 0,
            discarded: 0,
        }
    }

    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Index the next commit goes to
    pub fn layer_index(&self) -> i64 {
        self.layer_index
    }

    pub fn path(&self) -> &[PathPoint] {
        &self.path
    }

    pub fn builder(&self) -> &LayerDataBuilder {
        &self.builder
    }

    /// Polygons committed so far
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Paths dropped so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn push(&mut self, point: PathPoint) {
        self.path.push(point);
    }

    /// Called after the point of a Z-changing move was pushed.
    ///
    /// In inferred mode the points before it are flushed at `previous_z` and
    /// the Z-changing point starts the next path.
    pub fn on_z_change(&mut self, previous_z: f64, extruder: usize) -> Result<Flush, LayerError> {
        if self.mode == SegmentationMode::Explicit {
            return Ok(Flush::Skipped);
        }
        let carry = self.path.pop();
        let flush = self.flush_inferred(previous_z, extruder)?;
        self.path.extend(carry);
        Ok(flush)
    }

    /// Called before the active extruder changes; `extruder` is the outgoing one.
    ///
    /// A path shorter than two points is dropped here even though it may be
    /// the tail of a layer.
    pub fn on_tool_change(&mut self, z: f64, extruder: usize) -> Result<Flush, LayerError> {
        if self.mode == SegmentationMode::Explicit {
            return Ok(Flush::Skipped);
        }
        self.flush_inferred(z, extruder)
    }

    /// Called for `;LAYER:<index>` in explicit mode
    pub fn on_layer_marker(
        &mut self,
        index: i64,
        z: f64,
        extruder: usize,
    ) -> Result<Flush, LayerError> {
        if self.mode == SegmentationMode::Inferred {
            return Ok(Flush::Skipped);
        }
        let path = std::mem::take(&mut self.path);
        let flush = self.commit(&path, z, extruder)?;
        trace!(
            "Layer marker {} closed layer {}: {:?}",
            index, self.layer_index, flush
        );
        self.layer_index = index;
        Ok(flush)
    }

    /// Called once after the last line
    pub fn finish(&mut self, z: f64, extruder: usize) -> Result<Flush, LayerError> {
        match self.mode {
            SegmentationMode::Explicit => {
                self.path.clear();
                Ok(Flush::Skipped)
            }
            SegmentationMode::Inferred => self.flush_inferred(z, extruder),
        }
    }

    /// Hand over the layer store
    pub fn into_builder(self) -> LayerDataBuilder {
        self.builder
    }

    fn flush_inferred(&mut self, z: f64, extruder: usize) -> Result<Flush, LayerError> {
        let path = std::mem::take(&mut self.path);
        let flush = if path.len() >= LayerPolygon::MIN_POINTS && z > 0.0 {
            self.commit(&path, z, extruder)?
        } else {
            self.discard(&path)
        };
        if flush == Flush::Committed {
            self.layer_index += 1;
        }
        Ok(flush)
    }

    fn commit(
        &mut self,
        path: &[PathPoint],
        triggering_z: f64,
        extruder: usize,
    ) -> Result<Flush, LayerError> {
        let Some(polygon) = LayerPolygon::from_path(extruder, path, &self.defaults) else {
            return Ok(self.discard(path));
        };

        let index = self.layer_index;
        self.builder.add_layer(index);
        self.builder.set_layer_height(index, path[0].z)?;
        self.builder
            .set_layer_thickness(index, triggering_z - self.previous_committed_z)?;
        self.builder.add_polygon(index, polygon)?;

        trace!(
            "Committed {} points to layer {} at z={}",
            path.len(),
            index,
            triggering_z
        );
        self.previous_committed_z = triggering_z;
        self.committed += 1;
        Ok(Flush::Committed)
    }

    /// Drop a path; only non-empty paths are counted
    fn discard(&mut self, path: &[PathPoint]) -> Flush {
        if !path.is_empty() {
            self.discarded += 1;
        }
        Flush::Discarded
    }
}
