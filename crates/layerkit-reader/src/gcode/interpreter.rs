//! Line-by-line G-code interpretation.
//!
//! The [`Interpreter`] owns all per-parse state: motion, the in-flight path and
//! the layer store. One instance handles exactly one file.

use layerkit_core::LayerError;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::command::{GCommand, MoveParams, LAYER_KEYWORD, TYPE_KEYWORD};
use super::motion::{MotionState, MAX_EXTRUDERS};
use super::segmenter::{Flush, LayerSegmenter, SegmentationMode};
use super::tokenizer::CommandLine;
use crate::layers::{LayerDataBuilder, LineDefaults, LineType};

/// Summary of a finished parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub mode: SegmentationMode,
    pub line_count: usize,
    pub layer_count: usize,
    pub polygon_count: usize,
    /// Paths dropped because they were too short or at Z <= 0
    pub discarded_paths: usize,
}

/// Output of [`Interpreter::finish`]
#[derive(Debug)]
pub struct ParsedLayers {
    pub builder: LayerDataBuilder,
    /// True when negative X/Y coordinates were seen
    pub center_is_zero: bool,
    pub stats: ParseStats,
}

/// Stateful G-code interpreter
#[derive(Debug)]
pub struct Interpreter {
    motion: MotionState,
    segmenter: LayerSegmenter,
    line_count: usize,
}

impl Interpreter {
    pub fn new(mode: SegmentationMode, defaults: LineDefaults) -> Self {
        Self {
            motion: MotionState::new(),
            segmenter: LayerSegmenter::new(mode, defaults),
            line_count: 0,
        }
    }

    pub fn mode(&self) -> SegmentationMode {
        self.segmenter.mode()
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn segmenter(&self) -> &LayerSegmenter {
        &self.segmenter
    }

    /// Lines processed so far
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Interpret one line. Trailing `\r`/`\n` are ignored.
    pub fn process_line(&mut self, raw: &str) -> Result<(), LayerError> {
        self.line_count += 1;
        let line = raw.trim_end_matches(['\r', '\n']);

        if let Some(name) = line.strip_prefix(TYPE_KEYWORD) {
            self.set_type(name);
        }

        if self.mode() == SegmentationMode::Explicit {
            if let Some(payload) = line.strip_prefix(LAYER_KEYWORD) {
                return self.layer_marker(payload);
            }
        }

        let command = CommandLine::new(line);
        if command.is_comment() {
            return Ok(());
        }

        if let Some(code) = command.int("G") {
            self.g_command(code, &command)?;
        }

        if let Some(tool) = command.int("T") {
            self.tool_change(tool)?;
        }

        Ok(())
    }

    /// Run the end-of-file flush and hand over the layer store
    pub fn finish(mut self) -> Result<ParsedLayers, LayerError> {
        let z = self.motion.position().z;
        self.segmenter.finish(z, self.motion.extruder())?;

        let stats = ParseStats {
            mode: self.segmenter.mode(),
            line_count: self.line_count,
            layer_count: self.segmenter.builder().layer_count(),
            polygon_count: self.segmenter.committed(),
            discarded_paths: self.segmenter.discarded(),
        };

        Ok(ParsedLayers {
            center_is_zero: self.motion.center_is_zero(),
            builder: self.segmenter.into_builder(),
            stats,
        })
    }

    fn set_type(&mut self, name: &str) {
        let name = name.trim();
        match LineType::from_type_name(name) {
            Some(line_type) => {
                trace!("Line type {}", line_type);
                self.motion.set_line_type(line_type);
            }
            None => warn!(
                "Encountered a unknown type ({}) while parsing g-code.",
                name
            ),
        }
    }

    fn layer_marker(&mut self, payload: &str) -> Result<(), LayerError> {
        let Ok(index) = payload.trim().parse::<i64>() else {
            warn!("Could not parse layer number: {}", payload.trim());
            return Ok(());
        };
        let z = self.motion.position().z;
        self.segmenter
            .on_layer_marker(index, z, self.motion.extruder())?;
        Ok(())
    }

    fn g_command(&mut self, code: i64, line: &CommandLine<'_>) -> Result<(), LayerError> {
        let command = GCommand::from_code(code);
        let params = MoveParams::from_line(line);

        let Some(outcome) = self.motion.apply(command, &params) else {
            return Ok(());
        };

        self.segmenter.push(outcome.point);
        if outcome.z_changed {
            self.segmenter
                .on_z_change(outcome.previous_z, self.motion.extruder())?;
        }
        Ok(())
    }

    fn tool_change(&mut self, tool: i64) -> Result<(), LayerError> {
        let Ok(extruder) = usize::try_from(tool) else {
            return Ok(());
        };
        if extruder >= MAX_EXTRUDERS {
            warn!("Ignoring tool change to unsupported extruder T{}", extruder);
            return Ok(());
        }

        // The path belongs to the outgoing extruder
        let z = self.motion.position().z;
        let flush = self.segmenter.on_tool_change(z, self.motion.extruder())?;
        if flush == Flush::Discarded {
            trace!("Dropped path on tool change to T{}", extruder);
        }
        self.motion.select_tool(extruder);
        Ok(())
    }
}
