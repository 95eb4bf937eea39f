//! Tool head and filament tracking.
//!
//! [`MotionState`] interprets linear moves, homing, position resets and tool
//! changes. Every linear move yields a [`PathPoint`] classified as extrusion,
//! retraction or travel.

use tracing::trace;

use super::command::{GCommand, MoveParams};
use crate::layers::LineType;

/// Highest number of extruders tracked; larger `T` indices are ignored
pub const MAX_EXTRUDERS: usize = 64;

/// Tool head location plus cumulative filament feed per extruder
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Filament position per extruder; grows lazily, never shrinks
    pub e: Vec<f64>,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            e: vec![0.0],
        }
    }
}

impl Position {
    /// Filament position of an extruder (0 if it was never seen)
    pub fn filament(&self, extruder: usize) -> f64 {
        self.e.get(extruder).copied().unwrap_or(0.0)
    }

    /// Grow the filament table so `extruder` is addressable
    fn ensure_extruder(&mut self, extruder: usize) {
        if self.e.len() <= extruder {
            self.e.resize(extruder + 1, 0.0);
        }
    }
}

/// A point of the in-flight path.
///
/// `line_type` describes the segment that ends at this point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub line_type: LineType,
}

/// Result of one linear move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub point: PathPoint,
    /// Z before the move
    pub previous_z: f64,
    /// Whether the move changed Z
    pub z_changed: bool,
}

/// Interpreter state that survives between lines
#[derive(Debug, Clone)]
pub struct MotionState {
    position: Position,
    extruder: usize,
    line_type: LineType,
    center_is_zero: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            extruder: 0,
            line_type: LineType::OuterWall,
            center_is_zero: false,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Index of the active extruder
    pub fn extruder(&self) -> usize {
        self.extruder
    }

    /// Print role applied to extrusion moves
    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn set_line_type(&mut self, line_type: LineType) {
        self.line_type = line_type;
    }

    /// Whether any negative X/Y was seen, meaning the origin is at the plate center
    pub fn center_is_zero(&self) -> bool {
        self.center_is_zero
    }

    /// Apply a `G` command. Only linear moves produce an outcome.
    pub fn apply(&mut self, command: GCommand, params: &MoveParams) -> Option<MoveOutcome> {
        if !command.is_recognized() {
            return None;
        }
        if params.has_negative_xy() {
            self.center_is_zero = true;
        }

        match command {
            GCommand::LinearMove => Some(self.linear_move(params)),
            GCommand::Home => {
                self.home(params);
                None
            }
            GCommand::SetPosition => {
                self.set_position(params);
                None
            }
            GCommand::Other(_) => None,
        }
    }

    /// Activate an extruder, growing the filament table if it is new.
    ///
    /// Callers keep `extruder` below [`MAX_EXTRUDERS`].
    pub fn select_tool(&mut self, extruder: usize) {
        trace!("Switching to extruder {}", extruder);
        self.extruder = extruder;
        self.position.ensure_extruder(extruder);
    }

    fn linear_move(&mut self, params: &MoveParams) -> MoveOutcome {
        let current = &self.position;
        let x = params.x.unwrap_or(current.x);
        let y = params.y.unwrap_or(current.y);
        let previous_z = current.z;
        let z = params.z.unwrap_or(current.z);
        let z_changed = params.z.is_some_and(|new_z| new_z != previous_z);

        let mut e = std::mem::take(&mut self.position.e);
        let line_type = match params.e {
            Some(new_e) => {
                let line_type = if new_e > e[self.extruder] {
                    self.line_type
                } else {
                    LineType::Retraction
                };
                e[self.extruder] = new_e;
                line_type
            }
            None => LineType::Travel,
        };

        self.position = Position { x, y, z, e };

        MoveOutcome {
            point: PathPoint { x, y, z, line_type },
            previous_z,
            z_changed,
        }
    }

    fn home(&mut self, params: &MoveParams) {
        let e = std::mem::take(&mut self.position.e);
        self.position = Position {
            x: params.x.unwrap_or(self.position.x),
            y: params.y.unwrap_or(self.position.y),
            z: 0.0,
            e,
        };
    }

    fn set_position(&mut self, params: &MoveParams) {
        let mut e = std::mem::take(&mut self.position.e);
        if let Some(new_e) = params.e {
            e[self.extruder] = new_e;
        }
        self.position = Position {
            x: params.x.unwrap_or(self.position.x),
            y: params.y.unwrap_or(self.position.y),
            z: params.z.unwrap_or(self.position.z),
            e,
        };
    }
}
