//! G-code interpretation: tokenizing, motion tracking and layer segmentation.

pub mod command;
pub mod interpreter;
pub mod motion;
pub mod segmenter;
pub mod tokenizer;

pub use command::{GCommand, MoveParams, LAYER_KEYWORD, TYPE_KEYWORD};
pub use interpreter::{Interpreter, ParseStats, ParsedLayers};
pub use motion::{MotionState, MoveOutcome, PathPoint, Position, MAX_EXTRUDERS};
pub use segmenter::{is_layer_marker, Flush, LayerSegmenter, SegmentationMode};
pub use tokenizer::{CommandLine, COMMENT_CHAR};
