//! # LayerKit Reader
//!
//! Turns 3-D printer G-code into per-layer line geometry.
//!
//! The pipeline is: [`gcode::tokenizer`] extracts parameters from each line,
//! [`gcode::motion`] tracks the tool head and classifies moves,
//! [`gcode::segmenter`] cuts the move stream into layers and
//! [`layers`] turns each layer's path into renderable polygons. [`GcodeReader`]
//! drives the whole thing and returns a [`SceneNode`].

pub mod gcode;
pub mod layers;
pub mod reader;
pub mod scene;
pub mod utils;

pub use gcode::{ParseStats, SegmentationMode};
pub use layers::{Aabb, Layer, LayerData, LayerDataBuilder, LayerPolygon, LineDefaults, LineType};
pub use reader::{GcodeReader, ReadContext, SUPPORTED_EXTENSIONS};
pub use scene::{GcodeList, NodeBounds, SceneNode};
pub use utils::{FileEncoding, FileReadStats, GcodeFileReader};
