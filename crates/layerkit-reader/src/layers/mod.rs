//! Layer geometry: line types, polygons, the layer store and the finalized
//! geometry artifact.

pub mod bounds;
pub mod builder;
pub mod data;
pub mod line_type;
pub mod polygon;

pub use bounds::Aabb;
pub use builder::LayerDataBuilder;
pub use data::{Layer, LayerData, FALLBACK_COLOR};
pub use line_type::LineType;
pub use polygon::{LayerPolygon, LineDefaults};
