//! Scene node produced by a successful read.
//!
//! The node carries the layer geometry and the verbatim command echo. Its
//! bounds are a fixed placeholder box because layer geometry is decoded lazily
//! by renderers; callers that want real bounds can ask the geometry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::gcode::ParseStats;
use crate::layers::{Aabb, LayerData};

/// Bounding box of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeBounds {
    /// Derived from the node's geometry
    Computed(Aabb),
    /// Fixed box standing in for geometry that is not measured
    Placeholder(Aabb),
}

impl NodeBounds {
    pub fn aabb(&self) -> Aabb {
        match self {
            NodeBounds::Computed(aabb) | NodeBounds::Placeholder(aabb) => *aabb,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, NodeBounds::Placeholder(_))
    }
}

/// The input program, line by line, terminators included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcodeList(Vec<String>);

impl GcodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Reassemble the original text
    pub fn to_text(&self) -> String {
        self.0.concat()
    }
}

impl From<Vec<String>> for GcodeList {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl<'a> IntoIterator for &'a GcodeList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A node in the host's 3-D scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    position: Vec3,
    bounds: NodeBounds,
    layer_data: Option<LayerData>,
    gcode_list: Option<GcodeList>,
    parse_stats: Option<ParseStats>,
}

impl SceneNode {
    /// Node whose bounds are the fixed `[0,0,0]..[10,10,10]` box
    pub fn with_placeholder_bounds() -> Self {
        Self::new(NodeBounds::Placeholder(Aabb::null_box()))
    }

    /// Node with known bounds
    pub fn with_bounds(bounds: Aabb) -> Self {
        Self::new(NodeBounds::Computed(bounds))
    }

    fn new(bounds: NodeBounds) -> Self {
        Self {
            position: Vec3::ZERO,
            bounds,
            layer_data: None,
            gcode_list: None,
            parse_stats: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn bounds(&self) -> NodeBounds {
        self.bounds
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bounds.aabb()
    }

    pub fn layer_data(&self) -> Option<&LayerData> {
        self.layer_data.as_ref()
    }

    pub fn set_layer_data(&mut self, layer_data: LayerData) {
        self.layer_data = Some(layer_data);
    }

    pub fn gcode_list(&self) -> Option<&GcodeList> {
        self.gcode_list.as_ref()
    }

    pub fn set_gcode_list(&mut self, gcode_list: GcodeList) {
        self.gcode_list = Some(gcode_list);
    }

    pub fn parse_stats(&self) -> Option<&ParseStats> {
        self.parse_stats.as_ref()
    }

    pub fn set_parse_stats(&mut self, stats: ParseStats) {
        self.parse_stats = Some(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_bounds() {
        let node = SceneNode::with_placeholder_bounds();
        assert!(node.bounds().is_placeholder());
        assert_eq!(node.bounding_box().min, Vec3::ZERO);
        assert_eq!(node.bounding_box().max, Vec3::splat(10.0));
        assert_eq!(node.position(), Vec3::ZERO);
        assert!(node.layer_data().is_none());
        assert!(node.gcode_list().is_none());
    }

    #[test]
    fn test_computed_bounds() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let node = SceneNode::with_bounds(aabb);
        assert!(!node.bounds().is_placeholder());
        assert_eq!(node.bounding_box(), aabb);
    }

    #[test]
    fn test_gcode_list_round_trips_text() {
        let mut list = GcodeList::new();
        list.push("G28\n");
        list.push("G1 X1\r\n");
        list.push(";end");

        assert_eq!(list.len(), 3);
        assert_eq!(list.to_text(), "G28\nG1 X1\r\n;end");
        assert_eq!(list.iter().next().map(String::as_str), Some("G28\n"));
    }
}
