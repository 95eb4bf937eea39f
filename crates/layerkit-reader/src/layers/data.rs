//! Finalized layer geometry handed to renderers.

use layerkit_core::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bounds::Aabb;
use super::polygon::LayerPolygon;

/// Color returned for extruders beyond the configured table
pub const FALLBACK_COLOR: Rgba = [0.0, 0.0, 0.0, 0.0];

/// One committed slice of geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    index: i64,
    height: f64,
    thickness: f64,
    polygons: Vec<LayerPolygon>,
}

impl Layer {
    pub fn new(index: i64) -> Self {
        Self {
            index,
            height: 0.0,
            thickness: 0.0,
            polygons: Vec::new(),
        }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    /// Z of the first point of the layer's path (mm)
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance to the previously committed layer (mm), never negative
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn polygons(&self) -> &[LayerPolygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn point_count(&self) -> usize {
        self.polygons.iter().map(LayerPolygon::point_count).sum()
    }

    pub(crate) fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    pub(crate) fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness.abs();
    }

    pub(crate) fn push_polygon(&mut self, polygon: LayerPolygon) {
        self.polygons.push(polygon);
    }
}

/// Immutable geometry for a whole file: every layer plus the extruder colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    layers: BTreeMap<i64, Layer>,
    color_map: Vec<Rgba>,
}

impl LayerData {
    pub(crate) fn new(layers: BTreeMap<i64, Layer>, color_map: Vec<Rgba>) -> Self {
        Self { layers, color_map }
    }

    /// Layers in ascending index order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn layer(&self, index: i64) -> Option<&Layer> {
        self.layers.get(&index)
    }

    pub fn layer_indices(&self) -> Vec<i64> {
        self.layers.keys().copied().collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn polygon_count(&self) -> usize {
        self.layers.values().map(Layer::polygon_count).sum()
    }

    pub fn color_map(&self) -> &[Rgba] {
        &self.color_map
    }

    /// Color of an extruder, or [`FALLBACK_COLOR`] past the end of the table
    pub fn color_for(&self, extruder: usize) -> Rgba {
        self.color_map
            .get(extruder)
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Bounds of all polygons, or the null box when there is no geometry
    pub fn bounds(&self) -> Aabb {
        let bounds = self
            .layers
            .values()
            .flat_map(|layer| layer.polygons.iter())
            .fold(Aabb::empty(), |acc, polygon| acc.union(&polygon.bounds()));

        if bounds.is_valid() {
            bounds
        } else {
            Aabb::null_box()
        }
    }

    /// Serialize the geometry for an out-of-process renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
