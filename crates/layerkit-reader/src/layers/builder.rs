//! Mutable layer store used while a file is being parsed.

use layerkit_core::{LayerError, Rgba};
use std::collections::BTreeMap;
use tracing::trace;

use super::data::{Layer, LayerData};
use super::polygon::LayerPolygon;

/// Owns the layer records of a parse, keyed by layer index.
///
/// A record must exist before anything is stored in it; addressing a missing
/// index is reported as [`LayerError::UnknownLayer`].
#[derive(Debug, Default)]
pub struct LayerDataBuilder {
    layers: BTreeMap<i64, Layer>,
}

impl LayerDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record for `index` if none exists. Returns true when created.
    pub fn add_layer(&mut self, index: i64) -> bool {
        if self.layers.contains_key(&index) {
            return false;
        }
        trace!("Creating layer {}", index);
        self.layers.insert(index, Layer::new(index));
        true
    }

    pub fn has_layer(&self, index: i64) -> bool {
        self.layers.contains_key(&index)
    }

    pub fn layer(&self, index: i64) -> Option<&Layer> {
        self.layers.get(&index)
    }

    pub fn set_layer_height(&mut self, index: i64, height: f64) -> Result<(), LayerError> {
        self.layer_mut(index)?.set_height(height);
        Ok(())
    }

    pub fn set_layer_thickness(&mut self, index: i64, thickness: f64) -> Result<(), LayerError> {
        self.layer_mut(index)?.set_thickness(thickness);
        Ok(())
    }

    pub fn add_polygon(&mut self, index: i64, polygon: LayerPolygon) -> Result<(), LayerError> {
        self.layer_mut(index)?.push_polygon(polygon);
        Ok(())
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.layers.values().map(Layer::polygon_count).sum()
    }

    /// Freeze the layers together with the extruder color table
    pub fn build(self, color_map: Vec<Rgba>) -> LayerData {
        LayerData::new(self.layers, color_map)
    }

    fn layer_mut(&mut self, index: i64) -> Result<&mut Layer, LayerError> {
        self.layers
            .get_mut(&index)
            .ok_or(LayerError::UnknownLayer { index })
    }
}
