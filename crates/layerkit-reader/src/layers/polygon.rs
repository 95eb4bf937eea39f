//! Renderable line strips built from accumulated paths.

use glam::Vec3;
use layerkit_settings::ReaderSettings;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::line_type::LineType;
use crate::gcode::motion::PathPoint;

/// Nominal line dimensions.
///
/// Widths are not derived from extrusion volume: the command stream does not
/// carry enough flow information to do that reliably.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineDefaults {
    /// Width of extruded lines (mm)
    pub extrusion_width: f32,
    /// Width of travel and retraction moves (mm)
    pub travel_width: f32,
    /// Thickness of every line (mm)
    pub line_thickness: f32,
}

impl Default for LineDefaults {
    fn default() -> Self {
        Self {
            extrusion_width: 0.4,
            travel_width: 0.2,
            line_thickness: 0.2,
        }
    }
}

impl From<&ReaderSettings> for LineDefaults {
    fn from(settings: &ReaderSettings) -> Self {
        Self {
            extrusion_width: settings.extrusion_width,
            travel_width: settings.travel_width,
            line_thickness: settings.layer_thickness,
        }
    }
}

impl LineDefaults {
    /// Width used for a segment of the given type
    pub fn width_for(&self, line_type: LineType) -> f32 {
        if line_type.is_move() {
            self.travel_width
        } else {
            self.extrusion_width
        }
    }
}

/// One extruder's line strip within a layer.
///
/// Segment `i` runs from `points[i]` to `points[i + 1]`; the per-segment
/// arrays all have `points.len() - 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPolygon {
    extruder: usize,
    points: Vec<Vec3>,
    line_types: Vec<LineType>,
    line_widths: Vec<f32>,
    line_thicknesses: Vec<f32>,
    bounds: Aabb,
}

impl LayerPolygon {
    /// Minimum number of real points a path needs to form a polygon
    pub const MIN_POINTS: usize = 2;

    /// Build a polygon from a path.
    ///
    /// Returns `None` when fewer than two points carry a real line type.
    /// Points are converted to scene space: `(x, z, -y)`.
    pub fn from_path(extruder: usize, path: &[PathPoint], defaults: &LineDefaults) -> Option<Self> {
        let real_points = path.iter().filter(|p| p.line_type.is_real()).count();
        if real_points < Self::MIN_POINTS {
            return None;
        }

        let points: Vec<Vec3> = path
            .iter()
            .map(|p| Vec3::new(p.x as f32, p.z as f32, -(p.y as f32)))
            .collect();

        let line_types: Vec<LineType> = path.iter().skip(1).map(|p| p.line_type).collect();
        let line_widths = line_types.iter().map(|t| defaults.width_for(*t)).collect();
        let line_thicknesses = vec![defaults.line_thickness; line_types.len()];
        let bounds = Aabb::from_points(&points);

        Some(Self {
            extruder,
            points,
            line_types,
            line_widths,
            line_thicknesses,
            bounds,
        })
    }

    pub fn extruder(&self) -> usize {
        self.extruder
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn line_types(&self) -> &[LineType] {
        &self.line_types
    }

    pub fn line_widths(&self) -> &[f32] {
        &self.line_widths
    }

    pub fn line_thicknesses(&self) -> &[f32] {
        &self.line_thicknesses
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn segment_count(&self) -> usize {
        self.line_types.len()
    }

    /// Number of segments that deposit material
    pub fn extrusion_segment_count(&self) -> usize {
        self.line_types.iter().filter(|t| !t.is_move()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, z: f64, line_type: LineType) -> PathPoint {
        PathPoint { x, y, z, line_type }
    }

    #[test]
    fn test_degenerate_paths_are_discarded() {
        let defaults = LineDefaults::default();
        assert!(LayerPolygon::from_path(0, &[], &defaults).is_none());
        assert!(
            LayerPolygon::from_path(0, &[point(0.0, 0.0, 0.2, LineType::Skin)], &defaults)
                .is_none()
        );

        let mostly_none = [
            point(0.0, 0.0, 0.2, LineType::None),
            point(1.0, 0.0, 0.2, LineType::None),
            point(2.0, 0.0, 0.2, LineType::Skin),
        ];
        assert!(LayerPolygon::from_path(0, &mostly_none, &defaults).is_none());
    }

    #[test]
    fn test_arrays_follow_segments() {
        let path = [
            point(0.0, 0.0, 0.2, LineType::Travel),
            point(10.0, 0.0, 0.2, LineType::OuterWall),
            point(10.0, 10.0, 0.2, LineType::Retraction),
            point(0.0, 10.0, 0.2, LineType::Travel),
        ];
        let polygon = LayerPolygon::from_path(1, &path, &LineDefaults::default()).unwrap();

        assert_eq!(polygon.extruder(), 1);
        assert_eq!(polygon.point_count(), 4);
        assert_eq!(polygon.segment_count(), 3);
        assert_eq!(
            polygon.line_types(),
            &[LineType::OuterWall, LineType::Retraction, LineType::Travel]
        );
        assert_eq!(polygon.line_widths(), &[0.4, 0.2, 0.2]);
        assert_eq!(polygon.line_thicknesses(), &[0.2, 0.2, 0.2]);
        assert_eq!(polygon.extrusion_segment_count(), 1);
    }

    #[test]
    fn test_points_are_in_scene_space() {
        let path = [
            point(1.0, 2.0, 0.3, LineType::Skin),
            point(4.0, 5.0, 0.3, LineType::Skin),
        ];
        let polygon = LayerPolygon::from_path(0, &path, &LineDefaults::default()).unwrap();

        assert_eq!(polygon.points()[0], Vec3::new(1.0, 0.3, -2.0));
        assert_eq!(polygon.points()[1], Vec3::new(4.0, 0.3, -5.0));
        assert_eq!(polygon.bounds().min, Vec3::new(1.0, 0.3, -5.0));
        assert_eq!(polygon.bounds().max, Vec3::new(4.0, 0.3, -2.0));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = LineDefaults {
            extrusion_width: 0.6,
            travel_width: 0.1,
            line_thickness: 0.3,
        };
        let path = [
            point(0.0, 0.0, 0.3, LineType::Infill),
            point(1.0, 0.0, 0.3, LineType::Infill),
            point(2.0, 0.0, 0.3, LineType::Travel),
        ];
        let polygon = LayerPolygon::from_path(0, &path, &defaults).unwrap();
        assert_eq!(polygon.line_widths(), &[0.6, 0.1]);
        assert_eq!(polygon.line_thicknesses(), &[0.3, 0.3]);
    }
}
