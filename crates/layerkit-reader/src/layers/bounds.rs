//! Axis-aligned bounding boxes for layer geometry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Edge length of the box reported when there is no geometry to measure
pub const NULL_BOX_SIZE: f32 = 10.0;

/// Axis-aligned bounding box in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that becomes valid once a point is included
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    /// Fixed `[0, 0, 0]..[10, 10, 10]` box used when nothing can be measured
    pub fn null_box() -> Self {
        Self::new(Vec3::ZERO, Vec3::splat(NULL_BOX_SIZE))
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.include(*point);
        }
        bounds
    }

    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            // A single flat layer has min.y == max.y
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    pub fn size(&self) -> Vec3 {
        if self.is_valid() {
            self.max - self.min
        } else {
            Vec3::ZERO
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
