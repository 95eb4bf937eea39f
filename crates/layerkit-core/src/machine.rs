//! Machine description consumed by the reader.

/// Source of the printer's build plate dimensions.
///
/// Both values are in millimetres and expected to be positive.
pub trait BuildPlate {
    /// Returns `(width, depth)` of the build plate
    fn build_plate_size(&self) -> (f64, f64);
}

/// Fixed build plate dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateSize {
    /// Plate width along X (mm)
    pub width: f64,
    /// Plate depth along Y (mm)
    pub depth: f64,
}

impl PlateSize {
    /// Create a plate of the given size
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }
}

impl BuildPlate for PlateSize {
    fn build_plate_size(&self) -> (f64, f64) {
        (self.width, self.depth)
    }
}

impl<T: BuildPlate + ?Sized> BuildPlate for &T {
    fn build_plate_size(&self) -> (f64, f64) {
        (**self).build_plate_size()
    }
}
