//! Type aliases for commonly used complex types.
//!
//! Gives meaningful names to the boxed closure types passed between the
//! reader and its callers.

/// A progress callback receiving the completed percentage (`0..=100`).
pub type ProgressCallback = Box<dyn Fn(u8) + Send + Sync>;

/// An RGBA color with components in `0.0..=1.0`.
pub type Rgba = [f32; 4];
