//! Point and color aliases

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Linear RGB color, each channel in `0.0..=1.0`
pub type Color = [f32; 3];

/// The color given to meshes that carry no color of their own (LightGray)
pub const DEFAULT_MESH_COLOR: Color = [211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0];

/// The color used for silhouette edge overlays
pub const EDGE_COLOR: Color = [0.0, 0.0, 0.0];
