//! Grid and axes helper geometry
//!
//! Descriptors for the reference grid and the axes marker drawn under the
//! model, sized from the scene bounding box. Both emit plain line-segment
//! positions; rendering them is the backend's job.

use cadview_core::{Aabb, Point3f, Vector3f};

/// Grid lines are spaced every 10 model units
pub const GRID_SPACING: f32 = 10.0;

const DEFAULT_GRID_DIVISIONS: u32 = 20;
const DEFAULT_AXES_LENGTH: f32 = 50.0;

/// A square reference grid in the XZ plane
#[derive(Debug, Clone)]
pub struct GridPlane {
    /// Full side length of the grid
    pub extent: f32,
    /// Number of cells along each side
    pub divisions: u32,
    pub origin: Point3f,
    pub visible: bool,
}

impl GridPlane {
    /// Resize the grid to sit under a bounding box, keeping cells at
    /// [`GRID_SPACING`] so the grid doubles as a scale reference
    pub fn fit(&mut self, aabb: &Aabb) {
        let largest = aabb.largest_dim();
        if largest > 0.0 {
            self.divisions = 2 * (largest / GRID_SPACING).ceil() as u32;
            self.extent = GRID_SPACING * self.divisions as f32;
        }
        let center = aabb.center();
        self.origin = Point3f::new(center.x, aabb.min.y, center.z);
    }

    /// Line-segment positions, two points per segment
    pub fn line_positions(&self) -> Vec<Point3f> {
        let half = self.extent / 2.0;
        let step = self.extent / self.divisions as f32;
        let mut positions = Vec::with_capacity(((self.divisions + 1) * 4) as usize);
        for i in 0..=self.divisions {
            let offset = -half + i as f32 * step;
            // Line parallel to X
            positions.push(self.origin + Vector3f::new(-half, 0.0, offset));
            positions.push(self.origin + Vector3f::new(half, 0.0, offset));
            // Line parallel to Z
            positions.push(self.origin + Vector3f::new(offset, 0.0, -half));
            positions.push(self.origin + Vector3f::new(offset, 0.0, half));
        }
        positions
    }
}

impl Default for GridPlane {
    fn default() -> Self {
        Self {
            extent: GRID_SPACING * DEFAULT_GRID_DIVISIONS as f32,
            divisions: DEFAULT_GRID_DIVISIONS,
            origin: Point3f::origin(),
            visible: true,
        }
    }
}

/// Origin axes marker: one segment along each of +X, +Y, +Z
#[derive(Debug, Clone)]
pub struct AxesMarker {
    pub length: f32,
    pub origin: Point3f,
    pub visible: bool,
}

impl AxesMarker {
    /// Match the marker to a bounding box: axis length equals the largest
    /// dimension, anchored under the box center like the grid
    pub fn fit(&mut self, aabb: &Aabb) {
        let largest = aabb.largest_dim();
        if largest > 0.0 {
            self.length = largest;
        }
        let center = aabb.center();
        self.origin = Point3f::new(center.x, aabb.min.y, center.z);
    }

    /// Line-segment positions, two points per axis
    pub fn line_positions(&self) -> Vec<Point3f> {
        vec![
            self.origin,
            self.origin + Vector3f::new(self.length, 0.0, 0.0),
            self.origin,
            self.origin + Vector3f::new(0.0, self.length, 0.0),
            self.origin,
            self.origin + Vector3f::new(0.0, 0.0, self.length),
        ]
    }
}

impl Default for AxesMarker {
    fn default() -> Self {
        Self {
            length: DEFAULT_AXES_LENGTH,
            origin: Point3f::origin(),
            visible: true,
        }
    }
}
