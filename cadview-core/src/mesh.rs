//! Renderable mesh data produced by CAD import

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An inclusive range of triangles belonging to one B-rep face
///
/// The tessellation kernel emits a single triangle buffer per shape together
/// with ranges delimiting which triangles approximate which face. `first` and
/// `last` index triangles, not index-buffer entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRange {
    pub first: usize,
    pub last: usize,
    pub color: Option<Color>,
}

impl FaceRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first,
            last,
            color: None,
        }
    }

    /// Number of triangles covered by this range
    pub fn triangle_count(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }
}

/// One renderable tessellated shape
///
/// Meshes imported through the B-rep path carry `face_ranges`; meshes loaded
/// from plain triangle formats (PLY) leave them empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadMesh {
    pub name: String,
    pub positions: Vec<Point3f>,
    pub normals: Option<Vec<Vector3f>>,
    /// Flat triangle list, three entries per triangle
    pub indices: Vec<u32>,
    pub vertex_colors: Option<Vec<[u8; 3]>>,
    /// Shape-wide color reported by the kernel
    pub color: Option<Color>,
    pub face_ranges: Vec<FaceRange>,
}

impl CadMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
            normals: None,
            indices: Vec::new(),
            vertex_colors: None,
            color: None,
            face_ranges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Vertex indices of triangle `i`
    ///
    /// Panics when `i` is out of bounds; use [`CadMesh::validate`] first when
    /// handling untrusted input.
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        [
            self.indices[i * 3],
            self.indices[i * 3 + 1],
            self.indices[i * 3 + 2],
        ]
    }

    /// Check internal consistency of the mesh buffers
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidData(format!(
                "mesh '{}': index buffer length {} is not divisible by 3",
                self.name,
                self.indices.len()
            )));
        }
        let vertex_count = self.positions.len() as u32;
        if let Some(max) = self.indices.iter().max() {
            if *max >= vertex_count {
                return Err(Error::InvalidData(format!(
                    "mesh '{}': index {} out of bounds for {} vertices",
                    self.name, max, vertex_count
                )));
            }
        }
        if let Some(normals) = &self.normals {
            if normals.len() != self.positions.len() {
                return Err(Error::InvalidData(format!(
                    "mesh '{}': {} normals for {} vertices",
                    self.name,
                    normals.len(),
                    self.positions.len()
                )));
            }
        }
        if let Some(colors) = &self.vertex_colors {
            if colors.len() != self.positions.len() {
                return Err(Error::InvalidData(format!(
                    "mesh '{}': {} vertex colors for {} vertices",
                    self.name,
                    colors.len(),
                    self.positions.len()
                )));
            }
        }
        let triangle_count = self.triangle_count();
        for range in &self.face_ranges {
            if range.first > range.last {
                return Err(Error::InvalidData(format!(
                    "mesh '{}': face range {}..={} is reversed",
                    self.name, range.first, range.last
                )));
            }
            if range.last >= triangle_count {
                return Err(Error::InvalidData(format!(
                    "mesh '{}': face range ends at triangle {} but mesh has {}",
                    self.name, range.last, triangle_count
                )));
            }
        }
        Ok(())
    }

    /// Calculate per-triangle face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        (0..self.triangle_count())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                let v0 = self.positions[a as usize];
                let v1 = self.positions[b as usize];
                let v2 = self.positions[c as usize];
                let n = (v1 - v0).cross(&(v2 - v0));
                if n.norm() > 0.0 {
                    n.normalize()
                } else {
                    Vector3f::new(0.0, 0.0, 1.0)
                }
            })
            .collect()
    }
}

/// Line segment positions for a silhouette overlay
///
/// Consecutive pairs of points form one segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeLines {
    pub positions: Vec<Point3f>,
}

impl EdgeLines {
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> CadMesh {
        let mut mesh = CadMesh::new("quad");
        mesh.positions = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ];
        mesh.indices = vec![0, 1, 2, 0, 2, 3];
        mesh
    }

    #[test]
    fn triangle_accessor() {
        let mesh = quad_mesh();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert_eq!(mesh.triangle(1), [0, 2, 3]);
    }

    #[test]
    fn validate_accepts_consistent_mesh() {
        let mut mesh = quad_mesh();
        mesh.face_ranges.push(FaceRange::new(0, 1));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds_index() {
        let mut mesh = quad_mesh();
        mesh.indices[0] = 99;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_rejects_truncated_index_buffer() {
        let mut mesh = quad_mesh();
        mesh.indices.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_rejects_face_range_past_end() {
        let mut mesh = quad_mesh();
        mesh.face_ranges.push(FaceRange::new(0, 2));
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_rejects_mismatched_normals() {
        let mut mesh = quad_mesh();
        mesh.normals = Some(vec![Vector3f::new(0.0, 0.0, 1.0)]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn face_normals_point_up_for_ccw_quad() {
        let mesh = quad_mesh();
        let normals = mesh.calculate_face_normals();
        assert_eq!(normals.len(), 2);
        for n in normals {
            assert!((n.z - 1.0).abs() < 1e-6);
        }
    }
}
