//! Silhouette edge extraction for tessellated B-rep faces
//!
//! A tessellation kernel approximates each B-rep face as a patch of triangles
//! inside one shared triangle buffer. Edges interior to a face's patch are
//! shared by exactly two of its triangles; edges on the face boundary are
//! not. Filtering triangle edges by occurrence parity within each face
//! recovers the face-boundary silhouette that gets drawn as a wireframe
//! overlay on top of the shaded mesh.

use crate::error::{Error, Result};
use crate::mesh::{CadMesh, EdgeLines, FaceRange};
use std::collections::HashMap;

/// Unordered vertex pair used to key an edge
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Boundary edges of one face's triangle patch
///
/// Walks triangles `range.first..=range.last` of the flat index buffer and
/// keeps the edges that occur an odd number of times within the range. An
/// edge shared by two triangles of the face is internal and dropped; an edge
/// covered three times by a degenerate fan toggles back in. Parity, not
/// pair counting, decides survival.
///
/// Surviving edges keep their first-seen orientation and are returned in
/// deterministic order: triangle order, then edge order within the triangle.
pub fn face_boundary_edges(indices: &[u32], range: &FaceRange) -> Result<Vec<[u32; 2]>> {
    if indices.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "index buffer length {} is not divisible by 3",
            indices.len()
        )));
    }
    let triangle_count = indices.len() / 3;
    if range.first > range.last {
        return Err(Error::InvalidData(format!(
            "face range {}..={} is reversed",
            range.first, range.last
        )));
    }
    if range.last >= triangle_count {
        return Err(Error::InvalidData(format!(
            "face range ends at triangle {} but buffer has {}",
            range.last, triangle_count
        )));
    }

    let mut parity: HashMap<(u32, u32), bool> = HashMap::new();
    for t in range.first..=range.last {
        let tri = &indices[t * 3..t * 3 + 3];
        for e in 0..3 {
            let key = edge_key(tri[e], tri[(e + 1) % 3]);
            let entry = parity.entry(key).or_insert(false);
            *entry = !*entry;
        }
    }

    let mut out = Vec::new();
    for t in range.first..=range.last {
        let tri = &indices[t * 3..t * 3 + 3];
        for e in 0..3 {
            let a = tri[e];
            let b = tri[(e + 1) % 3];
            // Remove on first emission so each surviving edge appears once
            if parity.remove(&edge_key(a, b)) == Some(true) {
                out.push([a, b]);
            }
        }
    }
    Ok(out)
}

/// Boundary edges of a whole mesh treated as one triangle patch
///
/// The same parity filter applied across the full index buffer; for a closed
/// mesh this yields nothing, for an open one it yields the open border.
pub fn mesh_boundary_edges(mesh: &CadMesh) -> Result<Vec<[u32; 2]>> {
    let triangle_count = mesh.triangle_count();
    if triangle_count == 0 {
        if mesh.indices.is_empty() {
            return Ok(Vec::new());
        }
        return Err(Error::InvalidData(format!(
            "index buffer length {} is not divisible by 3",
            mesh.indices.len()
        )));
    }
    let range = FaceRange::new(0, triangle_count - 1);
    face_boundary_edges(&mesh.indices, &range)
}

/// Silhouette overlay for a tessellated B-rep shape
///
/// Runs the per-face parity filter over every face range and resolves the
/// surviving edges to vertex positions, two points per segment. The same
/// geometric edge shared by two *different* faces is kept once per face;
/// this duplication is what draws the boundary between faces. Meshes without
/// face ranges (plain triangle imports) yield an empty overlay.
pub fn extract_silhouette_edges(mesh: &CadMesh) -> Result<EdgeLines> {
    let mut lines = EdgeLines::default();
    for face in &mesh.face_ranges {
        for [a, b] in face_boundary_edges(&mesh.indices, face)? {
            let pa = mesh.positions.get(a as usize).ok_or_else(|| {
                Error::InvalidData(format!(
                    "mesh '{}': edge vertex {} out of bounds",
                    mesh.name, a
                ))
            })?;
            let pb = mesh.positions.get(b as usize).ok_or_else(|| {
                Error::InvalidData(format!(
                    "mesh '{}': edge vertex {} out of bounds",
                    mesh.name, b
                ))
            })?;
            lines.positions.push(*pa);
            lines.positions.push(*pb);
        }
    }
    Ok(lines)
}
