//! Scene flattening: turning the node tree into renderer-ready batches

use bytemuck::{Pod, Zeroable};
use cadview_core::{
    Aabb, Bounded, CadMesh, CadNode, Color, EdgeLines, DEFAULT_MESH_COLOR, EDGE_COLOR,
};

/// One shaded-triangle vertex, laid out for direct GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// One line vertex, laid out for direct GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Non-indexed triangle soup for one mesh
#[derive(Debug, Clone, Default)]
pub struct MeshBatch {
    pub vertices: Vec<MeshVertex>,
}

/// Line segments, two vertices per segment
#[derive(Debug, Clone, Default)]
pub struct LineBatch {
    pub vertices: Vec<LineVertex>,
}

/// Everything a renderer backend needs for one frame of the scene
#[derive(Debug, Clone, Default)]
pub struct SceneFlattened {
    pub meshes: Vec<MeshBatch>,
    pub edges: Vec<LineBatch>,
    /// Box around the selected geometry, drawn as a highlight
    pub selection_box: Option<Aabb>,
}

/// Expand a mesh into a non-indexed batch
///
/// Color priority per vertex: explicit vertex colors, then the color of the
/// B-rep face range covering the triangle, then the shape color, then the
/// default gray. Missing normals are computed flat per triangle.
///
/// Panics when index or attribute buffers are inconsistent; run
/// [`CadMesh::validate`] first when handling untrusted input (the import
/// paths already do).
pub fn mesh_batch(mesh: &CadMesh) -> MeshBatch {
    let triangle_count = mesh.triangle_count();

    // Per-triangle face-range color overrides
    let mut range_colors: Vec<Option<Color>> = vec![None; triangle_count];
    for range in &mesh.face_ranges {
        if let Some(color) = range.color {
            for slot in range_colors
                .iter_mut()
                .take(range.last + 1)
                .skip(range.first)
            {
                *slot = Some(color);
            }
        }
    }

    enum NormalSource<'a> {
        PerVertex(&'a [cadview_core::Vector3f]),
        PerFace(Vec<cadview_core::Vector3f>),
    }
    let normals = match &mesh.normals {
        Some(n) => NormalSource::PerVertex(n),
        None => NormalSource::PerFace(mesh.calculate_face_normals()),
    };

    let mut vertices = Vec::with_capacity(triangle_count * 3);
    for t in 0..triangle_count {
        let tri = mesh.triangle(t);
        let tri_color = range_colors[t]
            .or(mesh.color)
            .unwrap_or(DEFAULT_MESH_COLOR);
        for &v in &tri {
            let v = v as usize;
            let position = mesh.positions[v];
            let normal = match &normals {
                NormalSource::PerVertex(per_vertex) => per_vertex[v],
                NormalSource::PerFace(per_face) => per_face[t],
            };
            let color = mesh
                .vertex_colors
                .as_ref()
                .map(|colors| {
                    let c = colors[v];
                    [
                        c[0] as f32 / 255.0,
                        c[1] as f32 / 255.0,
                        c[2] as f32 / 255.0,
                    ]
                })
                .unwrap_or(tri_color);
            vertices.push(MeshVertex {
                position: [position.x, position.y, position.z],
                normal: [normal.x, normal.y, normal.z],
                color,
            });
        }
    }
    MeshBatch { vertices }
}

/// Turn a silhouette overlay into a black line batch
pub fn line_batch(edges: &EdgeLines) -> LineBatch {
    LineBatch {
        vertices: edges
            .positions
            .iter()
            .map(|p| LineVertex {
                position: [p.x, p.y, p.z],
                color: EDGE_COLOR,
            })
            .collect(),
    }
}

/// Flatten the visible part of the scene graph into render batches
///
/// Invisible subtrees are skipped entirely. Meshes of selected visible
/// nodes additionally accumulate into the selection highlight box.
pub fn flatten_scene(nodes: &[CadNode]) -> SceneFlattened {
    let mut out = SceneFlattened::default();
    for node in nodes {
        node.visit_visible(&mut |n| {
            for mesh in &n.meshes {
                out.meshes.push(mesh_batch(mesh));
                if n.selected {
                    if let Some(aabb) = mesh.bounding_box() {
                        out.selection_box = Some(match out.selection_box {
                            Some(acc) => acc.union(&aabb),
                            None => aabb,
                        });
                    }
                }
            }
            for edges in &n.edge_lines {
                out.edges.push(line_batch(edges));
            }
        });
    }
    out
}
