//! Building the CAD scene tree from a kernel tessellation result

use crate::kernel::{KernelMesh, KernelNode, KernelResult, TessellationKernel};
use crate::FileFormat;
use cadview_core::{
    extract_silhouette_edges, CadMesh, CadNode, Error, FaceRange, Point3f, Result, Vector3f,
};
use std::path::Path;

/// Dispatch raw file bytes to the matching kernel reader
pub fn read_kernel_file(
    data: &[u8],
    format: FileFormat,
    kernel: &dyn TessellationKernel,
) -> Result<KernelResult> {
    match format {
        FileFormat::Step => kernel.read_step(data),
        FileFormat::Iges => kernel.read_iges(data),
        FileFormat::Brep => kernel.read_brep(data),
        FileFormat::Ply => Err(Error::UnsupportedFormat(
            "PLY is not a kernel format".to_string(),
        )),
    }
}

fn convert_mesh(kernel_mesh: &KernelMesh) -> Result<CadMesh> {
    let flat = &kernel_mesh.attributes.position.array;
    if flat.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "mesh '{}': position buffer length {} is not divisible by 3",
            kernel_mesh.name,
            flat.len()
        )));
    }
    let mut mesh = CadMesh::new(kernel_mesh.name.clone());
    mesh.positions = flat
        .chunks_exact(3)
        .map(|c| Point3f::new(c[0], c[1], c[2]))
        .collect();
    if let Some(normals) = &kernel_mesh.attributes.normal {
        if normals.array.len() != flat.len() {
            return Err(Error::InvalidData(format!(
                "mesh '{}': {} normal components for {} position components",
                kernel_mesh.name,
                normals.array.len(),
                flat.len()
            )));
        }
        mesh.normals = Some(
            normals
                .array
                .chunks_exact(3)
                .map(|c| Vector3f::new(c[0], c[1], c[2]))
                .collect(),
        );
    }
    mesh.indices = kernel_mesh.index.array.clone();
    mesh.color = kernel_mesh.color;
    mesh.face_ranges = kernel_mesh
        .brep_faces
        .iter()
        .map(|f| FaceRange {
            first: f.first,
            last: f.last,
            color: f.color,
        })
        .collect();
    mesh.validate()?;
    Ok(mesh)
}

fn convert_node(node: &KernelNode, meshes: &[KernelMesh]) -> Result<CadNode> {
    let mut cad_node = CadNode::new(node.name.clone());
    for &mesh_index in &node.meshes {
        let kernel_mesh = meshes.get(mesh_index).ok_or_else(|| {
            Error::InvalidData(format!(
                "node '{}' references mesh {} but result has {}",
                node.name,
                mesh_index,
                meshes.len()
            ))
        })?;
        let mesh = convert_mesh(kernel_mesh)?;
        cad_node.edge_lines.push(extract_silhouette_edges(&mesh)?);
        cad_node.meshes.push(mesh);
    }
    for child in &node.children {
        cad_node.children.push(convert_node(child, meshes)?);
    }
    Ok(cad_node)
}

/// Convert a kernel result into a scene-graph subtree
///
/// Each referenced kernel mesh becomes a [`CadMesh`] with its silhouette
/// overlay already extracted. The kernel's root node usually carries no
/// useful name, so the returned root is renamed to `root_name` (by
/// convention the imported file's name).
pub fn build_cad_tree(result: &KernelResult, root_name: &str) -> Result<CadNode> {
    if !result.success {
        return Err(Error::Kernel(format!(
            "kernel failed to read '{}'",
            root_name
        )));
    }
    let mut root = convert_node(&result.root, &result.meshes)?;
    root.name = root_name.to_string();
    Ok(root)
}

/// Import a STEP/IGES/BREP file into a scene-graph subtree
pub fn import_brep_file<P: AsRef<Path>>(
    path: P,
    kernel: &dyn TessellationKernel,
) -> Result<CadNode> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path).ok_or_else(|| {
        Error::UnsupportedFormat(format!("unrecognized extension: {}", path.display()))
    })?;
    let data = std::fs::read(path)?;
    let result = read_kernel_file(&data, format, kernel)?;
    let root_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    build_cad_tree(&result, &root_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{KernelAttributes, KernelBuffer, KernelFaceRange};
    use cadview_core::Bounded;

    fn quad_kernel_mesh(name: &str) -> KernelMesh {
        KernelMesh {
            name: name.to_string(),
            color: Some([0.8, 0.1, 0.1]),
            brep_faces: vec![KernelFaceRange {
                first: 0,
                last: 1,
                color: None,
            }],
            attributes: KernelAttributes {
                position: KernelBuffer {
                    array: vec![
                        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
                    ],
                },
                normal: Some(KernelBuffer {
                    array: vec![
                        0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
                    ],
                }),
            },
            index: KernelBuffer {
                array: vec![0, 1, 2, 0, 2, 3],
            },
        }
    }

    fn assembly_result() -> KernelResult {
        KernelResult {
            success: true,
            root: KernelNode {
                name: String::new(),
                meshes: vec![],
                children: vec![
                    KernelNode {
                        name: "bracket".to_string(),
                        meshes: vec![0],
                        children: vec![],
                    },
                    KernelNode {
                        name: "housing".to_string(),
                        meshes: vec![1],
                        children: vec![],
                    },
                ],
            },
            meshes: vec![quad_kernel_mesh("bracket-shape"), quad_kernel_mesh("housing-shape")],
        }
    }

    #[test]
    fn builds_tree_with_renamed_root() {
        let tree = build_cad_tree(&assembly_result(), "model.step").unwrap();
        assert_eq!(tree.name, "model.step");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name, "bracket");
        assert_eq!(tree.mesh_count(), 2);
        assert!(tree.visible);
        assert!(!tree.selected);
    }

    #[test]
    fn converted_mesh_carries_color_and_ranges() {
        let tree = build_cad_tree(&assembly_result(), "model.step").unwrap();
        let mesh = &tree.children[0].meshes[0];
        assert_eq!(mesh.color, Some([0.8, 0.1, 0.1]));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face_ranges.len(), 1);
        assert!(mesh.normals.is_some());
        assert!(mesh.bounding_box().is_some());
    }

    #[test]
    fn silhouette_extracted_per_mesh() {
        let tree = build_cad_tree(&assembly_result(), "model.step").unwrap();
        let edges = &tree.children[0].edge_lines[0];
        // Quad face: diagonal removed, four outer edges remain
        assert_eq!(edges.segment_count(), 4);
    }

    #[test]
    fn failed_kernel_result_is_an_error() {
        let mut result = assembly_result();
        result.success = false;
        match build_cad_tree(&result, "broken.igs") {
            Err(Error::Kernel(_)) => {}
            other => panic!("expected kernel error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn dangling_mesh_reference_is_an_error() {
        let mut result = assembly_result();
        result.root.children[0].meshes = vec![7];
        assert!(build_cad_tree(&result, "model.step").is_err());
    }

    #[test]
    fn corrupt_position_buffer_is_an_error() {
        let mut result = assembly_result();
        result.meshes[0].attributes.position.array.pop();
        assert!(build_cad_tree(&result, "model.step").is_err());
    }

    #[test]
    fn ply_is_not_a_kernel_format() {
        struct NoKernel;
        impl TessellationKernel for NoKernel {
            fn read_step(&self, _: &[u8]) -> Result<KernelResult> {
                unreachable!()
            }
            fn read_iges(&self, _: &[u8]) -> Result<KernelResult> {
                unreachable!()
            }
            fn read_brep(&self, _: &[u8]) -> Result<KernelResult> {
                unreachable!()
            }
        }
        assert!(read_kernel_file(b"", FileFormat::Ply, &NoKernel).is_err());
    }
}
