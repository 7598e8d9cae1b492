//! PLY import
//!
//! PLY files carry plain triangle soup with no B-rep structure, so they load
//! as a single-mesh leaf node without face ranges or silhouette overlays.

use cadview_core::{CadMesh, CadNode, Error, Point3f, Result, Vector3f};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DEFAULT_VERTEX_COLOR: [u8; 3] = [211, 211, 211];

fn property_f32(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(format!(
            "property '{}' not found or invalid type",
            name
        ))),
    }
}

fn property_channel(element: &DefaultElement, name: &str) -> Option<u8> {
    match element.get(name)? {
        Property::UChar(val) => Some(*val),
        Property::Int(val) => Some((*val).clamp(0, 255) as u8),
        Property::Float(val) => Some((val.clamp(0.0, 1.0) * 255.0) as u8),
        _ => None,
    }
}

fn face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListInt(indices)) => Ok(indices.iter().map(|&i| i as usize).collect()),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&i| i as usize).collect()),
        Some(Property::ListUChar(indices)) => Ok(indices.iter().map(|&i| i as usize).collect()),
        _ => Err(Error::InvalidData("face indices not found".to_string())),
    }
}

/// Read a PLY file into a single-mesh scene node named after the file
///
/// Positions are required. Normals (`nx`/`ny`/`nz`) and vertex colors
/// (`red`/`green`/`blue`) are picked up when every vertex carries them;
/// files without colors get the default light gray per vertex. Polygonal
/// faces are fan-triangulated.
pub fn read_ply_node<P: AsRef<Path>>(path: P) -> Result<CadNode> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let parser = Parser::<DefaultElement>::new();
    let ply = parser.read_ply(&mut reader)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut mesh = CadMesh::new(file_name.clone());
    let mut normals = Vec::new();
    let mut colors = Vec::new();
    let mut has_normals = true;
    let mut has_colors = true;

    if let Some(vertices) = ply.payload.get("vertex") {
        for vertex in vertices {
            mesh.positions.push(Point3f::new(
                property_f32(vertex, "x")?,
                property_f32(vertex, "y")?,
                property_f32(vertex, "z")?,
            ));
            if has_normals {
                match (
                    property_f32(vertex, "nx"),
                    property_f32(vertex, "ny"),
                    property_f32(vertex, "nz"),
                ) {
                    (Ok(nx), Ok(ny), Ok(nz)) => normals.push(Vector3f::new(nx, ny, nz)),
                    _ => has_normals = false,
                }
            }
            if has_colors {
                match (
                    property_channel(vertex, "red"),
                    property_channel(vertex, "green"),
                    property_channel(vertex, "blue"),
                ) {
                    (Some(r), Some(g), Some(b)) => colors.push([r, g, b]),
                    _ => has_colors = false,
                }
            }
        }
    }
    if mesh.positions.is_empty() {
        return Err(Error::InvalidData(format!(
            "'{}' contains no vertices",
            file_name
        )));
    }

    if let Some(faces) = ply.payload.get("face") {
        for face in faces {
            let indices = face_indices(face)?;
            // Fan-triangulate polygons
            for i in 1..indices.len().saturating_sub(1) {
                mesh.indices.push(indices[0] as u32);
                mesh.indices.push(indices[i] as u32);
                mesh.indices.push(indices[i + 1] as u32);
            }
        }
    }

    if has_normals && normals.len() == mesh.positions.len() {
        mesh.normals = Some(normals);
    }
    mesh.vertex_colors = Some(if has_colors && colors.len() == mesh.positions.len() {
        colors
    } else {
        vec![DEFAULT_VERTEX_COLOR; mesh.positions.len()]
    });
    mesh.validate()?;

    let mut node = CadNode::new(file_name);
    node.meshes.push(mesh);
    Ok(node)
}
