//! Tessellation kernel boundary
//!
//! B-rep tessellation is not implemented here; an external geometry kernel
//! turns STEP/IGES/BREP data into triangle buffers plus per-face ranges and
//! an assembly node tree. This module pins down that result as a serde
//! schema (field names fixed by the kernel's JSON output) and the
//! [`TessellationKernel`] trait the import path is written against.

use cadview_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::FileFormat;

/// One B-rep face's inclusive triangle range inside a mesh buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelFaceRange {
    pub first: usize,
    pub last: usize,
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

/// A flat numeric buffer as the kernel serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelBuffer<T> {
    pub array: Vec<T>,
}

/// Vertex attribute buffers of one tessellated shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelAttributes {
    pub position: KernelBuffer<f32>,
    #[serde(default)]
    pub normal: Option<KernelBuffer<f32>>,
}

/// One tessellated shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelMesh {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<[f32; 3]>,
    #[serde(default)]
    pub brep_faces: Vec<KernelFaceRange>,
    pub attributes: KernelAttributes,
    pub index: KernelBuffer<u32>,
}

/// A node of the kernel's assembly tree, referencing meshes by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meshes: Vec<usize>,
    #[serde(default)]
    pub children: Vec<KernelNode>,
}

/// Everything the kernel reports for one imported file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelResult {
    pub success: bool,
    pub root: KernelNode,
    pub meshes: Vec<KernelMesh>,
}

impl KernelResult {
    /// Parse a kernel result from its JSON serialization
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| Error::InvalidData(format!("kernel result: {}", e)))
    }
}

/// The seam to the external geometry kernel
///
/// Implementations hand raw file bytes to whatever kernel frontend is
/// available (a WASM module, a subprocess, native bindings) and return its
/// tessellation result.
pub trait TessellationKernel {
    fn read_step(&self, data: &[u8]) -> Result<KernelResult>;
    fn read_iges(&self, data: &[u8]) -> Result<KernelResult>;
    fn read_brep(&self, data: &[u8]) -> Result<KernelResult>;
}

/// Adapter for kernel frontends that return their result as raw JSON bytes
///
/// The closure receives the format and the file contents and is expected to
/// run the external kernel, returning the JSON it emitted.
pub struct JsonKernel<F>
where
    F: Fn(FileFormat, &[u8]) -> Result<Vec<u8>>,
{
    invoke: F,
}

impl<F> JsonKernel<F>
where
    F: Fn(FileFormat, &[u8]) -> Result<Vec<u8>>,
{
    pub fn new(invoke: F) -> Self {
        Self { invoke }
    }

    fn read(&self, format: FileFormat, data: &[u8]) -> Result<KernelResult> {
        let json = (self.invoke)(format, data)?;
        KernelResult::from_json(&json)
    }
}

impl<F> TessellationKernel for JsonKernel<F>
where
    F: Fn(FileFormat, &[u8]) -> Result<Vec<u8>>,
{
    fn read_step(&self, data: &[u8]) -> Result<KernelResult> {
        self.read(FileFormat::Step, data)
    }

    fn read_iges(&self, data: &[u8]) -> Result<KernelResult> {
        self.read(FileFormat::Iges, data)
    }

    fn read_brep(&self, data: &[u8]) -> Result<KernelResult> {
        self.read(FileFormat::Brep, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_FACE_JSON: &str = r#"{
        "success": true,
        "root": {
            "name": "",
            "meshes": [],
            "children": [{ "name": "part", "meshes": [0], "children": [] }]
        },
        "meshes": [{
            "name": "face",
            "color": [0.5, 0.5, 0.5],
            "brep_faces": [{ "first": 0, "last": 1, "color": null }],
            "attributes": {
                "position": { "array": [0,0,0, 1,0,0, 1,1,0, 0,1,0] }
            },
            "index": { "array": [0, 1, 2, 0, 2, 3] }
        }]
    }"#;

    #[test]
    fn parses_kernel_json() {
        let result = KernelResult::from_json(CUBE_FACE_JSON.as_bytes()).unwrap();
        assert!(result.success);
        assert_eq!(result.root.children.len(), 1);
        assert_eq!(result.root.children[0].meshes, vec![0]);
        let mesh = &result.meshes[0];
        assert_eq!(mesh.attributes.position.array.len(), 12);
        assert!(mesh.attributes.normal.is_none());
        assert_eq!(mesh.brep_faces[0].last, 1);
        assert_eq!(mesh.brep_faces[0].color, None);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(KernelResult::from_json(b"{\"success\": true}").is_err());
        assert!(KernelResult::from_json(b"not json").is_err());
    }

    #[test]
    fn json_kernel_routes_by_format() {
        let kernel = JsonKernel::new(|format, data: &[u8]| {
            assert_eq!(format, FileFormat::Iges);
            assert_eq!(data, b"payload");
            Ok(CUBE_FACE_JSON.as_bytes().to_vec())
        });
        let result = kernel.read_iges(b"payload").unwrap();
        assert_eq!(result.meshes.len(), 1);
    }
}
