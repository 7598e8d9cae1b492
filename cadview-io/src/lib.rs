//! CAD file import for cadview
//!
//! This crate turns dropped CAD files into [`CadNode`] scene-graph subtrees.
//! STEP, IGES and BREP go through an external tessellation kernel behind the
//! [`TessellationKernel`] trait; PLY is read natively with `ply-rs`.

pub mod brep;
pub mod kernel;
pub mod ply;

pub use brep::{build_cad_tree, import_brep_file, read_kernel_file};
pub use kernel::{
    JsonKernel, KernelAttributes, KernelBuffer, KernelFaceRange, KernelMesh, KernelNode,
    KernelResult, TessellationKernel,
};
pub use ply::read_ply_node;

use cadview_core::{CadNode, Error, Result};
use std::path::Path;

/// Supported CAD file formats, recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Step,
    Iges,
    Brep,
    Ply,
}

impl FileFormat {
    /// Detect the format from a path's extension, case-insensitively
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "step" | "stp" => Some(FileFormat::Step),
            "iges" | "igs" => Some(FileFormat::Iges),
            "brep" | "brp" => Some(FileFormat::Brep),
            "ply" => Some(FileFormat::Ply),
            _ => None,
        }
    }
}

/// Import any supported CAD file into a scene-graph subtree
///
/// Dispatches on the file extension; kernel formats run through `kernel`,
/// PLY is read directly. Unknown extensions are rejected.
pub fn import_file<P: AsRef<Path>>(path: P, kernel: &dyn TessellationKernel) -> Result<CadNode> {
    let path = path.as_ref();
    match FileFormat::from_path(path) {
        Some(FileFormat::Ply) => ply::read_ply_node(path),
        Some(_) => brep::import_brep_file(path, kernel),
        None => Err(Error::UnsupportedFormat(format!(
            "unrecognized extension: {}",
            path.display()
        ))),
    }
}
