//! Load CAD files from the command line and print the scene outline plus
//! the batches a renderer backend would receive.
//!
//! STEP/IGES/BREP need a tessellation kernel; this demo shells out to any
//! kernel frontend named by CADVIEW_KERNEL_CMD that reads the file bytes on
//! stdin and writes the tessellation result JSON to stdout. PLY files load
//! without a kernel.

use anyhow::{bail, Context};
use cadview_io::{FileFormat, JsonKernel};
use cadview_viewport::CadViewer;
use std::io::Write;
use std::process::{Command, Stdio};

fn run_kernel_cmd(cmd: String) -> impl Fn(FileFormat, &[u8]) -> cadview_core::Result<Vec<u8>> {
    move |_format, data: &[u8]| {
        let io_err = |msg: String| cadview_core::Error::Kernel(msg);
        let mut child = Command::new(&cmd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| io_err(format!("failed to start '{}': {}", cmd, e)))?;
        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(data)
                .map_err(|e| io_err(format!("failed to feed '{}': {}", cmd, e)))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| io_err(format!("'{}' did not finish: {}", cmd, e)))?;
        if !output.status.success() {
            return Err(io_err(format!("'{}' exited with {}", cmd, output.status)));
        }
        Ok(output.stdout)
    }
}

fn main() -> anyhow::Result<()> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: view_scene <file.step|file.iges|file.brep|file.ply>...");
    }

    let kernel_cmd =
        std::env::var("CADVIEW_KERNEL_CMD").unwrap_or_else(|_| "occt-tessellate".to_string());
    let kernel = JsonKernel::new(run_kernel_cmd(kernel_cmd));

    let mut viewer = CadViewer::new();
    for path in &paths {
        viewer
            .load_file(path, &kernel)
            .with_context(|| format!("loading {}", path))?;
        println!("loaded {}", path);
    }

    for node in viewer.nodes() {
        for (depth, row) in node.outline() {
            println!(
                "{}{} ({} meshes)",
                "  ".repeat(depth),
                row.name,
                row.meshes.len()
            );
        }
    }

    let scene = viewer.flatten();
    let triangle_count: usize = scene.meshes.iter().map(|m| m.vertices.len() / 3).sum();
    let segment_count: usize = scene.edges.iter().map(|e| e.vertices.len() / 2).sum();
    println!(
        "{} triangles, {} silhouette segments",
        triangle_count, segment_count
    );
    if let Some(bounds) = viewer.scene_bounds() {
        println!(
            "bounds {:?} .. {:?}, camera at {:?}",
            bounds.min, bounds.max, viewer.camera.position
        );
    }
    Ok(())
}
