//! Viewer facade tying import, scene graph and viewport state together

use crate::camera::Camera;
use crate::helpers::{AxesMarker, GridPlane};
use crate::scene::{flatten_scene, SceneFlattened};
use cadview_core::{Aabb, Bounded, CadNode, Color, Result};
use cadview_io::TessellationKernel;
use std::path::Path;

/// Viewport background (GhostWhite)
pub const BACKGROUND_COLOR: Color = [248.0 / 255.0, 248.0 / 255.0, 1.0];

/// Holds the loaded scene graph together with camera, grid and axes state
///
/// One `CadViewer` backs one viewport. Files append their root nodes to the
/// scene; the camera and helpers reframe to the new bounds after each load.
#[derive(Debug, Default)]
pub struct CadViewer {
    nodes: Vec<CadNode>,
    pub camera: Camera,
    pub grid: GridPlane,
    pub axes: AxesMarker,
}

impl CadViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[CadNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<CadNode> {
        &mut self.nodes
    }

    pub fn loaded_files(&self) -> usize {
        self.nodes.len()
    }

    /// Import a CAD file and add its tree to the scene, then reframe
    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        kernel: &dyn TessellationKernel,
    ) -> Result<()> {
        let node = cadview_io::import_file(path, kernel)?;
        self.nodes.push(node);
        self.reset_view();
        Ok(())
    }

    /// Bounding box of the visible scene
    pub fn scene_bounds(&self) -> Option<Aabb> {
        let mut out: Option<Aabb> = None;
        for node in &self.nodes {
            if let Some(aabb) = node.bounding_box() {
                out = Some(match out {
                    Some(acc) => acc.union(&aabb),
                    None => aabb,
                });
            }
        }
        out
    }

    /// Reframe camera, grid and axes to the current scene bounds
    ///
    /// With nothing visible the camera and helpers are left untouched.
    pub fn reset_view(&mut self) {
        if let Some(aabb) = self.scene_bounds() {
            self.camera.frame(&aabb);
            self.grid.fit(&aabb);
            self.axes.fit(&aabb);
        }
    }

    pub fn toggle_grid(&mut self) {
        self.grid.visible = !self.grid.visible;
    }

    pub fn toggle_axes(&mut self) {
        self.axes.visible = !self.axes.visible;
    }

    /// Flatten the visible scene into render batches
    pub fn flatten(&self) -> SceneFlattened {
        flatten_scene(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cadview_core::Error;
    use cadview_io::KernelResult;
    use std::fs;

    struct StubKernel;

    impl TessellationKernel for StubKernel {
        fn read_step(&self, _data: &[u8]) -> cadview_core::Result<KernelResult> {
            KernelResult::from_json(
                br#"{
                    "success": true,
                    "root": {
                        "name": "",
                        "meshes": [],
                        "children": [{ "name": "plate", "meshes": [0], "children": [] }]
                    },
                    "meshes": [{
                        "name": "plate-shape",
                        "color": null,
                        "brep_faces": [{ "first": 0, "last": 1, "color": null }],
                        "attributes": {
                            "position": { "array": [0,0,0, 20,0,0, 20,20,0, 0,20,0] }
                        },
                        "index": { "array": [0, 1, 2, 0, 2, 3] }
                    }]
                }"#,
            )
        }

        fn read_iges(&self, data: &[u8]) -> cadview_core::Result<KernelResult> {
            self.read_step(data)
        }

        fn read_brep(&self, data: &[u8]) -> cadview_core::Result<KernelResult> {
            self.read_step(data)
        }
    }

    #[test]
    fn empty_viewer_has_no_bounds_and_keeps_defaults() {
        let mut viewer = CadViewer::new();
        assert!(viewer.scene_bounds().is_none());
        let position = viewer.camera.position;
        viewer.reset_view();
        assert_eq!(viewer.camera.position, position);
        assert_eq!(viewer.loaded_files(), 0);
    }

    #[test]
    fn load_file_appends_and_reframes() {
        let temp_file = "test_viewer_load.step";
        fs::write(temp_file, "ISO-10303-21;").unwrap();

        let mut viewer = CadViewer::new();
        viewer.load_file(temp_file, &StubKernel).unwrap();
        assert_eq!(viewer.loaded_files(), 1);
        assert_eq!(viewer.nodes()[0].name, "test_viewer_load.step");

        // Plate spans 0..20 on X and Y, so the camera frames its center
        assert_relative_eq!(viewer.camera.target.x, 10.0);
        assert_relative_eq!(viewer.camera.target.y, 10.0);
        assert_relative_eq!(viewer.camera.position.x, 20.0);
        // Grid resized: ceil(20/10)*2 = 4 divisions
        assert_eq!(viewer.grid.divisions, 4);
        assert_relative_eq!(viewer.axes.length, 20.0);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn load_failure_leaves_scene_unchanged() {
        let mut viewer = CadViewer::new();
        match viewer.load_file("missing.step", &StubKernel) {
            Err(Error::Io(_)) => {}
            other => panic!("expected io error, got {:?}", other),
        }
        assert_eq!(viewer.loaded_files(), 0);
    }

    #[test]
    fn flatten_reflects_visibility_toggles() {
        let temp_file = "test_viewer_flatten.step";
        fs::write(temp_file, "ISO-10303-21;").unwrap();

        let mut viewer = CadViewer::new();
        viewer.load_file(temp_file, &StubKernel).unwrap();
        assert_eq!(viewer.flatten().meshes.len(), 1);

        viewer.nodes_mut()[0].visible = false;
        assert!(viewer.flatten().meshes.is_empty());
        assert!(viewer.scene_bounds().is_none());

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn toggles_flip_helper_visibility() {
        let mut viewer = CadViewer::new();
        assert!(viewer.grid.visible);
        viewer.toggle_grid();
        assert!(!viewer.grid.visible);
        viewer.toggle_axes();
        viewer.toggle_axes();
        assert!(viewer.axes.visible);
    }
}
