//! The CAD scene-graph node tree

use crate::mesh::{CadMesh, EdgeLines};
use serde::{Deserialize, Serialize};

/// A named, nested unit of visibility and selection state
///
/// Each imported file becomes one root `CadNode`; assemblies nest their parts
/// as children. A node owns zero or more renderable meshes together with the
/// silhouette overlays extracted for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadNode {
    pub name: String,
    pub visible: bool,
    pub selected: bool,
    pub meshes: Vec<CadMesh>,
    pub edge_lines: Vec<EdgeLines>,
    pub children: Vec<CadNode>,
}

impl CadNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            selected: false,
            meshes: Vec::new(),
            edge_lines: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of meshes in this node and all descendants
    pub fn mesh_count(&self) -> usize {
        self.meshes.len() + self.children.iter().map(CadNode::mesh_count).sum::<usize>()
    }

    /// Pre-order traversal of visible nodes
    ///
    /// An invisible node hides its whole subtree, regardless of the
    /// children's own `visible` flags.
    pub fn visit_visible<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a CadNode),
    {
        if !self.visible {
            return;
        }
        f(self);
        for child in &self.children {
            child.visit_visible(f);
        }
    }

    /// Meshes of selected nodes within the visible part of the tree
    pub fn selected_meshes(&self) -> Vec<&CadMesh> {
        let mut out = Vec::new();
        self.visit_visible(&mut |node| {
            if node.selected {
                out.extend(node.meshes.iter());
            }
        });
        out
    }

    /// Flat pre-order rows `(depth, node)` for binding to a UI tree widget
    ///
    /// Unlike [`CadNode::visit_visible`] this includes invisible nodes, so a
    /// tree panel can still offer them for re-enabling.
    pub fn outline(&self) -> Vec<(usize, &CadNode)> {
        let mut rows = Vec::new();
        self.outline_into(0, &mut rows);
        rows
    }

    fn outline_into<'a>(&'a self, depth: usize, rows: &mut Vec<(usize, &'a CadNode)>) {
        rows.push((depth, self));
        for child in &self.children {
            child.outline_into(depth + 1, rows);
        }
    }
}
