//! Axis-aligned bounding boxes

use crate::mesh::{CadMesh, EdgeLines};
use crate::node::CadNode;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Bounding box of a point set, `None` when empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Aabb::new(first, first);
        for p in iter {
            aabb.expand_point(p);
        }
        Some(aabb)
    }

    pub fn expand_point(&mut self, p: &Point3f) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.expand_point(&other.min);
        out.expand_point(&other.max);
        out
    }

    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn largest_dim(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

/// Objects with a spatial extent
pub trait Bounded {
    /// Bounding box of the object, `None` when it contains no geometry
    fn bounding_box(&self) -> Option<Aabb>;
}

impl Bounded for CadMesh {
    fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}

impl Bounded for EdgeLines {
    fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}

impl Bounded for CadNode {
    /// Box covering the meshes of this node and all visible descendants
    ///
    /// An invisible node contributes nothing, including its subtree.
    fn bounding_box(&self) -> Option<Aabb> {
        if !self.visible {
            return None;
        }
        let mut out: Option<Aabb> = None;
        for mesh in &self.meshes {
            if let Some(aabb) = mesh.bounding_box() {
                out = Some(match out {
                    Some(acc) => acc.union(&aabb),
                    None => aabb,
                });
            }
        }
        for child in &self.children {
            if let Some(aabb) = child.bounding_box() {
                out = Some(match out {
                    Some(acc) => acc.union(&aabb),
                    None => aabb,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn center_and_size() {
        let points = vec![
            Point3f::new(-1.0, 0.0, 2.0),
            Point3f::new(3.0, 4.0, 6.0),
            Point3f::new(0.0, 1.0, 3.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_relative_eq!(aabb.center().x, 1.0);
        assert_relative_eq!(aabb.center().y, 2.0);
        assert_relative_eq!(aabb.center().z, 4.0);
        assert_relative_eq!(aabb.size().x, 4.0);
        assert_relative_eq!(aabb.largest_dim(), 4.0);
    }

    #[test]
    fn union_covers_both() {
        let a = Aabb::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3f::new(-2.0, 0.5, 0.0), Point3f::new(0.0, 3.0, 0.5));
        let u = a.union(&b);
        assert_relative_eq!(u.min.x, -2.0);
        assert_relative_eq!(u.max.y, 3.0);
        assert_relative_eq!(u.max.x, 1.0);
    }

    #[test]
    fn invisible_node_has_no_bounds() {
        let mut mesh = CadMesh::new("m");
        mesh.positions = vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0)];
        mesh.indices = vec![0, 1, 1];
        let mut node = CadNode::new("n");
        node.meshes.push(mesh);
        assert!(node.bounding_box().is_some());
        node.visible = false;
        assert!(node.bounding_box().is_none());
    }

    #[test]
    fn node_bounds_skip_hidden_children() {
        let mut far_mesh = CadMesh::new("far");
        far_mesh.positions = vec![Point3f::new(100.0, 0.0, 0.0)];
        let mut near_mesh = CadMesh::new("near");
        near_mesh.positions = vec![Point3f::new(1.0, 0.0, 0.0)];

        let mut hidden = CadNode::new("hidden");
        hidden.visible = false;
        hidden.meshes.push(far_mesh);

        let mut root = CadNode::new("root");
        root.meshes.push(near_mesh);
        root.children.push(hidden);

        let aabb = root.bounding_box().unwrap();
        assert_relative_eq!(aabb.max.x, 1.0);
    }
}
