//! Core data structures for cadview
//!
//! This crate provides the fundamental types shared by the cadview crates:
//! triangle meshes carrying B-rep face ranges, the CAD scene-graph node tree,
//! axis-aligned bounding boxes, and the silhouette edge-extraction algorithm
//! used to overlay face-boundary wireframes on tessellated shapes.

pub mod bounds;
pub mod edges;
pub mod error;
pub mod mesh;
pub mod node;
pub mod point;

pub use bounds::*;
pub use edges::*;
pub use error::*;
pub use mesh::*;
pub use node::*;
pub use point::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Common result type for cadview operations
pub type Result<T> = std::result::Result<T, Error>;
