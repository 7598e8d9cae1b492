//! Viewport math and viewer state for cadview scene graphs
//!
//! This crate supplies the viewport-side pieces of the CAD viewer that are
//! independent of any particular rendering backend:
//! - Perspective camera with orbit/pan/zoom and bounding-box framing
//! - Grid and axes helper geometry sized from the scene bounds
//! - Scene flattening into GPU-ready vertex batches
//! - The [`CadViewer`] facade driving file loading and view state

pub mod camera;
pub mod helpers;
pub mod scene;
pub mod viewer;

pub use camera::*;
pub use helpers::*;
pub use scene::*;
pub use viewer::*;
