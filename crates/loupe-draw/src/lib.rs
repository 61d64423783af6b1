//! Loupe -- debug visualization core for a 2D physics sandbox.
//!
//! This crate is the GPU-free half of the sandbox overlay: it turns
//! physics primitives (polygons, circles, segments, transforms, points,
//! AABBs) into batched vertex data and maintains the 2D camera that maps
//! between world and screen coordinates. The wgpu backend that uploads
//! the batches lives in `loupe-render`; everything here runs headless,
//! which is how the test suite exercises it.
//!
//! A frame is strictly two phases:
//!
//! 1. Physics debug callbacks append primitives into the
//!    [`GeometryBatcher`](batch::GeometryBatcher) (world space).
//! 2. After the emission pass, the batcher flushes each non-empty buffer
//!    exactly once through a [`GeometryBackend`](batch::GeometryBackend)
//!    and clears it. No geometry survives a frame.
//!
//! # Quick Start
//!
//! ```
//! use loupe_draw::prelude::*;
//! use glam::Vec2;
//!
//! let mut camera = Camera::new(&CameraSetup::default());
//! // The camera's world position lands on the viewport center.
//! assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(512.0, 320.0));
//!
//! let mut batch = GeometryBatcher::new();
//! batch.set_zoom(camera.zoom);
//! batch.draw_segment(Vec2::ZERO, Vec2::X, Color::WHITE);
//! assert_eq!(batch.lines().len(), 2);
//! ```

#![deny(unsafe_code)]

pub mod batch;
pub mod camera;
pub mod color;
pub mod controller;
pub mod draw;
pub mod overlay;
pub mod transform;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::batch::{
        GeometryBackend, GeometryBatcher, PointInstance, Vertex, MAX_LINE_VERTICES,
        MAX_POINT_INSTANCES, MAX_TRIANGLE_VERTICES,
    };
    pub use crate::camera::{Camera, CameraSetup};
    pub use crate::color::Color;
    pub use crate::controller::CameraController;
    pub use crate::draw::{Aabb, DebugDraw, DrawFlags, Transform2};
    pub use crate::overlay::{NullTextSink, TextAnchor, TextEntry, TextOverlay, TextSink};
    pub use crate::transform::{build_transform, to_mat3};
}
