//! Batched geometry accumulation for the debug overlay.
//!
//! Primitive-emission callbacks append world-space vertices into three
//! bounded buffers: line segments, filled triangles, and instanced point
//! quads. Once per frame, after the emission pass completes,
//! [`GeometryBatcher::render`] hands each non-empty buffer to the
//! [`GeometryBackend`] for upload and a single draw call, then clears it.
//!
//! Buffers never grow past their capacity: an append beyond the cap is
//! silently dropped. A debug overlay must never crash or stall the
//! simulation, so running out of room simply loses overlay geometry for
//! the rest of the frame.

use glam::{Mat4, Vec2};

use crate::color::Color;
use crate::draw::{Aabb, DebugDraw, Transform2};

/// Capacity of the line vertex buffer (two vertices per segment).
pub const MAX_LINE_VERTICES: usize = 2 * 32 * 1024;
/// Capacity of the triangle vertex buffer (three vertices per triangle).
pub const MAX_TRIANGLE_VERTICES: usize = 2 * 32 * 1024;
/// Capacity of the point instance buffer (one instance per marker).
pub const MAX_POINT_INSTANCES: usize = 32 * 1024;

/// Circles are tessellated into this many edges.
const CIRCLE_SEGMENTS: usize = 16;
/// World-space length of the axis indicators drawn for a transform.
const AXIS_SCALE: f32 = 0.4;

// ---------------------------------------------------------------------------
// GPU-facing vertex types
// ---------------------------------------------------------------------------

/// A vertex with 2D world position and packed RGBA8 color, uploaded to
/// the GPU as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: u32,
}

/// Per-instance data for a point marker quad: world position, world-space
/// quad size, packed RGBA8 color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 2],
    pub size: f32,
    pub color: u32,
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Sink for batched vertex data, implemented by the GPU backend.
///
/// Each call corresponds to one vertex upload plus one draw call with the
/// given projection-view matrix applied as a shader uniform. The batcher
/// only calls these for non-empty slices.
pub trait GeometryBackend {
    fn draw_triangles(&mut self, vertices: &[Vertex], view_proj: Mat4);
    fn draw_lines(&mut self, vertices: &[Vertex], view_proj: Mat4);
    fn draw_points(&mut self, instances: &[PointInstance], view_proj: Mat4);
}

// ---------------------------------------------------------------------------
// GeometryBatcher
// ---------------------------------------------------------------------------

/// Accumulates debug geometry for one frame and flushes it in a single
/// pass per primitive class.
///
/// Holds no cross-frame state: every buffer that was flushed is cleared
/// before [`GeometryBatcher::render`] returns.
pub struct GeometryBatcher {
    lines: Vec<Vertex>,
    triangles: Vec<Vertex>,
    points: Vec<PointInstance>,
    zoom: f32,
}

impl Default for GeometryBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBatcher {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(MAX_LINE_VERTICES),
            triangles: Vec::with_capacity(MAX_TRIANGLE_VERTICES),
            points: Vec::with_capacity(MAX_POINT_INSTANCES),
            zoom: 1.0,
        }
    }

    /// Record the camera zoom for this frame. Point marker sizes are
    /// divided by it so markers keep a constant on-screen size no matter
    /// how far the camera is zoomed.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Append one line vertex. Dropped without error once the line buffer
    /// is full.
    pub fn add_line_vertex(&mut self, position: Vec2, color: Color) {
        if self.lines.len() < MAX_LINE_VERTICES {
            self.lines.push(Vertex {
                position: position.to_array(),
                color: color.pack(),
            });
        }
    }

    /// Append one triangle vertex. Dropped without error once the
    /// triangle buffer is full.
    pub fn add_triangle_vertex(&mut self, position: Vec2, color: Color) {
        if self.triangles.len() < MAX_TRIANGLE_VERTICES {
            self.triangles.push(Vertex {
                position: position.to_array(),
                color: color.pack(),
            });
        }
    }

    /// Append one point instance, with `size` rescaled by the inverse
    /// camera zoom. Dropped without error once the point buffer is full.
    pub fn add_point_vertex(&mut self, position: Vec2, color: Color, size: f32) {
        if self.points.len() < MAX_POINT_INSTANCES {
            self.points.push(PointInstance {
                position: position.to_array(),
                size: size / self.zoom,
                color: color.pack(),
            });
        }
    }

    /// Outline an axis-aligned bounding box.
    pub fn draw_aabb(&mut self, aabb: &Aabb, color: Color) {
        let p1 = aabb.min;
        let p2 = Vec2::new(aabb.max.x, aabb.min.y);
        let p3 = aabb.max;
        let p4 = Vec2::new(aabb.min.x, aabb.max.y);

        self.add_line_vertex(p1, color);
        self.add_line_vertex(p2, color);

        self.add_line_vertex(p2, color);
        self.add_line_vertex(p3, color);

        self.add_line_vertex(p3, color);
        self.add_line_vertex(p4, color);

        self.add_line_vertex(p4, color);
        self.add_line_vertex(p1, color);
    }

    /// Flush every non-empty buffer through the backend, then clear it.
    ///
    /// Order is triangles, lines, points, so filled interiors render
    /// under their outlines within the frame's single pass. A buffer that
    /// was empty triggers no backend call at all.
    pub fn render(&mut self, view_proj: Mat4, backend: &mut dyn GeometryBackend) {
        tracing::trace!(
            triangles = self.triangles.len(),
            lines = self.lines.len(),
            points = self.points.len(),
            "flushing debug geometry"
        );
        if !self.triangles.is_empty() {
            backend.draw_triangles(&self.triangles, view_proj);
            self.triangles.clear();
        }
        if !self.lines.is_empty() {
            backend.draw_lines(&self.lines, view_proj);
            self.lines.clear();
        }
        if !self.points.is_empty() {
            backend.draw_points(&self.points, view_proj);
            self.points.clear();
        }
    }

    /// Line vertices accumulated so far this frame.
    pub fn lines(&self) -> &[Vertex] {
        &self.lines
    }

    /// Triangle vertices accumulated so far this frame.
    pub fn triangles(&self) -> &[Vertex] {
        &self.triangles
    }

    /// Point instances accumulated so far this frame.
    pub fn points(&self) -> &[PointInstance] {
        &self.points
    }
}

/// Rotate `v` by the angle whose sine/cosine are `sin`/`cos`.
fn rotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

impl DebugDraw for GeometryBatcher {
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color) {
        let mut p1 = vertices[vertices.len() - 1];
        for &p2 in vertices {
            self.add_line_vertex(p1, color);
            self.add_line_vertex(p2, color);
            p1 = p2;
        }
    }

    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Color) {
        let fill = color.fill();

        for i in 1..vertices.len() - 1 {
            self.add_triangle_vertex(vertices[0], fill);
            self.add_triangle_vertex(vertices[i], fill);
            self.add_triangle_vertex(vertices[i + 1], fill);
        }

        self.draw_polygon(vertices, color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let increment = 2.0 * std::f32::consts::PI / CIRCLE_SEGMENTS as f32;
        let (sin_inc, cos_inc) = increment.sin_cos();

        // Rotate the previous edge vector by the fixed per-segment angle
        // instead of recomputing trig per vertex.
        let mut r1 = Vec2::X;
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = rotate(r1, sin_inc, cos_inc);
            let v2 = center + radius * r2;
            self.add_line_vertex(v1, color);
            self.add_line_vertex(v2, color);
            r1 = r2;
            v1 = v2;
        }
    }

    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Color) {
        let increment = 2.0 * std::f32::consts::PI / CIRCLE_SEGMENTS as f32;
        let (sin_inc, cos_inc) = increment.sin_cos();
        let fill = color.fill();

        let v0 = center;
        let mut r1 = Vec2::new(cos_inc, sin_inc);
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = rotate(r1, sin_inc, cos_inc);
            let v2 = center + radius * r2;
            self.add_triangle_vertex(v0, fill);
            self.add_triangle_vertex(v1, fill);
            self.add_triangle_vertex(v2, fill);
            r1 = r2;
            v1 = v2;
        }

        let mut r1 = Vec2::X;
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = rotate(r1, sin_inc, cos_inc);
            let v2 = center + radius * r2;
            self.add_line_vertex(v1, color);
            self.add_line_vertex(v2, color);
            r1 = r2;
            v1 = v2;
        }

        // Radius line fixed in the circle to show its rotation.
        self.add_line_vertex(center, color);
        self.add_line_vertex(center + radius * axis, color);
    }

    fn draw_segment(&mut self, p1: Vec2, p2: Vec2, color: Color) {
        self.add_line_vertex(p1, color);
        self.add_line_vertex(p2, color);
    }

    fn draw_transform(&mut self, transform: &Transform2) {
        let p = transform.position;

        self.add_line_vertex(p, Color::RED);
        self.add_line_vertex(p + AXIS_SCALE * transform.x_axis(), Color::RED);

        self.add_line_vertex(p, Color::GREEN);
        self.add_line_vertex(p + AXIS_SCALE * transform.y_axis(), Color::GREEN);
    }

    fn draw_point(&mut self, position: Vec2, size: f32, color: Color) {
        self.add_point_vertex(position, color, size);
    }
}
