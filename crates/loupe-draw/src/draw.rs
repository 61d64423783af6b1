//! The debug-draw callback surface expected by a 2D physics engine.
//!
//! During a physics step the engine walks its bodies, joints, and
//! contacts and invokes these callbacks with world-space geometry and
//! [0, 1] float colors. [`GeometryBatcher`](crate::batch::GeometryBatcher)
//! implements the trait by accumulating vertices; nothing reaches the GPU
//! until the frame's flush.

use glam::Vec2;

use crate::color::Color;

/// Rigid 2D pose: a position plus a rotation angle in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    pub position: Vec2,
    pub rotation: f32,
}

impl Transform2 {
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Unit vector along the pose's rotated X axis.
    pub fn x_axis(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// Unit vector along the pose's rotated Y axis.
    pub fn y_axis(&self) -> Vec2 {
        Vec2::new(-self.rotation.sin(), self.rotation.cos())
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// Which primitive families the sandbox asks the physics engine to emit.
///
/// Mirrors the classic debug-draw flag set. The emitting side consults
/// these before invoking the corresponding [`DebugDraw`] callbacks; the
/// batcher itself draws whatever it is handed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DrawFlags {
    pub shapes: bool,
    pub joints: bool,
    pub aabbs: bool,
    pub contact_points: bool,
    pub contact_normals: bool,
    pub center_of_mass: bool,
}

impl Default for DrawFlags {
    fn default() -> Self {
        Self {
            shapes: true,
            joints: false,
            aabbs: false,
            contact_points: false,
            contact_normals: false,
            center_of_mass: false,
        }
    }
}

/// Debug drawing callbacks invoked by the physics engine during a step.
///
/// All geometry is in world-space coordinates. Implementations must not
/// fail: a debug overlay never interrupts the simulation.
pub trait DebugDraw {
    /// Closed polygon outline; the last vertex connects back to the first.
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color);

    /// Filled polygon with a translucent interior and a solid outline on
    /// top.
    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Color);

    /// Circle outline.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Filled circle plus a radius line along `axis` showing the body's
    /// current rotation.
    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Color);

    /// Single line segment.
    fn draw_segment(&mut self, p1: Vec2, p2: Vec2, color: Color);

    /// Position and basis axes of a rigid transform.
    fn draw_transform(&mut self, transform: &Transform2);

    /// Point marker with a constant on-screen size.
    fn draw_point(&mut self, position: Vec2, size: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_axes_are_orthonormal() {
        let xf = Transform2::new(Vec2::ZERO, 0.7);
        let x = xf.x_axis();
        let y = xf.y_axis();
        assert!((x.length() - 1.0).abs() < 1e-6);
        assert!((y.length() - 1.0).abs() < 1e-6);
        assert!(x.dot(y).abs() < 1e-6);
    }

    #[test]
    fn identity_transform_axes() {
        let xf = Transform2::new(Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(xf.x_axis(), Vec2::X);
        assert_eq!(xf.y_axis(), Vec2::Y);
    }
}
