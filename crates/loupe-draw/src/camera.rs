//! 2D sandbox camera: world <-> screen mapping and projection.
//!
//! The camera is deliberately dumb. Position, zoom, and rotation are
//! plain public fields; after writing any of them, call
//! [`Camera::update`] before converting points or building a
//! projection-view matrix -- the derived matrices are never recomputed
//! automatically.
//!
//! # Pivot convention
//!
//! [`Camera::update`] builds a transform that maps the camera's world
//! position onto the viewport center, so zoom and rotation pivot around
//! the middle of the screen while the world position pans independently.
//! This decouples "what point is centered" from "what point zoom and
//! rotation pivot around", which is what a top-down sandbox camera
//! wants. It is a tested convention, not an accident.

use glam::{Mat2, Mat4, Vec2, Vec4};

use crate::transform::build_transform;

/// Initial camera parameters. Consumed by [`Camera::setup`].
///
/// All fields have sandbox-friendly defaults, and partial JSON configs
/// deserialize against them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraSetup {
    /// World point mapped to the center of the viewport.
    pub position: Vec2,
    /// Rotation in degrees, positive counter-clockwise.
    pub rotation: f32,
    /// Uniform world-to-pixel scale. Must stay above zero.
    pub zoom: f32,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Near bound of the orthographic depth range.
    pub z_near: f32,
    /// Far bound of the orthographic depth range.
    pub z_far: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
            viewport_width: 1024,
            viewport_height: 640,
            z_near: -10.0,
            z_far: 10.0,
        }
    }
}

/// 2D camera over a pixel viewport.
///
/// Owns the derived world/screen matrices; the screen-to-world matrix is
/// always the exact inverse of the world-to-screen matrix. Both are stale
/// after a direct mutation of [`position`](Self::position),
/// [`zoom`](Self::zoom), or [`rotation`](Self::rotation) until
/// [`Camera::update`] runs.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World point shown at the viewport center.
    pub position: Vec2,
    /// Uniform world-to-pixel scale. Callers keep this above zero so the
    /// transform stays invertible.
    pub zoom: f32,
    /// Rotation in degrees, positive counter-clockwise.
    pub rotation: f32,
    viewport_center: Vec2,
    z_near: f32,
    z_far: f32,
    world_to_screen_matrix: Mat2,
    screen_to_world_matrix: Mat2,
    translation_offset: Vec2,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSetup::default())
    }
}

impl Camera {
    /// Create a camera with valid derived state for `setup`.
    pub fn new(setup: &CameraSetup) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            viewport_center: Vec2::ZERO,
            z_near: -10.0,
            z_far: 10.0,
            world_to_screen_matrix: Mat2::IDENTITY,
            screen_to_world_matrix: Mat2::IDENTITY,
            translation_offset: Vec2::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.setup(setup);
        camera
    }

    /// Re-initialize from `setup`: copies the transform parameters,
    /// resizes the viewport, and recomputes the derived matrices.
    pub fn setup(&mut self, setup: &CameraSetup) {
        self.position = setup.position;
        self.zoom = setup.zoom;
        self.rotation = setup.rotation;
        self.z_near = setup.z_near;
        self.z_far = setup.z_far;
        self.resize_viewport(setup.viewport_width, setup.viewport_height);
        self.update();
    }

    /// Recompute the world/screen matrices and translation offset from
    /// the current position, zoom, and rotation. Must run after any
    /// mutation of those fields and before the next conversion.
    pub fn update(&mut self) {
        let xf = build_transform(
            self.position,
            self.rotation,
            Vec2::splat(self.zoom),
            self.viewport_center,
        );
        self.world_to_screen_matrix = xf.matrix2;
        self.screen_to_world_matrix = xf.matrix2.inverse();
        self.translation_offset = xf.translation;
    }

    /// Set the viewport size in pixels: recomputes the viewport center
    /// and the orthographic projection over `[0, w] x [0, h]` and the
    /// configured depth range. The world transform is left untouched;
    /// call [`Camera::update`] if the new center should take effect
    /// immediately.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.viewport_center = Vec2::new(width as f32 * 0.5, height as f32 * 0.5);
        self.projection = Mat4::orthographic_rh(
            0.0,
            width as f32,
            0.0,
            height as f32,
            self.z_near,
            self.z_far,
        );
    }

    /// Map a screen-space point to world space.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.screen_to_world_matrix * (screen - self.translation_offset)
    }

    /// Map a world-space point to screen space.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.world_to_screen_matrix * world + self.translation_offset
    }

    /// Map a screen-space direction to world space. Directions ignore the
    /// translation offset, so panning never affects them.
    pub fn screen_to_world_dir(&self, dir: Vec2) -> Vec2 {
        self.screen_to_world_matrix * dir
    }

    /// Map a world-space direction to screen space.
    pub fn world_to_screen_dir(&self, dir: Vec2) -> Vec2 {
        self.world_to_screen_matrix * dir
    }

    /// Compose the orthographic projection with the current world
    /// transform. `z_bias` lands in the depth translation slot so debug
    /// geometry can be layered at a fixed depth relative to other passes.
    pub fn projection_view(&self, z_bias: f32) -> Mat4 {
        let m = self.world_to_screen_matrix;
        let t = self.translation_offset;
        let world = Mat4::from_cols(
            Vec4::new(m.x_axis.x, m.x_axis.y, 0.0, 0.0),
            Vec4::new(m.y_axis.x, m.y_axis.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(t.x, t.y, z_bias, 1.0),
        );
        self.projection * world
    }

    /// Viewport width in pixels (twice the stored center).
    pub fn width(&self) -> f32 {
        self.viewport_center.x * 2.0
    }

    /// Viewport height in pixels.
    pub fn height(&self) -> f32 {
        self.viewport_center.y * 2.0
    }

    /// Center of the viewport in screen space -- the zoom/rotation pivot.
    pub fn viewport_center(&self) -> Vec2 {
        self.viewport_center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_position_lands_on_viewport_center() {
        let camera = Camera::new(&CameraSetup::default());
        assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(512.0, 320.0));
    }

    #[test]
    fn derived_state_is_stale_until_update() {
        let mut camera = Camera::new(&CameraSetup::default());
        let before = camera.world_to_screen(Vec2::X);

        camera.zoom = 4.0;
        // No update yet: the conversion still uses the old matrices.
        assert_eq!(camera.world_to_screen(Vec2::X), before);

        camera.update();
        assert_ne!(camera.world_to_screen(Vec2::X), before);
    }

    #[test]
    fn projection_maps_viewport_corners_to_clip_edges() {
        let camera = Camera::new(&CameraSetup::default());
        // Identity world transform would be zoom 1 at origin; probe the
        // projection alone through a camera with no pan.
        let pv = camera.projection_view(0.0);

        // World (0,0) sits at the screen center, which is clip (0,0).
        let center = pv * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5, "got {center}");

        // Screen (0,0) is the bottom-left clip corner. At zoom 1 the
        // world point there is -viewport_center.
        let corner = pv * Vec4::new(-512.0, -320.0, 0.0, 1.0);
        assert!(
            (corner.x + 1.0).abs() < 1e-5 && (corner.y + 1.0).abs() < 1e-5,
            "got {corner}"
        );
    }

    #[test]
    fn camera_setup_deserializes_partial_json() {
        let setup: CameraSetup =
            serde_json::from_str(r#"{ "zoom": 25.0 }"#).expect("partial setup should parse");
        assert_eq!(setup.zoom, 25.0);
        assert_eq!(setup.viewport_width, 1024);
        assert_eq!(setup.position, Vec2::ZERO);
    }

    #[test]
    fn resize_keeps_world_transform_until_update() {
        let mut camera = Camera::new(&CameraSetup::default());
        camera.resize_viewport(2048, 1280);
        // Projection and reported size change immediately...
        assert_eq!(camera.width(), 2048.0);
        assert_eq!(camera.height(), 1280.0);
        // ...but the world mapping still targets the old center.
        assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(512.0, 320.0));

        camera.update();
        assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(1024.0, 640.0));
    }
}
