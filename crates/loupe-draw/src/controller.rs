//! Camera interaction: the pan/zoom/drag behavior of the sandbox.
//!
//! Input-event decoding lives with the windowing layer; this type only
//! holds the tuning constants and applies the corresponding camera
//! mutations. Every operation leaves the camera updated, so conversions
//! made afterwards see the new transform.

use glam::Vec2;

use crate::camera::Camera;

/// Tuning for the sandbox camera bindings.
///
/// The defaults are the classic testbed values: half-unit pan steps,
/// 10% zoom steps bounded to [2, 100] pixels per world unit, and a home
/// view centered slightly above the origin.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraController {
    /// World units moved per pan step.
    pub pan_step: f32,
    /// Multiplier applied per zoom step (wheel notch or key press).
    pub zoom_step: f32,
    /// Lower zoom bound. Keeps the world-to-screen matrix invertible.
    pub min_zoom: f32,
    /// Upper zoom bound.
    pub max_zoom: f32,
    /// World position restored by [`CameraController::home`].
    pub home_position: Vec2,
    /// Zoom restored by [`CameraController::home`].
    pub home_zoom: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            pan_step: 0.5,
            zoom_step: 1.1,
            min_zoom: 2.0,
            max_zoom: 100.0,
            home_position: Vec2::new(0.0, 20.0),
            home_zoom: 10.0,
        }
    }
}

impl CameraController {
    /// Pan by `direction` (axis-aligned unit vectors for the arrow keys)
    /// scaled by the pan step.
    pub fn pan(&self, camera: &mut Camera, direction: Vec2) {
        camera.position += direction * self.pan_step;
        camera.update();
    }

    /// Multiply the zoom by `factor`, clamped to the configured bounds.
    pub fn scale_zoom(&self, camera: &mut Camera, factor: f32) {
        camera.zoom = (camera.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        camera.update();
    }

    /// Wheel input: scrolling up divides the zoom by one step, scrolling
    /// down multiplies it, matching the original sandbox binding.
    pub fn scroll_zoom(&self, camera: &mut Camera, delta_y: f32) {
        if delta_y > 0.0 {
            self.scale_zoom(camera, 1.0 / self.zoom_step);
        } else if delta_y < 0.0 {
            self.scale_zoom(camera, self.zoom_step);
        }
    }

    /// Pan by the world-space image of a cursor drag, so the world point
    /// under the cursor follows it. `screen_delta` is in the camera's
    /// screen coordinates (y up).
    pub fn drag(&self, camera: &mut Camera, screen_delta: Vec2) {
        let world_delta = camera.screen_to_world_dir(screen_delta);
        camera.position -= world_delta;
        camera.update();
    }

    /// Jump back to the home view.
    pub fn home(&self, camera: &mut Camera) {
        camera.position = self.home_position;
        camera.zoom = self.home_zoom;
        camera.update();
    }
}
