//! Sandbox configuration: window, camera, controller tuning, draw flags.
//!
//! Loaded from JSON with every field optional; absent fields fall back to
//! the sandbox defaults. `width`/`height` size the OS window; the camera
//! viewport follows the actual framebuffer size once the window exists.

use std::path::Path;

use glam::Vec2;
use loupe_draw::camera::CameraSetup;
use loupe_draw::controller::CameraController;
use loupe_draw::draw::DrawFlags;

/// Errors from loading a sandbox config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the windowed sandbox needs to start.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// OS window title.
    pub title: String,
    /// Initial window width in physical pixels.
    pub width: u32,
    /// Initial window height in physical pixels.
    pub height: u32,
    pub camera: CameraSetup,
    pub controller: CameraController,
    pub flags: DrawFlags,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            title: "Physics Sandbox".to_owned(),
            width: 1024,
            height: 640,
            camera: CameraSetup {
                position: Vec2::new(0.0, 20.0),
                zoom: 10.0,
                ..CameraSetup::default()
            },
            controller: CameraController::default(),
            flags: DrawFlags::default(),
        }
    }
}

impl SandboxConfig {
    /// Load a config from a JSON file. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_sandbox_view() {
        let config = SandboxConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 640);
        assert_eq!(config.camera.zoom, 10.0);
        assert_eq!(config.camera.position, Vec2::new(0.0, 20.0));
        assert!(config.flags.shapes);
        assert!(!config.flags.aabbs);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: SandboxConfig = serde_json::from_str(
            r#"{
                "width": 800,
                "camera": { "zoom": 25.0 },
                "flags": { "aabbs": true }
            }"#,
        )
        .expect("partial config should parse");

        assert_eq!(config.width, 800);
        assert_eq!(config.height, 640);
        assert_eq!(config.camera.zoom, 25.0);
        // Unmentioned camera fields keep their defaults.
        assert_eq!(config.camera.viewport_width, 1024);
        assert!(config.flags.aabbs);
        assert!(config.flags.shapes);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SandboxConfig::load("/does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
