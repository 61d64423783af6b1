//! Overlay text queue -- the typed replacement for printf-style debug
//! text.
//!
//! Callers queue pre-formatted strings anchored either at a fixed screen
//! position or at a world-space point. Once per frame the queue is
//! flushed through a [`TextSink`]; world anchors are resolved against the
//! camera at flush time, so text queued before a camera move still lands
//! on the right body. Text layout itself is entirely the sink's problem.

use glam::Vec2;

use crate::camera::Camera;
use crate::color::Color;

/// Default overlay text color, a muted salmon that reads on dark
/// backgrounds: RGB(230, 153, 153).
pub const OVERLAY_TEXT_COLOR: Color = Color::rgba(0.902, 0.6, 0.6, 1.0);

/// Where an overlay string is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// Fixed screen-space position in pixels.
    Screen(Vec2),
    /// World-space position, converted through the camera at flush time.
    World(Vec2),
}

/// One queued overlay string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub anchor: TextAnchor,
    pub color: Color,
    pub text: String,
}

/// Consumer of resolved overlay text, typically an external text-overlay
/// renderer.
pub trait TextSink {
    fn draw_text(&mut self, screen: Vec2, color: Color, text: &str);
}

/// Sink that discards everything; for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullTextSink;

impl TextSink for NullTextSink {
    fn draw_text(&mut self, _screen: Vec2, _color: Color, _text: &str) {}
}

/// Per-frame queue of overlay strings.
#[derive(Debug, Default)]
pub struct TextOverlay {
    entries: Vec<TextEntry>,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue text at a fixed screen position.
    pub fn draw_string(&mut self, screen: Vec2, text: impl Into<String>) {
        self.entries.push(TextEntry {
            anchor: TextAnchor::Screen(screen),
            color: OVERLAY_TEXT_COLOR,
            text: text.into(),
        });
    }

    /// Queue text anchored to a world-space point.
    pub fn draw_string_world(&mut self, world: Vec2, text: impl Into<String>) {
        self.entries.push(TextEntry {
            anchor: TextAnchor::World(world),
            color: OVERLAY_TEXT_COLOR,
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries queued so far this frame.
    pub fn entries(&self) -> &[TextEntry] {
        &self.entries
    }

    /// Resolve anchors against `camera` and hand every queued entry to
    /// the sink, leaving the queue empty.
    pub fn flush(&mut self, camera: &Camera, sink: &mut dyn TextSink) {
        for entry in self.entries.drain(..) {
            let screen = match entry.anchor {
                TextAnchor::Screen(p) => p,
                TextAnchor::World(p) => camera.world_to_screen(p),
            };
            sink.draw_text(screen, entry.color, &entry.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSetup;

    struct RecordingSink {
        texts: Vec<(Vec2, String)>,
    }

    impl TextSink for RecordingSink {
        fn draw_text(&mut self, screen: Vec2, _color: Color, text: &str) {
            self.texts.push((screen, text.to_owned()));
        }
    }

    #[test]
    fn flush_resolves_world_anchors_and_drains() {
        let camera = Camera::new(&CameraSetup::default());
        let mut overlay = TextOverlay::new();
        let mut sink = RecordingSink { texts: Vec::new() };

        overlay.draw_string(Vec2::new(10.0, 10.0), "top left");
        overlay.draw_string_world(Vec2::ZERO, "on the origin");
        assert_eq!(overlay.len(), 2);

        overlay.flush(&camera, &mut sink);
        assert!(overlay.is_empty());
        assert_eq!(sink.texts.len(), 2);
        assert_eq!(sink.texts[0].0, Vec2::new(10.0, 10.0));
        // World origin sits at the viewport center.
        assert_eq!(sink.texts[1].0, Vec2::new(512.0, 320.0));
        assert_eq!(sink.texts[1].1, "on the origin");
    }

    #[test]
    fn flush_on_empty_queue_is_a_no_op() {
        let camera = Camera::new(&CameraSetup::default());
        let mut overlay = TextOverlay::new();
        let mut sink = RecordingSink { texts: Vec::new() };

        overlay.flush(&camera, &mut sink);
        assert!(sink.texts.is_empty());
    }
}
