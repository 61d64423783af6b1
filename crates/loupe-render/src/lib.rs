//! wgpu backend and windowed shell for the loupe debug overlay.
//!
//! `loupe-draw` accumulates; this crate uploads and presents. Each frame:
//!
//! 1. The windowed runner applies pending camera input and calls the
//!    scene's emission pass, filling the
//!    [`GeometryBatcher`](loupe_draw::batch::GeometryBatcher).
//! 2. [`DebugRenderer::render`] acquires a surface frame, opens a single
//!    clear pass, and hands the batcher a [`GeometryPass`] -- the
//!    [`GeometryBackend`](loupe_draw::batch::GeometryBackend)
//!    implementation that uploads each non-empty buffer and issues its
//!    draw call.
//! 3. Overlay text is flushed to the configured text sink.
//!
//! The renderer does not own the simulation -- scenes are plain callbacks
//! driven by the event loop, so anything that can emit debug primitives
//! can be shown.

#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod pipeline;
pub mod renderer;

pub use app::{run_windowed, Scene};
pub use config::{ConfigError, SandboxConfig};
pub use pipeline::{DebugPipelines, GeometryPass};
pub use renderer::DebugRenderer;
