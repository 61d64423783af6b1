//! Windowed runner for the debug sandbox.
//!
//! Drives a [`Scene`] inside a winit event loop. Each `RedrawRequested`:
//!
//! 1. Refresh the camera's derived matrices (input handlers mutate the
//!    transform fields directly).
//! 2. Run the scene's emission pass into the batcher.
//! 3. Render the batch, then flush overlay text to the text sink.
//!
//! Input events translate to [`CameraController`] operations; the
//! controller leaves the camera updated after every mutation, so world
//! conversions made by the very next event see the new transform.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{WindowAttributes, WindowId};

use loupe_draw::batch::GeometryBatcher;
use loupe_draw::camera::Camera;
use loupe_draw::controller::CameraController;
use loupe_draw::overlay::{NullTextSink, TextOverlay};

use crate::config::SandboxConfig;
use crate::renderer::DebugRenderer;

/// A sandbox scene: emits debug geometry once per frame.
///
/// Stands in for the physics engine's debug-draw pass. `dt` is the wall
/// time since the previous frame in seconds.
pub trait Scene {
    fn frame(&mut self, draw: &mut GeometryBatcher, overlay: &mut TextOverlay, dt: f32);
}

/// Run a scene in a window with the sandbox camera bindings.
///
/// Takes ownership of the scene and blocks until the window is closed.
///
/// Controls: arrow keys pan, `Z`/`X` and the mouse wheel zoom,
/// right-button drag pans, `Home` resets the view, `Escape` quits.
///
/// # Errors
///
/// Returns an error if the event loop cannot be created or if the
/// renderer fails to initialize.
pub fn run_windowed(scene: Box<dyn Scene>, config: SandboxConfig) -> Result<(), anyhow::Error> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = SandboxApp {
        state: AppState::Pending { scene, config },
        init_failed: false,
    };

    event_loop.run_app(&mut app)?;

    if app.init_failed {
        return Err(anyhow::anyhow!(
            "failed to initialize windowed renderer (see logs for details)"
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Internal state machine
// ---------------------------------------------------------------------------

/// Everything alive once the window and renderer exist.
struct RunningState {
    scene: Box<dyn Scene>,
    renderer: DebugRenderer,
    camera: Camera,
    controller: CameraController,
    batch: GeometryBatcher,
    overlay: TextOverlay,
    dragging: bool,
    last_cursor: Option<Vec2>,
    last_frame: Instant,
}

/// Winit 0.30 requires window creation inside `resumed`, so the app is a
/// two-phase state machine: `Pending` before the window exists, `Running`
/// afterwards.
enum AppState {
    Pending {
        scene: Box<dyn Scene>,
        config: SandboxConfig,
    },
    Running(Box<RunningState>),
    /// Temporary placeholder used during state transitions.
    Transitioning,
}

struct SandboxApp {
    state: AppState,
    /// Set when window or renderer creation fails, so `run_windowed` can
    /// return an error after the event loop exits.
    init_failed: bool,
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let state = std::mem::replace(&mut self.state, AppState::Transitioning);
        match state {
            AppState::Pending { scene, config } => {
                let window_attrs = WindowAttributes::default()
                    .with_title(config.title.clone())
                    .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height));

                let window = match event_loop.create_window(window_attrs) {
                    Ok(window) => Arc::new(window),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to create window -- exiting");
                        self.init_failed = true;
                        self.state = AppState::Pending { scene, config };
                        event_loop.exit();
                        return;
                    }
                };

                match pollster::block_on(DebugRenderer::new(window.clone())) {
                    Ok(renderer) => {
                        // The camera viewport follows the actual
                        // framebuffer, not the requested window size.
                        let size = window.inner_size();
                        let mut setup = config.camera.clone();
                        setup.viewport_width = size.width.max(1);
                        setup.viewport_height = size.height.max(1);
                        let camera = Camera::new(&setup);

                        tracing::info!(
                            width = size.width,
                            height = size.height,
                            zoom = camera.zoom,
                            "sandbox window created"
                        );
                        window.request_redraw();

                        self.state = AppState::Running(Box::new(RunningState {
                            scene,
                            renderer,
                            camera,
                            controller: config.controller.clone(),
                            batch: GeometryBatcher::new(),
                            overlay: TextOverlay::new(),
                            dragging: false,
                            last_cursor: None,
                            last_frame: Instant::now(),
                        }));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to initialize renderer -- exiting");
                        self.init_failed = true;
                        self.state = AppState::Pending { scene, config };
                        event_loop.exit();
                    }
                }
            }
            running @ AppState::Running(_) => {
                // Already running; put the state back.
                self.state = running;
            }
            AppState::Transitioning => {
                tracing::warn!("resumed called during state transition");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let AppState::Running(s) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested -- shutting down");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                tracing::debug!(
                    width = new_size.width,
                    height = new_size.height,
                    "window resized"
                );
                s.renderer.resize(new_size);
                s.camera.resize_viewport(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state != ElementState::Pressed {
                    return;
                }
                match key.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::ArrowLeft) => {
                        s.controller.pan(&mut s.camera, Vec2::NEG_X);
                    }
                    PhysicalKey::Code(KeyCode::ArrowRight) => {
                        s.controller.pan(&mut s.camera, Vec2::X);
                    }
                    PhysicalKey::Code(KeyCode::ArrowUp) => {
                        s.controller.pan(&mut s.camera, Vec2::Y);
                    }
                    PhysicalKey::Code(KeyCode::ArrowDown) => {
                        s.controller.pan(&mut s.camera, Vec2::NEG_Y);
                    }
                    PhysicalKey::Code(KeyCode::KeyZ) => {
                        let step = s.controller.zoom_step;
                        s.controller.scale_zoom(&mut s.camera, step);
                    }
                    PhysicalKey::Code(KeyCode::KeyX) => {
                        let step = s.controller.zoom_step;
                        s.controller.scale_zoom(&mut s.camera, 1.0 / step);
                    }
                    PhysicalKey::Code(KeyCode::Home) => {
                        s.controller.home(&mut s.camera);
                    }
                    _ => {}
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Right,
                ..
            } => {
                s.dragging = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                if s.dragging {
                    if let Some(last) = s.last_cursor {
                        let delta = cursor - last;
                        // Winit's cursor y grows downward; the camera's
                        // screen space grows upward.
                        s.controller
                            .drag(&mut s.camera, Vec2::new(delta.x, -delta.y));
                    }
                }
                s.last_cursor = Some(cursor);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                s.controller.scroll_zoom(&mut s.camera, delta_y);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - s.last_frame).as_secs_f32();
                s.last_frame = now;

                s.camera.update();
                s.batch.set_zoom(s.camera.zoom);
                s.scene.frame(&mut s.batch, &mut s.overlay, dt);

                match s.renderer.render(&mut s.batch, &s.camera) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let size = s.renderer.window().inner_size();
                        s.renderer.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("GPU out of memory -- exiting");
                        event_loop.exit();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "surface error during render");
                    }
                }

                // Text layout belongs to an external overlay system; the
                // sandbox shell discards it.
                s.overlay.flush(&s.camera, &mut NullTextSink);

                s.renderer.window().request_redraw();
            }

            _ => {}
        }
    }
}
