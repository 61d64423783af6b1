//! The wgpu surface owner and per-frame renderer.
//!
//! [`DebugRenderer::new`] performs async adapter/device selection and
//! surface configuration; [`DebugRenderer::render`] opens a single clear
//! pass per frame and flushes the batcher through a
//! [`GeometryPass`](crate::pipeline::GeometryPass). The renderer does not
//! own the event loop -- the windowed runner drives it.

use std::sync::Arc;

use loupe_draw::batch::GeometryBatcher;
use loupe_draw::camera::Camera;

use crate::pipeline::{DebugPipelines, GeometryPass};

/// Debug overlay renderer bound to one window surface.
pub struct DebugRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: DebugPipelines,
    window: Arc<winit::window::Window>,
}

impl DebugRenderer {
    /// Initialize wgpu: surface, device, queue, pipelines.
    ///
    /// Async because wgpu adapter/device selection is asynchronous; call
    /// with `.await` or `pollster::block_on`.
    ///
    /// # Errors
    ///
    /// Returns an error if no suitable GPU adapter or device is
    /// available.
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self, anyhow::Error> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no suitable GPU adapter found"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("loupe_debug_renderer"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipelines = DebugPipelines::new(&device, surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipelines,
            window,
        })
    }

    /// Render one frame: flush the accumulated batch over a cleared
    /// background, using the camera's projection-view matrix. The batch
    /// comes back empty.
    ///
    /// # Errors
    ///
    /// Returns a [`wgpu::SurfaceError`] if the surface cannot provide an
    /// output texture (window minimized, surface lost).
    pub fn render(
        &mut self,
        batch: &mut GeometryBatcher,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("debug_render_encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("debug_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut backend = GeometryPass::new(&self.pipelines, &self.queue, &mut rpass);
            batch.render(camera.projection_view(0.0), &mut backend);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Resize the surface when the window size changes. The new size must
    /// have non-zero width and height.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Get a reference to the window.
    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }
}
