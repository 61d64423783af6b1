//! wgpu pipelines and buffers for the three debug primitive classes.
//!
//! One pipeline per primitive topology: filled triangles, line segments,
//! and instanced point quads. All three share a single 4x4 matrix uniform
//! and standard alpha blending (source alpha / one-minus-source-alpha),
//! so translucent fills composite over whatever the pass cleared to.
//!
//! Vertex buffers are allocated once at the batcher capacities and
//! rewritten every frame; the batcher guarantees it never hands over a
//! slice larger than its capacity.

use glam::Mat4;
use loupe_draw::batch::{
    GeometryBackend, PointInstance, Vertex, MAX_LINE_VERTICES, MAX_POINT_INSTANCES,
    MAX_TRIANGLE_VERTICES,
};

/// Shader uniform block: the projection-view matrix.
#[repr(C)]
#[derive(Copy, Clone, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Corner of the unit quad instanced for point markers.
#[repr(C)]
#[derive(Copy, Clone, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [-0.5, -0.5] },
    QuadVertex { corner: [0.5, -0.5] },
    QuadVertex { corner: [-0.5, 0.5] },
    QuadVertex { corner: [0.5, 0.5] },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 3, 2];

const GEOMETRY_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // position
    1 => Unorm8x4   // packed RGBA8 color
];

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
    0 => Float32x2  // quad corner
];

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    1 => Float32x3, // x, y, size
    2 => Unorm8x4   // packed RGBA8 color
];

fn geometry_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &GEOMETRY_ATTRS,
    }
}

/// GPU resources shared by every debug draw call: one pipeline and one
/// pre-sized vertex buffer per primitive class, plus the matrix uniform.
pub struct DebugPipelines {
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    triangle_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    point_instance_buffer: wgpu::Buffer,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl DebugPipelines {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("debug_geometry_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("debug_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("debug_uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("debug_uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("debug_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let geometry_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_geometry"),
                    buffers: &[geometry_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_color"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let triangle_pipeline = geometry_pipeline(
            "debug_triangle_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline =
            geometry_pipeline("debug_line_pipeline", wgpu::PrimitiveTopology::LineList);

        let point_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("debug_point_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_point"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &QUAD_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<PointInstance>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRS,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_color"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let triangle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("debug_triangle_buffer"),
            size: (MAX_TRIANGLE_VERTICES * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("debug_line_buffer"),
            size: (MAX_LINE_VERTICES * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let point_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("debug_point_instance_buffer"),
            size: (MAX_POINT_INSTANCES * std::mem::size_of::<PointInstance>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("debug_quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("debug_quad_index_buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            triangle_pipeline,
            line_pipeline,
            point_pipeline,
            triangle_buffer,
            line_buffer,
            point_instance_buffer,
            quad_vertex_buffer,
            quad_index_buffer,
            uniform_buffer,
            uniform_bind_group,
        }
    }
}

/// One frame's geometry sink: uploads vertex data and records draw calls
/// into the surrounding render pass.
///
/// The batcher calls each method at most once per frame, with a non-empty
/// slice bounded by the corresponding capacity constant.
pub struct GeometryPass<'a, 'p> {
    pipelines: &'a DebugPipelines,
    queue: &'a wgpu::Queue,
    rpass: &'a mut wgpu::RenderPass<'p>,
}

impl<'a, 'p> GeometryPass<'a, 'p> {
    pub fn new(
        pipelines: &'a DebugPipelines,
        queue: &'a wgpu::Queue,
        rpass: &'a mut wgpu::RenderPass<'p>,
    ) -> Self {
        Self {
            pipelines,
            queue,
            rpass,
        }
    }

    fn write_uniform(&self, view_proj: Mat4) {
        self.queue.write_buffer(
            &self.pipelines.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );
    }
}

impl GeometryBackend for GeometryPass<'_, '_> {
    fn draw_triangles(&mut self, vertices: &[Vertex], view_proj: Mat4) {
        self.write_uniform(view_proj);
        self.queue.write_buffer(
            &self.pipelines.triangle_buffer,
            0,
            bytemuck::cast_slice(vertices),
        );
        self.rpass.set_pipeline(&self.pipelines.triangle_pipeline);
        self.rpass
            .set_bind_group(0, &self.pipelines.uniform_bind_group, &[]);
        self.rpass
            .set_vertex_buffer(0, self.pipelines.triangle_buffer.slice(..));
        self.rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn draw_lines(&mut self, vertices: &[Vertex], view_proj: Mat4) {
        self.write_uniform(view_proj);
        self.queue.write_buffer(
            &self.pipelines.line_buffer,
            0,
            bytemuck::cast_slice(vertices),
        );
        self.rpass.set_pipeline(&self.pipelines.line_pipeline);
        self.rpass
            .set_bind_group(0, &self.pipelines.uniform_bind_group, &[]);
        self.rpass
            .set_vertex_buffer(0, self.pipelines.line_buffer.slice(..));
        self.rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn draw_points(&mut self, instances: &[PointInstance], view_proj: Mat4) {
        self.write_uniform(view_proj);
        self.queue.write_buffer(
            &self.pipelines.point_instance_buffer,
            0,
            bytemuck::cast_slice(instances),
        );
        self.rpass.set_pipeline(&self.pipelines.point_pipeline);
        self.rpass
            .set_bind_group(0, &self.pipelines.uniform_bind_group, &[]);
        self.rpass
            .set_vertex_buffer(0, self.pipelines.quad_vertex_buffer.slice(..));
        self.rpass
            .set_vertex_buffer(1, self.pipelines.point_instance_buffer.slice(..));
        self.rpass.set_index_buffer(
            self.pipelines.quad_index_buffer.slice(..),
            wgpu::IndexFormat::Uint16,
        );
        self.rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_struct_sizes_match_vertex_layouts() {
        // The attribute formats above assume these exact strides.
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(std::mem::size_of::<PointInstance>(), 16);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 8);
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
    }

    #[test]
    fn quad_indices_cover_every_corner() {
        let mut seen = [false; 4];
        for &i in &QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(QUAD_INDICES.len(), 6);
    }

    #[test]
    fn shader_declares_expected_entry_points() {
        let source = include_str!("shaders.wgsl");
        for entry in ["vs_geometry", "vs_point", "fs_color"] {
            assert!(source.contains(entry), "missing entry point {entry}");
        }
    }
}
