//! Line renderer for thick coloured segments
//!
//! Each line becomes a quad (two triangles) so thickness can be anything from
//! a hairline to a filled rectangle. Positions are given in view coordinates
//! (origin top-left, y down); `set_view_size` decides how they map onto the
//! render target, independently of its pixel size.

use wgpu::{
    BindGroup, Buffer, Device, Queue, RenderPass, RenderPipeline, SurfaceConfiguration,
    util::DeviceExt,
};

use super::shader_system::Shader;

const LINE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
}

struct Uniforms {
    view_size: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // View space has y pointing down; clip space has y pointing up
    let clip_x = (in.position.x / uniforms.view_size.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.view_size.y) * 2.0;

    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    color: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_size: [f32; 2],
}

/// Line segment definition
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub thickness: f32,
    pub color: [f32; 3],
}

impl Line {
    /// Creates a white line
    pub fn new(from: [f32; 2], to: [f32; 2], thickness: f32) -> Self {
        Self::colored(from, to, thickness, [1.0, 1.0, 1.0])
    }

    pub fn colored(from: [f32; 2], to: [f32; 2], thickness: f32, color: [f32; 3]) -> Self {
        Self {
            from,
            to,
            thickness,
            color,
        }
    }

    /// Appends the quad for this line; zero-length lines produce nothing
    fn push_vertices(&self, out: &mut Vec<Vertex>) {
        let dx = self.to[0] - self.from[0];
        let dy = self.to[1] - self.from[1];
        let len = (dx * dx + dy * dy).sqrt();

        if len == 0.0 {
            return;
        }

        // Half-thickness offset perpendicular to the line
        let px = -dy / len * self.thickness * 0.5;
        let py = dx / len * self.thickness * 0.5;

        let corner = |x: f32, y: f32| Vertex {
            position: [x, y],
            color: self.color,
        };
        let v1 = corner(self.from[0] + px, self.from[1] + py);
        let v2 = corner(self.from[0] - px, self.from[1] - py);
        let v3 = corner(self.to[0] - px, self.to[1] - py);
        let v4 = corner(self.to[0] + px, self.to[1] + py);

        out.extend_from_slice(&[v1, v2, v3, v1, v3, v4]);
    }
}

/// GPU objects created by `init`
struct Pipeline {
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    uniform_buffer: Buffer,
}

/// Line renderer shader
pub struct LineRenderer {
    gpu: Option<Pipeline>,
    vertex_buffer: Option<Buffer>,
    /// Vertex capacity of `vertex_buffer`
    vertex_capacity: usize,
    lines: Vec<Line>,
    vertices: Vec<Vertex>,
    vertex_count: u32,
    view_size: [f32; 2],
}

impl LineRenderer {
    pub fn new() -> Self {
        Self {
            gpu: None,
            vertex_buffer: None,
            vertex_capacity: 0,
            lines: Vec::new(),
            vertices: Vec::new(),
            vertex_count: 0,
            view_size: [800.0, 600.0],
        }
    }

    /// Queues a line for this frame
    pub fn draw(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Sets the size of the coordinate space lines are given in
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_size = [width.max(1.0), height.max(1.0)];
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.vertex_count = 0;
    }

    /// Uploads vertices, reusing the buffer while it is large enough
    fn upload_vertices(&mut self, device: &Device, queue: &Queue) {
        self.vertices.clear();
        for line in &self.lines {
            line.push_vertices(&mut self.vertices);
        }
        self.vertex_count = self.vertices.len() as u32;

        if self.vertices.is_empty() {
            return;
        }

        match &self.vertex_buffer {
            Some(buffer) if self.vertices.len() <= self.vertex_capacity => {
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(&self.vertices));
            }
            _ => {
                self.vertex_capacity = self.vertices.len().next_power_of_two();
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Line Vertex Buffer"),
                    size: (self.vertex_capacity * std::mem::size_of::<Vertex>())
                        as wgpu::BufferAddress,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&self.vertices));
                self.vertex_buffer = Some(buffer);
            }
        }
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Shader for LineRenderer {
    fn name(&self) -> &str {
        "line"
    }

    fn init(&mut self, device: &Device, config: &SurfaceConfiguration) {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms {
                view_size: self.view_size,
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Line Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        self.gpu = Some(Pipeline {
            pipeline,
            bind_group,
            uniform_buffer,
        });
    }

    fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        if let Some(gpu) = &self.gpu {
            let uniforms = Uniforms {
                view_size: self.view_size,
            };
            queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }
        self.upload_vertices(device, queue);
    }

    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        if self.vertex_count == 0 {
            return;
        }

        if let (Some(gpu), Some(vertex_buffer)) = (&self.gpu, &self.vertex_buffer) {
            rpass.set_pipeline(&gpu.pipeline);
            rpass.set_bind_group(0, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
            rpass.draw(0..self.vertex_count, 0..1);
        }
    }

    fn end_frame(&mut self) {
        self.clear();
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_quad() {
        let line = Line::colored([0.0, 10.0], [100.0, 10.0], 20.0, [0.0, 0.0, 1.0]);
        let mut vertices = Vec::new();
        line.push_vertices(&mut vertices);

        assert_eq!(vertices.len(), 6);
        let positions: Vec<_> = vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            [
                [0.0, 20.0],
                [0.0, 0.0],
                [100.0, 0.0],
                [0.0, 20.0],
                [100.0, 0.0],
                [100.0, 20.0],
            ]
        );
        assert!(vertices.iter().all(|v| v.color == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_zero_length_line_is_skipped() {
        let mut vertices = Vec::new();
        Line::new([5.0, 5.0], [5.0, 5.0], 3.0).push_vertices(&mut vertices);
        assert!(vertices.is_empty());
    }

    #[test]
    fn test_lines_cleared_at_end_of_frame() {
        let mut renderer = LineRenderer::new();
        renderer.draw(Line::new([0.0, 0.0], [1.0, 1.0], 1.0));
        assert_eq!(renderer.line_count(), 1);
        renderer.end_frame();
        assert_eq!(renderer.line_count(), 0);
    }

    #[test]
    fn test_view_size_never_zero() {
        let mut renderer = LineRenderer::new();
        renderer.set_view_size(0.0, 0.0);
        assert_eq!(renderer.view_size, [1.0, 1.0]);
    }
}
