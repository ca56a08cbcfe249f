use super::viewport::Viewport;
use crate::app::{geometry, line_renderer::LineRenderer, shader_system::ShaderRegistry};
use crate::sim::World;

/// Background behind the box
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Draws the world into an offscreen texture shown by egui
pub struct SimRenderer {
    viewport: Viewport,
    shader_registry: ShaderRegistry,
}

impl SimRenderer {
    pub fn new(
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) -> Self {
        let viewport = Viewport::new(device, egui_renderer, width, height, "Sim Texture");

        let mut shader_registry = ShaderRegistry::new();
        shader_registry.register(Box::new(LineRenderer::new()));
        shader_registry.init_all(device, &Self::target_config(&viewport));

        Self {
            viewport,
            shader_registry,
        }
    }

    pub fn texture_id(&self) -> egui::TextureId {
        self.viewport.texture_id
    }

    /// Texture size in physical pixels
    pub fn texture_size(&self) -> [u32; 2] {
        self.viewport.size()
    }

    pub fn shader_names(&self) -> &[String] {
        self.shader_registry.names()
    }

    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) {
        // Pipelines only depend on the texture format, which never changes
        self.viewport.resize(device, egui_renderer, width, height);
    }

    /// Draws the moving box, or just the background when the world has none
    pub fn draw(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        world: &World,
    ) {
        if let Some(moving_box) = world.moving_box()
            && let Some(lines) = self.shader_registry.get_typed_mut::<LineRenderer>("line")
        {
            let [width, height] = moving_box.arena();
            lines.set_view_size(width, height);
            for line in geometry::generate_box(moving_box) {
                lines.draw(line);
            }
        }

        self.shader_registry.begin_frame(device, queue);

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sim Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.viewport.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shader_registry.render_all(&mut rpass);
        }

        self.shader_registry.end_frame();
    }

    fn target_config(viewport: &Viewport) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: Viewport::FORMAT,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }
}
