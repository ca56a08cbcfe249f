/// An offscreen render target that egui can display as an image
pub struct Viewport {
    pub texture_id: egui::TextureId,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
    label: String,
}

impl Viewport {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub fn new(
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let (width, height) = (width.max(1), height.max(1));
        let (texture, view) = Self::create_texture(device, width, height, &label);

        let texture_id =
            egui_renderer.register_native_texture(device, &view, wgpu::FilterMode::Linear);

        Self {
            texture_id,
            texture,
            view,
            width,
            height,
            label,
        }
    }

    /// Recreates the texture at a new size; returns false when nothing changed
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) -> bool {
        // Zero-sized textures are invalid
        let (width, height) = (width.max(1), height.max(1));
        if self.width == width && self.height == height {
            return false;
        }

        self.width = width;
        self.height = height;

        egui_renderer.free_texture(&self.texture_id);

        let (texture, view) = Self::create_texture(device, width, height, &self.label);
        self.texture = texture;
        self.view = view;
        self.texture_id =
            egui_renderer.register_native_texture(device, &self.view, wgpu::FilterMode::Linear);

        tracing::debug!(label = %self.label, width, height, "Viewport texture recreated");
        true
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    fn create_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        (texture, view)
    }
}
