//! Pluggable shader system for declarative rendering
//!
//! Shaders register once and are then driven through the same frame cycle:
//! `begin_frame` uploads, `render_all` records draws in registration order,
//! `end_frame` clears per-frame state.

use std::collections::HashMap;
use wgpu::{Device, Queue, RenderPass, SurfaceConfiguration};

/// Trait that all shaders must implement
pub trait Shader: Send + Sync {
    /// Returns the shader's unique name
    fn name(&self) -> &str;

    /// Creates GPU resources for the given target configuration
    fn init(&mut self, device: &Device, config: &SurfaceConfiguration);

    /// Uploads whatever was queued for this frame
    fn begin_frame(&mut self, device: &Device, queue: &Queue);

    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>);

    fn end_frame(&mut self);

    /// Allows downcasting to concrete types
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Registry for managing shaders
pub struct ShaderRegistry {
    shaders: HashMap<String, Box<dyn Shader>>,
    render_order: Vec<String>,
}

impl ShaderRegistry {
    pub fn new() -> Self {
        Self {
            shaders: HashMap::new(),
            render_order: Vec::new(),
        }
    }

    /// Registers a shader with the registry
    ///
    /// Shaders are rendered in the order they are registered. Registering a
    /// name twice replaces the earlier shader but keeps its slot.
    pub fn register(&mut self, shader: Box<dyn Shader>) {
        let name = shader.name().to_string();
        if !self.render_order.contains(&name) {
            self.render_order.push(name.clone());
        }
        self.shaders.insert(name, shader);
    }

    pub fn init_all(&mut self, device: &Device, config: &SurfaceConfiguration) {
        for name in &self.render_order {
            if let Some(shader) = self.shaders.get_mut(name) {
                shader.init(device, config);
            }
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Shader + '_)> {
        if let Some(shader) = self.shaders.get_mut(name) {
            Some(shader.as_mut())
        } else {
            None
        }
    }

    /// Gets a shader by name, downcast to its concrete type
    pub fn get_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.shaders
            .get_mut(name)
            .and_then(|shader| shader.as_any_mut().downcast_mut::<T>())
    }

    pub fn names(&self) -> &[String] {
        &self.render_order
    }

    pub fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        for shader in self.shaders.values_mut() {
            shader.begin_frame(device, queue);
        }
    }

    /// Renders all shaders in registration order
    pub fn render_all<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        for name in &self.render_order {
            if let Some(shader) = self.shaders.get(name) {
                shader.render(rpass);
            }
        }
    }

    pub fn end_frame(&mut self) {
        for shader in self.shaders.values_mut() {
            shader.end_frame();
        }
    }
}

impl Default for ShaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
