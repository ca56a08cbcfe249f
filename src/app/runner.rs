//! Main application handler for the game

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

#[cfg(debug_assertions)]
use winit::keyboard::{KeyCode, PhysicalKey};

use super::config::AppConfig;
use super::debug_ui::DebugUIState;
use super::geometry::ViewportMapping;
use super::input::{GameInputHandler, InputCollector, InputContext, Rect, ViewportId};
use super::renderer::Renderer;
use super::window::{present_mode, window_attributes_from_config};
use crate::sim::World;
use crate::sim::moving_box::CursorHint;

/// The image showing the simulation
const GAME_VIEWPORT: ViewportId = ViewportId(0);
/// The floating debug window
const DEBUG_OVERLAY: ViewportId = ViewportId(1);

/// Main game application
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    world: World,
    debug_ui: DebugUIState,
    last_update: Option<Instant>,
    input_collector: InputCollector,
    input_context: InputContext,
}

impl App {
    /// Creates a new game application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");
        debug!(?config.moving_box, "Box configuration");

        let mut input_context = InputContext::new();
        input_context.register_handler(Box::new(GameInputHandler::new(GAME_VIEWPORT)));

        // Replaced with the real inner size once the window exists
        let arena = [config.window.width as f32, config.window.height as f32];
        let world = World::with_moving_box(config.moving_box.clone(), arena);

        Self {
            config,
            window: None,
            renderer: None,
            world,
            debug_ui: DebugUIState::default(),
            last_update: None,
            input_collector: InputCollector::new(),
            input_context,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(debug_assertions)]
    fn toggle_debug_window(&mut self) {
        self.debug_ui.toggle_window();
        if !self.debug_ui.show_window {
            self.input_context.unregister_viewport(DEBUG_OVERLAY);
        }
    }

    /// Sizes the arena to the window's logical inner size
    fn sync_arena(&mut self, window: &Window) {
        let size = window.inner_size().to_logical::<f32>(window.scale_factor());
        if let Some(moving_box) = self.world.moving_box_mut() {
            moving_box.set_arena(size.width, size.height);
        }
    }

    /// Routes collected input and applies the game's share of it to the box
    fn process_input(&mut self) {
        let viewport_rect = self.input_context.viewport_rect(GAME_VIEWPORT);
        if let Some(handler) = self
            .input_context
            .get_handler_typed_mut::<GameInputHandler>(GameInputHandler::NAME)
        {
            handler.set_viewport_rect(viewport_rect);
        }

        // Clone before advancing so edge states (JustPressed) are seen once
        self.input_context
            .update_state(self.input_collector.clone_state());
        self.input_context.process();
        self.input_collector.advance_frame();

        let Some(handler) = self
            .input_context
            .get_handler_typed_mut::<GameInputHandler>(GameInputHandler::NAME)
        else {
            return;
        };
        let actions = handler.take_actions();
        let cursor_local = handler.cursor_local();
        let movement = handler.movement();

        let Some(moving_box) = self.world.moving_box_mut() else {
            return;
        };
        moving_box.set_movement(movement);

        // Without a laid-out viewport there is nothing to map pointer input onto
        let Some(rect) = viewport_rect else {
            moving_box.set_cursor(None);
            return;
        };
        let mapping = ViewportMapping::new(rect, moving_box.arena());

        for action in actions {
            let Some((local_pos, resize)) = action.resize() else {
                continue;
            };
            let point = mapping.local_to_arena(local_pos);
            if moving_box.resize_at(point, resize) {
                debug!(
                    ?resize,
                    half_size = moving_box.half_size(),
                    "Box resized"
                );
            }
        }

        moving_box.set_cursor(cursor_local.map(|pos| mapping.local_to_arena(pos)));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let renderer_info = self.debug_ui.show_window.then(|| renderer.info());
        let debug_ui = &mut self.debug_ui;
        let world = &self.world;
        let input_context = &mut self.input_context;
        let cursor = world.moving_box().map(|b| b.cursor_hint());

        let result = renderer.draw(window, world, |ctx, texture_id| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    let size = ui.available_size();
                    let response = ui.image(egui::load::SizedTexture::new(texture_id, size));

                    let rect = response.rect;
                    input_context.register_viewport(
                        GAME_VIEWPORT,
                        Rect::new(rect.left(), rect.top(), rect.width(), rect.height()),
                        "sim_viewport",
                    );
                });

            match debug_ui.render(ctx, world, input_context, renderer_info.as_ref()) {
                Some(rect) => input_context.register_overlay(
                    DEBUG_OVERLAY,
                    Rect::new(rect.left(), rect.top(), rect.width(), rect.height()),
                    "debug_window",
                ),
                None => input_context.unregister_viewport(DEBUG_OVERLAY),
            }

            if let Some(icon) = cursor.and_then(cursor_icon) {
                ctx.set_cursor_icon(icon);
            }
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                warn!(error = %e, "Frame skipped");
            }
        }

        for command in self.debug_ui.take_commands() {
            debug!(?command, "Debug command");
            command.apply(&mut self.world);
        }
    }
}

/// Cursor icon for a hint; None leaves egui's own choice in place
fn cursor_icon(hint: CursorHint) -> Option<egui::CursorIcon> {
    match hint {
        CursorHint::Default => None,
        CursorHint::Hand => Some(egui::CursorIcon::PointingHand),
        CursorHint::NotAllowed => Some(egui::CursorIcon::NotAllowed),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            window.scale_factor = window.scale_factor(),
            "Window created successfully"
        );

        // winit's event loop is synchronous; wgpu setup is async
        let present_mode = present_mode(&self.config.window);
        let renderer = tokio::runtime::Runtime::new()
            .map_err(anyhow::Error::from)
            .and_then(|runtime| runtime.block_on(Renderer::new(window.clone(), present_mode)));

        match renderer {
            Ok(renderer) => {
                info!("Renderer initialized successfully");
                self.input_collector
                    .set_scale_factor(window.scale_factor() as f32);
                self.sync_arena(&window);
                self.renderer = Some(renderer);
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize renderer");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Input first so this tick sees the latest keys and clicks
        self.process_input();
        self.world.tick(delta_time);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let ui_consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window, &event),
            _ => false,
        };
        // Pointer events over the debug window are filtered by the overlay viewport
        self.input_collector.handle_window_event(&event, ui_consumed);

        #[cfg(debug_assertions)]
        if let WindowEvent::KeyboardInput { event, .. } = &event
            && event.state.is_pressed()
            && !event.repeat
            && let PhysicalKey::Code(KeyCode::Backquote) = event.physical_key
        {
            self.toggle_debug_window();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.input_collector.set_scale_factor(scale_factor as f32);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
                if let Some(window) = self.window.clone() {
                    self.sync_arena(&window);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_icons() {
        assert_eq!(cursor_icon(CursorHint::Default), None);
        assert_eq!(
            cursor_icon(CursorHint::Hand),
            Some(egui::CursorIcon::PointingHand)
        );
        assert_eq!(
            cursor_icon(CursorHint::NotAllowed),
            Some(egui::CursorIcon::NotAllowed)
        );
    }

    #[test]
    fn test_new_app_has_centered_box() {
        let app = App::new(AppConfig::with_defaults("test"));
        let moving_box = app.world().moving_box().expect("box simulation");
        assert_eq!(moving_box.center(), [400.0, 300.0]);
        assert_eq!(moving_box.half_size(), 25.0);
    }
}
