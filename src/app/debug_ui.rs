//! Debug UI state and rendering

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use sysinfo::System;

use super::input::InputContext;
use crate::sim::World;
use crate::sim::moving_box::Direction;

const FRAME_HISTORY: usize = 100;
const SYSTEM_REFRESH: Duration = Duration::from_secs(2);

/// World changes requested from the debug window, applied after the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugCommand {
    SetPaused(bool),
    SetTimeScale(f32),
    ResetSimulations,
}

impl DebugCommand {
    pub fn apply(self, world: &mut World) {
        match self {
            DebugCommand::SetPaused(paused) => world.set_paused(paused),
            DebugCommand::SetTimeScale(scale) => world.set_time_scale(scale),
            DebugCommand::ResetSimulations => world.reset_all_simulations(),
        }
    }
}

/// Renderer facts shown in the debug window
///
/// Captured before drawing because the renderer is busy while egui runs.
#[derive(Debug, Clone, Default)]
pub struct RendererInfo {
    pub adapter: String,
    pub backend: String,
    pub surface_size: [u32; 2],
    pub surface_format: String,
    pub present_mode: String,
    pub sim_texture_size: [u32; 2],
    pub shaders: Vec<String>,
}

#[derive(Debug, Clone)]
struct SystemSnapshot {
    os: String,
    kernel: String,
    physical_cores: usize,
    logical_cores: usize,
    total_memory_gb: f64,
    used_memory_gb: f64,
    taken_at: Instant,
}

impl SystemSnapshot {
    fn take() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let unknown = || "Unknown".to_string();
        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            kernel: System::kernel_version().unwrap_or_else(unknown),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: sys.cpus().len(),
            total_memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
            used_memory_gb: sys.used_memory() as f64 / 1_073_741_824.0,
            taken_at: Instant::now(),
        }
    }
}

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_world_state: bool,
    pub show_box_state: bool,
    pub show_input: bool,
    pub show_debug_info: bool,
    pub show_system_info: bool,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    system: Option<SystemSnapshot>,
    commands: Vec<DebugCommand>,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_world_state: true,
            show_box_state: true,
            show_input: false,
            show_debug_info: true,
            show_system_info: false,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY),
            last_frame_time: Instant::now(),
            system: None,
            commands: Vec::new(),
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility (debug builds only)
    #[cfg(debug_assertions)]
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        self.record_frame_time((now - self.last_frame_time).as_secs_f32());
        self.last_frame_time = now;
    }

    fn record_frame_time(&mut self, frame_time: f32) {
        if self.frame_times.len() == FRAME_HISTORY {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    /// Average FPS over the recent frame history
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Drains commands issued from the window since the last call
    pub fn take_commands(&mut self) -> Vec<DebugCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Renders the debug window
    ///
    /// Returns the window's screen rectangle so input under it can be kept
    /// away from the game, or None when the window is hidden.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        world: &World,
        input: &InputContext,
        renderer: Option<&RendererInfo>,
    ) -> Option<egui::Rect> {
        if !self.show_window {
            return None;
        }

        self.update_frame_time();

        let response = egui::Window::new("Debug Info")
            .default_pos([10.0, 10.0])
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.checkbox(&mut self.show_fps, "FPS");
                    ui.checkbox(&mut self.show_world_state, "World");
                    ui.checkbox(&mut self.show_box_state, "Box");
                    ui.checkbox(&mut self.show_input, "Input");
                    ui.checkbox(&mut self.show_debug_info, "Renderer");
                    ui.checkbox(&mut self.show_system_info, "System");
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if self.show_fps {
                            self.fps_section(ui);
                        }
                        if self.show_world_state {
                            self.world_section(ui, world);
                        }
                        if self.show_box_state {
                            box_section(ui, world);
                        }
                        if self.show_input {
                            input_section(ui, input);
                        }
                        if self.show_debug_info {
                            renderer_section(ui, renderer);
                        }
                        if self.show_system_info {
                            self.system_section(ui);
                        }
                    });
            });

        response.map(|inner| inner.response.rect)
    }

    fn fps_section(&self, ui: &mut egui::Ui) {
        ui.heading("FPS");
        ui.label(format!("FPS: {:.1}", self.fps()));
        let last = self.frame_times.back().copied().unwrap_or(0.0);
        ui.label(format!("Frame time: {:.2}ms", last * 1000.0));
        ui.separator();
    }

    fn world_section(&mut self, ui: &mut egui::Ui, world: &World) {
        ui.heading("World State");
        ui.label(format!("Simulation time: {:.2}s", world.sim_time()));
        ui.label(format!("Tick count: {}", world.tick_count()));

        let mut paused = world.is_paused();
        if ui.checkbox(&mut paused, "Paused").changed() {
            self.commands.push(DebugCommand::SetPaused(paused));
        }

        let mut time_scale = world.time_scale();
        if ui
            .add(egui::Slider::new(&mut time_scale, 0.0..=4.0).text("Time scale"))
            .changed()
        {
            self.commands.push(DebugCommand::SetTimeScale(time_scale));
        }

        if ui.button("Reset").clicked() {
            self.commands.push(DebugCommand::ResetSimulations);
        }
        ui.separator();
    }

    fn system_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("System Info");

        let stale = self
            .system
            .as_ref()
            .is_none_or(|snapshot| snapshot.taken_at.elapsed() >= SYSTEM_REFRESH);
        if stale {
            self.system = Some(SystemSnapshot::take());
        }

        if let Some(system) = &self.system {
            ui.label(format!("OS: {}", system.os));
            ui.label(format!("Kernel: {}", system.kernel));
            ui.label(format!(
                "Cores: {} physical, {} logical",
                system.physical_cores, system.logical_cores
            ));
            ui.label(format!(
                "Memory: {:.1} / {:.1} GB",
                system.used_memory_gb, system.total_memory_gb
            ));
        }
        ui.separator();
    }
}

fn box_section(ui: &mut egui::Ui, world: &World) {
    ui.heading("Box");
    let Some(moving_box) = world.moving_box() else {
        ui.label("No box simulation");
        ui.separator();
        return;
    };

    let [x, y] = moving_box.center();
    let [w, h] = moving_box.arena();
    ui.label(format!("Center: ({x:.1}, {y:.1})"));
    ui.label(format!(
        "Size: {:.0} (limits {:.0}..={:.0})",
        moving_box.half_size() * 2.0,
        moving_box.config().min_half_size * 2.0,
        moving_box.config().max_half_size * 2.0
    ));
    ui.label(format!("Arena: {w:.0}x{h:.0}"));

    let held: Vec<_> = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ]
    .into_iter()
    .filter(|&direction| moving_box.movement()[direction])
    .map(|direction| format!("{direction:?}"))
    .collect();
    ui.label(format!(
        "Moving: {}",
        if held.is_empty() {
            "-".to_string()
        } else {
            held.join(" ")
        }
    ));

    match moving_box.cursor() {
        Some([cx, cy]) => ui.label(format!(
            "Cursor: ({cx:.1}, {cy:.1}) {:?}",
            moving_box.cursor_hint()
        )),
        None => ui.label("Cursor: outside"),
    };
    ui.label(format!("Steps: {}", moving_box.steps()));
    ui.separator();
}

fn input_section(ui: &mut egui::Ui, input: &InputContext) {
    ui.heading("Input");

    match input.state().mouse.screen_pos {
        Some([x, y]) => ui.label(format!("Pointer: ({x:.1}, {y:.1})")),
        None => ui.label("Pointer: outside window"),
    };

    for (button, state) in input.debug_buttons() {
        if state.is_down() {
            ui.label(format!("{button:?}: {state:?}"));
        }
    }

    ui.label("Handlers:");
    for (name, priority) in input.debug_handlers() {
        ui.label(format!("  {name} (priority {priority})"));
    }

    ui.label("Viewports:");
    for (id, rect, name) in input.debug_viewports() {
        ui.label(format!(
            "  {} {name}: {:.0}x{:.0} at ({:.0}, {:.0})",
            id.0, rect.width, rect.height, rect.x, rect.y
        ));
    }

    let events = input.debug_last_events();
    if !events.is_empty() {
        ui.label("Events:");
        for event in events {
            ui.label(format!("  {event}"));
        }
    }
    ui.separator();
}

fn renderer_section(ui: &mut egui::Ui, renderer: Option<&RendererInfo>) {
    ui.heading("Renderer Info");
    match renderer {
        Some(info) => {
            ui.label(format!("Adapter: {} ({})", info.adapter, info.backend));
            ui.label(format!(
                "Surface: {}x{} {}",
                info.surface_size[0], info.surface_size[1], info.surface_format
            ));
            ui.label(format!("Present mode: {}", info.present_mode));
            ui.label(format!(
                "Sim texture: {}x{}",
                info.sim_texture_size[0], info.sim_texture_size[1]
            ));
            ui.label(format!("Shaders: {}", info.shaders.join(", ")));
        }
        None => {
            ui.label("No renderer");
        }
    }
    ui.separator();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::MovingBoxConfig;

    #[test]
    fn test_fps_from_history() {
        let mut state = DebugUIState::default();
        assert_eq!(state.fps(), 0.0);

        for _ in 0..10 {
            state.record_frame_time(0.02);
        }
        assert!((state.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_history_is_bounded() {
        let mut state = DebugUIState::default();
        for _ in 0..(FRAME_HISTORY * 2) {
            state.record_frame_time(0.01);
        }
        assert_eq!(state.frame_times.len(), FRAME_HISTORY);
    }

    #[test]
    fn test_commands_apply_to_world() {
        let mut world = World::with_moving_box(MovingBoxConfig::default(), [800.0, 600.0]);

        DebugCommand::SetPaused(true).apply(&mut world);
        assert!(world.is_paused());

        DebugCommand::SetTimeScale(2.5).apply(&mut world);
        assert_eq!(world.time_scale(), 2.5);
    }

    #[test]
    fn test_hidden_window_has_no_rect() {
        let ctx = egui::Context::default();
        let world = World::with_moving_box(MovingBoxConfig::default(), [800.0, 600.0]);
        let input = InputContext::new();
        let mut state = DebugUIState {
            show_window: false,
            ..Default::default()
        };

        let mut rect = Some(egui::Rect::NOTHING);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            rect = state.render(ctx, &world, &input, None);
        });
        assert!(rect.is_none());
    }

    #[test]
    fn test_visible_window_reports_rect() {
        let ctx = egui::Context::default();
        let world = World::with_moving_box(MovingBoxConfig::default(), [800.0, 600.0]);
        let input = InputContext::new();
        let mut state = DebugUIState {
            show_window: true,
            show_input: true,
            ..Default::default()
        };

        let mut rect = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            rect = state.render(ctx, &world, &input, Some(&RendererInfo::default()));
        });
        let rect = rect.expect("window shown");
        assert!(rect.width() > 0.0 && rect.height() > 0.0);
        assert!(state.take_commands().is_empty());
    }
}
