//! Debug UI health check

use crate::app::MovingBoxConfig;
use crate::app::debug_ui::{DebugCommand, DebugUIState};
use crate::app::input::InputContext;
use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::World;

/// Renders the debug window headlessly and exercises its controls
pub struct DebugUICheck;

impl DebugUICheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DebugUICheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for DebugUICheck {
    fn name(&self) -> &'static str {
        "Debug UI"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates headless debug window layout and command handling")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let ui_state = DebugUIState::default();
        if ui_state.show_window != cfg!(debug_assertions) {
            details.push("  ✗ Debug window default should follow the build type".to_string());
            return CheckResult::fail("Incorrect default state").with_details(details.join("\n"));
        }
        details.push(format!(
            "  ✓ Default visibility: {}",
            if ui_state.show_window { "visible" } else { "hidden" }
        ));

        let mut ui_state = ui_state;
        ui_state.show_window = true;
        ui_state.show_input = true;
        let ctx = egui::Context::default();
        let mut world = World::with_moving_box(MovingBoxConfig::default(), [800.0, 600.0]);
        let input = InputContext::new();

        // egui needs a couple of passes to settle window sizes
        let mut rect = None;
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                rect = ui_state.render(ctx, &world, &input, None);
            });
        }

        match rect {
            Some(rect) if rect.width() > 0.0 && rect.height() > 0.0 => {
                details.push(format!(
                    "  ✓ Window laid out: {:.0}x{:.0}",
                    rect.width(),
                    rect.height()
                ));
            }
            _ => {
                details.push("  ✗ Window produced no area".to_string());
                return CheckResult::fail("Debug window layout failed")
                    .with_details(details.join("\n"));
            }
        }

        DebugCommand::SetPaused(true).apply(&mut world);
        DebugCommand::SetTimeScale(0.5).apply(&mut world);
        if !world.is_paused() || world.time_scale() != 0.5 {
            details.push("  ✗ Commands did not reach the world".to_string());
            return CheckResult::fail("Debug commands broken").with_details(details.join("\n"));
        }
        details.push("  ✓ Commands apply to the world".to_string());

        CheckResult::pass("Debug UI operational").with_details(details.join("\n"))
    }
}
