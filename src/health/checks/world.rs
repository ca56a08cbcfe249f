//! Game world/simulation health check

use crate::app::MovingBoxConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::World;
use crate::sim::moving_box::{CursorHint, Direction, Movement, Resize};

/// Plays a short scripted session against the box simulation
pub struct WorldCheck;

impl WorldCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorldCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn fail(details: &mut Vec<String>, line: &str, message: &str) -> CheckResult {
    details.push(format!("  ✗ {line}"));
    CheckResult::fail(message.to_string()).with_details(details.join("\n"))
}

impl SystemCheck for WorldCheck {
    fn name(&self) -> &'static str {
        "World/Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates world ticking and box movement, resizing and cursor hints")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let config = MovingBoxConfig::default();
        let mut world = World::with_moving_box(config.clone(), [800.0, 600.0]);

        let Some(moving_box) = world.moving_box() else {
            return fail(&mut details, "No box simulation registered", "World setup failed");
        };
        if moving_box.center() != [400.0, 300.0] {
            return fail(&mut details, "Box should start centered", "World setup failed");
        }
        details.push("  ✓ Box starts centered".to_string());

        // One second holding Right at 60 steps/s moves 300px
        let mut movement = Movement::default();
        movement[Direction::Right] = true;
        if let Some(moving_box) = world.moving_box_mut() {
            moving_box.set_movement(movement);
        }
        for _ in 0..60 {
            world.tick(1.0 / 60.0);
        }
        let center = world.moving_box().map(|b| b.center()).unwrap_or_default();
        if (center[0] - 700.0).abs() > config.speed {
            return fail(
                &mut details,
                &format!("Expected x near 700 after 1s, got {:.1}", center[0]),
                "Box movement failed",
            );
        }
        details.push(format!("  ✓ Movement: x={:.1} after 60 ticks", center[0]));

        // Keep going; the right edge must hold
        for _ in 0..60 {
            world.tick(1.0 / 60.0);
        }
        let Some(moving_box) = world.moving_box_mut() else {
            return fail(&mut details, "Box simulation disappeared", "World tick failed");
        };
        let right = moving_box.center()[0] + moving_box.half_size();
        if right > 800.0 {
            return fail(&mut details, "Box crossed the right edge", "Edge guard failed");
        }
        details.push(format!("  ✓ Edge guard: right edge at {right:.1}"));

        let center = moving_box.center();
        moving_box.set_movement(Movement::default());
        moving_box.set_cursor(Some(center));
        if moving_box.cursor_hint() != CursorHint::Hand {
            return fail(&mut details, "Cursor over box should be a hand", "Cursor hint failed");
        }
        if !moving_box.resize_at(center, Resize::Grow) {
            return fail(&mut details, "Grow over box had no effect", "Resize failed");
        }
        if moving_box.resize_at([0.0, 0.0], Resize::Shrink) {
            return fail(&mut details, "Shrink away from box had an effect", "Resize failed");
        }
        details.push(format!("  ✓ Resize: half size {}", moving_box.half_size()));

        world.pause();
        let ticks = world.tick_count();
        world.tick(1.0);
        if world.tick_count() != ticks {
            return fail(&mut details, "Paused world still ticked", "World pause failed");
        }
        world.resume();
        details.push("  ✓ Pause state: working".to_string());

        world.reset_all_simulations();
        let reset = world
            .moving_box()
            .map(|b| (b.center(), b.half_size()))
            .unwrap_or_default();
        if reset != ([400.0, 300.0], config.initial_half_size) {
            return fail(&mut details, "Reset did not restore the box", "World reset failed");
        }
        details.push("  ✓ Reset restores the box".to_string());

        CheckResult::pass("All world systems operational").with_details(details.join("\n"))
    }
}
