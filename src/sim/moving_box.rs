//! Moving box simulation
//!
//! A square that moves with the arrow keys and grows or shrinks when clicked
//! or scrolled over. All coordinates are logical pixels in arena space
//! (origin top-left, y pointing down).

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

use super::Simulation;
use crate::app::config::MovingBoxConfig;

/// Upper bound on fixed steps run by a single tick
///
/// A long stall (window drag, breakpoint) would otherwise replay seconds of
/// movement in one frame.
pub const MAX_STEPS_PER_TICK: u32 = 8;

/// Arrow direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which directions are currently held
pub type Movement = EnumMap<Direction, bool>;

/// Size change requested by a click or scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Grow,
    Shrink,
}

/// Cursor icon the box asks the window to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Hovering the box and it can still change size
    Hand,
    /// Hovering the box but it is at its minimum or maximum size
    NotAllowed,
}

/// Moving box game state
#[derive(Debug, Clone)]
pub struct MovingBoxSimulation {
    config: MovingBoxConfig,
    center: [f32; 2],
    half_size: f32,
    arena: [f32; 2],
    cursor: Option<[f32; 2]>,
    movement: Movement,
    step_accumulator: f32,
    steps: u64,
}

impl MovingBoxSimulation {
    /// Name under which the simulation is registered in the world
    pub const NAME: &'static str = "moving_box";

    /// Creates a box centred in an arena of the given size
    pub fn new(config: MovingBoxConfig, arena: [f32; 2]) -> Self {
        let half_size = config
            .initial_half_size
            .clamp(config.min_half_size, config.max_half_size);
        Self {
            config,
            center: [arena[0] / 2.0, arena[1] / 2.0],
            half_size,
            arena,
            cursor: None,
            movement: Movement::default(),
            step_accumulator: 0.0,
            steps: 0,
        }
    }

    /// Runs one fixed movement step with the held directions
    fn step(&mut self) {
        let speed = self.config.speed;
        let half = self.half_size;
        let [width, height] = self.arena;
        let [x, y] = &mut self.center;

        // Each guard checks the edge the box moves toward; the step is then
        // clamped to that edge so it never overshoots.
        if self.movement[Direction::Up] && *y > half {
            *y = (*y - speed).max(half);
        }
        if self.movement[Direction::Down] && *y < height - half {
            *y = (*y + speed).min(height - half);
        }
        if self.movement[Direction::Left] && *x > half {
            *x = (*x - speed).max(half);
        }
        if self.movement[Direction::Right] && *x < width - half {
            *x = (*x + speed).min(width - half);
        }

        self.steps += 1;
    }

    /// Returns true if the point lies on or inside the box
    pub fn contains(&self, point: [f32; 2]) -> bool {
        (point[0] - self.center[0]).abs() <= self.half_size
            && (point[1] - self.center[1]).abs() <= self.half_size
    }

    /// Grows or shrinks the box if `point` is over it
    ///
    /// Returns true if the size changed.
    pub fn resize_at(&mut self, point: [f32; 2], resize: Resize) -> bool {
        if !self.contains(point) {
            return false;
        }

        let MovingBoxConfig {
            min_half_size: min,
            max_half_size: max,
            resize_step,
            ..
        } = self.config;

        let new_size = match resize {
            Resize::Grow if self.half_size < max => (self.half_size + resize_step).min(max),
            Resize::Shrink if self.half_size > min => (self.half_size - resize_step).max(min),
            _ => return false,
        };

        self.half_size = new_size;
        true
    }

    /// Cursor icon for the current pointer position
    pub fn cursor_hint(&self) -> CursorHint {
        match self.cursor {
            Some(pos) if self.contains(pos) => {
                if self.is_at_size_limit() {
                    CursorHint::NotAllowed
                } else {
                    CursorHint::Hand
                }
            }
            _ => CursorHint::Default,
        }
    }

    fn is_at_size_limit(&self) -> bool {
        self.half_size <= self.config.min_half_size || self.half_size >= self.config.max_half_size
    }

    /// Updates the pointer position (None when it left the arena)
    pub fn set_cursor(&mut self, cursor: Option<[f32; 2]>) {
        self.cursor = cursor;
    }

    /// Replaces the set of held directions
    pub fn set_movement(&mut self, movement: Movement) {
        self.movement = movement;
    }

    /// Resizes the arena; the box keeps its position
    pub fn set_arena(&mut self, width: f32, height: f32) {
        self.arena = [width, height];
    }

    // Accessors for rendering and debugging

    pub fn center(&self) -> [f32; 2] {
        self.center
    }

    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    pub fn arena(&self) -> [f32; 2] {
        self.arena
    }

    pub fn cursor(&self) -> Option<[f32; 2]> {
        self.cursor
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    /// Total fixed steps run so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Box corners as (top-left, bottom-right)
    pub fn bounds(&self) -> ([f32; 2], [f32; 2]) {
        let [x, y] = self.center;
        let h = self.half_size;
        ([x - h, y - h], [x + h, y + h])
    }

    pub fn config(&self) -> &MovingBoxConfig {
        &self.config
    }
}

impl Simulation for MovingBoxSimulation {
    fn tick(&mut self, delta_time: f32) {
        let step_time = 1.0 / self.config.tick_rate;
        self.step_accumulator += delta_time;

        let mut steps = 0;
        while self.step_accumulator >= step_time && steps < MAX_STEPS_PER_TICK {
            self.step();
            self.step_accumulator -= step_time;
            steps += 1;
        }

        if steps == MAX_STEPS_PER_TICK {
            self.step_accumulator = self.step_accumulator.min(step_time);
        }
    }

    fn reset(&mut self) {
        let arena = self.arena;
        *self = Self::new(self.config.clone(), arena);
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
