//! Geometry generators and coordinate mapping for the box view

use super::input::Rect;
use super::line_renderer::Line;
use crate::sim::moving_box::MovingBoxSimulation;

pub const BOX_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const CROSS_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
pub const CROSS_THICKNESS: f32 = 3.0;

/// Generates the lines that draw the box
///
/// The filled square is a single horizontal line as thick as the box is tall;
/// the two blue diagonals are drawn on top of it.
pub fn generate_box(sim: &MovingBoxSimulation) -> Vec<Line> {
    let ([left, top], [right, bottom]) = sim.bounds();
    let [_, center_y] = sim.center();
    let edge = sim.half_size() * 2.0;

    vec![
        Line::colored([left, center_y], [right, center_y], edge, BOX_COLOR),
        // Top-right to bottom-left
        Line::colored([right, top], [left, bottom], CROSS_THICKNESS, CROSS_COLOR),
        // Top-left to bottom-right
        Line::colored([left, top], [right, bottom], CROSS_THICKNESS, CROSS_COLOR),
    ]
}

/// Maps positions inside a displayed viewport onto the arena it shows
#[derive(Debug, Clone, Copy)]
pub struct ViewportMapping {
    /// Viewport size on screen, logical pixels
    pub view_size: [f32; 2],
    /// Arena size the viewport displays
    pub arena: [f32; 2],
}

impl ViewportMapping {
    pub fn new(viewport: Rect, arena: [f32; 2]) -> Self {
        Self {
            view_size: [viewport.width, viewport.height],
            arena,
        }
    }

    /// Converts a viewport-local position into arena coordinates
    pub fn local_to_arena(&self, local: [f32; 2]) -> [f32; 2] {
        [
            local[0] * self.scale(0),
            local[1] * self.scale(1),
        ]
    }

    /// Converts arena coordinates into a viewport-local position
    pub fn arena_to_local(&self, arena_pos: [f32; 2]) -> [f32; 2] {
        [
            arena_pos[0] / self.scale(0),
            arena_pos[1] / self.scale(1),
        ]
    }

    fn scale(&self, axis: usize) -> f32 {
        if self.view_size[axis] > 0.0 {
            self.arena[axis] / self.view_size[axis]
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::MovingBoxConfig;

    #[test]
    fn test_box_lines_cover_square() {
        let sim = MovingBoxSimulation::new(MovingBoxConfig::default(), [800.0, 600.0]);
        let lines = generate_box(&sim);

        assert_eq!(lines.len(), 3);

        let fill = &lines[0];
        assert_eq!(fill.from, [375.0, 300.0]);
        assert_eq!(fill.to, [425.0, 300.0]);
        assert_eq!(fill.thickness, 50.0);
        assert_eq!(fill.color, BOX_COLOR);

        for cross in &lines[1..] {
            assert_eq!(cross.thickness, CROSS_THICKNESS);
            assert_eq!(cross.color, CROSS_COLOR);
        }
        assert_eq!(lines[1].from, [425.0, 275.0]);
        assert_eq!(lines[1].to, [375.0, 325.0]);
        assert_eq!(lines[2].from, [375.0, 275.0]);
        assert_eq!(lines[2].to, [425.0, 325.0]);
    }

    #[test]
    fn test_identity_mapping() {
        let mapping = ViewportMapping::new(Rect::new(0.0, 0.0, 800.0, 600.0), [800.0, 600.0]);
        assert_eq!(mapping.local_to_arena([123.0, 45.0]), [123.0, 45.0]);
    }

    #[test]
    fn test_scaled_mapping() {
        // Viewport shown at half size
        let mapping = ViewportMapping::new(Rect::new(10.0, 10.0, 400.0, 300.0), [800.0, 600.0]);
        assert_eq!(mapping.local_to_arena([200.0, 150.0]), [400.0, 300.0]);
        assert_eq!(mapping.arena_to_local([400.0, 300.0]), [200.0, 150.0]);
    }

    #[test]
    fn test_roundtrip_mapping() {
        let mapping = ViewportMapping::new(Rect::new(0.0, 0.0, 640.0, 480.0), [800.0, 600.0]);
        let local = [317.0, 211.0];
        let back = mapping.arena_to_local(mapping.local_to_arena(local));
        assert!((back[0] - local[0]).abs() < 0.001);
        assert!((back[1] - local[1]).abs() < 0.001);
    }

    #[test]
    fn test_zero_sized_viewport_does_not_divide_by_zero() {
        let mapping = ViewportMapping::new(Rect::new(0.0, 0.0, 0.0, 0.0), [800.0, 600.0]);
        assert_eq!(mapping.local_to_arena([5.0, 5.0]), [5.0, 5.0]);
    }
}
