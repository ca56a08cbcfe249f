//! Input handler for the game viewport

use super::collector::PIXELS_PER_SCROLL_LINE;
use super::context::Rect;
use super::events::{InputEvent, KeyCode, MouseButton, ViewportId};
use super::handler::InputHandler;
use super::state::InputState;
use crate::sim::moving_box::{Direction, Movement, Resize};

/// Game-level action produced from viewport input
///
/// Positions are local to the viewport's top-left corner, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    ViewportClick {
        viewport: ViewportId,
        local_pos: [f32; 2],
        button: MouseButton,
    },
    ViewportScroll {
        viewport: ViewportId,
        local_pos: [f32; 2],
        /// Vertical scroll in lines, positive away from the user
        lines: f32,
    },
}

impl GameAction {
    /// The box resize this action asks for, with the local point it targets
    ///
    /// Left click grows and right click shrinks. A scroll must reach a whole
    /// line in either direction to count.
    pub fn resize(&self) -> Option<([f32; 2], Resize)> {
        match *self {
            GameAction::ViewportClick {
                local_pos, button, ..
            } => match button {
                MouseButton::Left => Some((local_pos, Resize::Grow)),
                MouseButton::Right => Some((local_pos, Resize::Shrink)),
                MouseButton::Middle => None,
            },
            GameAction::ViewportScroll {
                local_pos, lines, ..
            } => {
                if lines >= 1.0 {
                    Some((local_pos, Resize::Grow))
                } else if lines <= -1.0 {
                    Some((local_pos, Resize::Shrink))
                } else {
                    None
                }
            }
        }
    }
}

/// Turns clicks, scrolls, pointer motion and arrow keys into game input
pub struct GameInputHandler {
    viewport: ViewportId,
    viewport_rect: Option<Rect>,
    actions: Vec<GameAction>,
    /// Pointer in screen space while it is over the game viewport
    cursor: Option<[f32; 2]>,
    movement: Movement,
}

impl GameInputHandler {
    pub const NAME: &'static str = "game";

    pub fn new(viewport: ViewportId) -> Self {
        Self {
            viewport,
            viewport_rect: None,
            actions: Vec::new(),
            cursor: None,
            movement: Movement::default(),
        }
    }

    /// Updates the viewport rectangle used for local coordinates
    pub fn set_viewport_rect(&mut self, rect: Option<Rect>) {
        self.viewport_rect = rect;
    }

    /// Drains the actions collected since the last call
    pub fn take_actions(&mut self) -> Vec<GameAction> {
        std::mem::take(&mut self.actions)
    }

    /// Pointer position local to the viewport, if it is over it
    pub fn cursor_local(&self) -> Option<[f32; 2]> {
        let rect = self.viewport_rect?;
        self.cursor.map(|pos| rect.to_local(pos))
    }

    /// Arrow directions currently held
    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn viewport(&self) -> ViewportId {
        self.viewport
    }

    fn local(&self, pos: [f32; 2]) -> [f32; 2] {
        match self.viewport_rect {
            Some(rect) => rect.to_local(pos),
            None => pos,
        }
    }

    fn direction(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl InputHandler for GameInputHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        50
    }

    fn handle_event(&mut self, event: &InputEvent, _state: &InputState) -> bool {
        match *event {
            InputEvent::Click {
                button,
                pos,
                viewport: Some(viewport),
            } if viewport == self.viewport => {
                self.actions.push(GameAction::ViewportClick {
                    viewport,
                    local_pos: self.local(pos),
                    button,
                });
                true
            }

            InputEvent::Scroll {
                delta,
                pos,
                viewport: Some(viewport),
            } if viewport == self.viewport => {
                self.actions.push(GameAction::ViewportScroll {
                    viewport,
                    local_pos: self.local(pos),
                    lines: delta[1] / PIXELS_PER_SCROLL_LINE,
                });
                true
            }

            // Hover is shared state; never consumed
            InputEvent::Hover { pos, viewport } => {
                self.cursor = (viewport == Some(self.viewport)).then_some(pos);
                false
            }

            InputEvent::HoverExit => {
                self.cursor = None;
                false
            }

            InputEvent::KeyPress { key, .. } => match Self::direction(key) {
                Some(direction) => {
                    self.movement[direction] = true;
                    true
                }
                None => false,
            },

            InputEvent::KeyRelease { key } => match Self::direction(key) {
                Some(direction) => {
                    self.movement[direction] = false;
                    true
                }
                None => false,
            },

            _ => false,
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: ViewportId = ViewportId(0);
    const OTHER: ViewportId = ViewportId(1);

    fn handler() -> GameInputHandler {
        let mut handler = GameInputHandler::new(GAME);
        handler.set_viewport_rect(Some(Rect::new(100.0, 50.0, 800.0, 600.0)));
        handler
    }

    fn send(handler: &mut GameInputHandler, event: InputEvent) -> bool {
        handler.handle_event(&event, &InputState::new())
    }

    #[test]
    fn test_click_in_viewport_becomes_local_action() {
        let mut handler = handler();
        let consumed = send(
            &mut handler,
            InputEvent::Click {
                button: MouseButton::Left,
                pos: [150.0, 80.0],
                viewport: Some(GAME),
            },
        );

        assert!(consumed);
        assert_eq!(
            handler.take_actions(),
            [GameAction::ViewportClick {
                viewport: GAME,
                local_pos: [50.0, 30.0],
                button: MouseButton::Left,
            }]
        );
        assert!(handler.take_actions().is_empty());
    }

    #[test]
    fn test_click_elsewhere_is_ignored() {
        let mut handler = handler();
        for viewport in [Some(OTHER), None] {
            let consumed = send(
                &mut handler,
                InputEvent::Click {
                    button: MouseButton::Left,
                    pos: [150.0, 80.0],
                    viewport,
                },
            );
            assert!(!consumed);
        }
        assert!(handler.take_actions().is_empty());
    }

    #[test]
    fn test_scroll_converted_to_lines() {
        let mut handler = handler();
        send(
            &mut handler,
            InputEvent::Scroll {
                delta: [0.0, -40.0],
                pos: [100.0, 50.0],
                viewport: Some(GAME),
            },
        );
        assert_eq!(
            handler.take_actions(),
            [GameAction::ViewportScroll {
                viewport: GAME,
                local_pos: [0.0, 0.0],
                lines: -2.0,
            }]
        );
    }

    #[test]
    fn test_actions_map_to_resizes() {
        let click = |button| GameAction::ViewportClick {
            viewport: GAME,
            local_pos: [1.0, 2.0],
            button,
        };
        let scroll = |lines| GameAction::ViewportScroll {
            viewport: GAME,
            local_pos: [3.0, 4.0],
            lines,
        };

        assert_eq!(click(MouseButton::Left).resize(), Some(([1.0, 2.0], Resize::Grow)));
        assert_eq!(click(MouseButton::Right).resize(), Some(([1.0, 2.0], Resize::Shrink)));
        assert_eq!(click(MouseButton::Middle).resize(), None);

        assert_eq!(scroll(1.0).resize(), Some(([3.0, 4.0], Resize::Grow)));
        assert_eq!(scroll(-3.0).resize(), Some(([3.0, 4.0], Resize::Shrink)));
        assert_eq!(scroll(0.5).resize(), None);
        assert_eq!(scroll(-0.9).resize(), None);
    }

    #[test]
    fn test_hover_tracks_cursor_inside_viewport_only() {
        let mut handler = handler();
        send(
            &mut handler,
            InputEvent::Hover {
                pos: [110.0, 60.0],
                viewport: Some(GAME),
            },
        );
        assert_eq!(handler.cursor_local(), Some([10.0, 10.0]));

        send(
            &mut handler,
            InputEvent::Hover {
                pos: [110.0, 60.0],
                viewport: Some(OTHER),
            },
        );
        assert_eq!(handler.cursor_local(), None);

        send(
            &mut handler,
            InputEvent::Hover {
                pos: [110.0, 60.0],
                viewport: Some(GAME),
            },
        );
        send(&mut handler, InputEvent::HoverExit);
        assert_eq!(handler.cursor_local(), None);
    }

    #[test]
    fn test_arrow_keys_drive_movement() {
        let mut handler = handler();
        assert!(send(
            &mut handler,
            InputEvent::KeyPress {
                key: KeyCode::Up,
                modifiers: Default::default(),
            },
        ));
        assert!(send(
            &mut handler,
            InputEvent::KeyPress {
                key: KeyCode::Left,
                modifiers: Default::default(),
            },
        ));
        assert!(!send(
            &mut handler,
            InputEvent::KeyPress {
                key: KeyCode::Space,
                modifiers: Default::default(),
            },
        ));

        let movement = handler.movement();
        assert!(movement[Direction::Up] && movement[Direction::Left]);
        assert!(!movement[Direction::Down] && !movement[Direction::Right]);

        send(&mut handler, InputEvent::KeyRelease { key: KeyCode::Up });
        assert!(!handler.movement()[Direction::Up]);
        assert!(handler.movement()[Direction::Left]);
    }
}
