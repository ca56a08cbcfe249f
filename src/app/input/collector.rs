//! Raw input collection from winit events

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::KeyCode;
use super::state::{ButtonState, InputState, Modifiers};

/// Pixels per scroll line when a wheel reports line deltas
pub const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Collects raw input from winit events and maintains InputState
pub struct InputCollector {
    state: InputState,
    scale_factor: f32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    ///
    /// `ui_consumed` is egui's verdict on the same event.
    pub fn handle_window_event(&mut self, event: &WindowEvent, ui_consumed: bool) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved([position.x as f32, position.y as f32]);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    winit::event::MouseButton::Left => self.set_button(Button::Left, pressed),
                    winit::event::MouseButton::Right => self.set_button(Button::Right, pressed),
                    winit::event::MouseButton::Middle => self.set_button(Button::Middle, pressed),
                    _ => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let pixel_delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        [*x * PIXELS_PER_SCROLL_LINE, *y * PIXELS_PER_SCROLL_LINE]
                    }
                    MouseScrollDelta::PixelDelta(pos) => [pos.x as f32, pos.y as f32],
                };
                self.add_scroll(pixel_delta);
            }

            WindowEvent::ModifiersChanged(modifiers_state) => {
                self.state.keyboard.modifiers = Modifiers {
                    shift: modifiers_state.state().shift_key(),
                    ctrl: modifiers_state.state().control_key(),
                    alt: modifiers_state.state().alt_key(),
                    meta: modifiers_state.state().super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key_input(KeyCode::from(code), event.state.is_pressed(), ui_consumed);
                }
            }

            WindowEvent::Focused(false) => {
                self.release_all();
            }

            _ => {}
        }
    }

    /// Records a pointer move in physical window pixels
    pub fn cursor_moved(&mut self, window_pos: [f32; 2]) {
        let screen_pos = [
            window_pos[0] / self.scale_factor,
            window_pos[1] / self.scale_factor,
        ];
        self.state.mouse.window_pos = Some(window_pos);
        self.state.mouse.screen_pos = Some(screen_pos);
    }

    pub fn cursor_left(&mut self) {
        self.state.mouse.window_pos = None;
        self.state.mouse.screen_pos = None;
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        let slot = match button {
            Button::Left => &mut self.state.mouse.buttons.left,
            Button::Right => &mut self.state.mouse.buttons.right,
            Button::Middle => &mut self.state.mouse.buttons.middle,
        };
        *slot = match (pressed, *slot) {
            (true, _) => ButtonState::JustPressed,
            // The press has not been seen by a frame yet
            (false, ButtonState::JustPressed | ButtonState::Tapped) => ButtonState::Tapped,
            (false, _) => ButtonState::JustReleased,
        };
    }

    /// Adds a scroll delta in pixels; several wheel events in one frame sum up
    pub fn add_scroll(&mut self, pixel_delta: [f32; 2]) {
        self.state.mouse.scroll_delta[0] += pixel_delta[0];
        self.state.mouse.scroll_delta[1] += pixel_delta[1];
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Other {
            return;
        }
        if pressed {
            self.state.keyboard.pressed.insert(key);
        } else {
            self.state.keyboard.pressed.remove(&key);
        }
    }

    /// Key presses taken by a focused egui widget are dropped; releases always apply
    pub fn key_input(&mut self, key: KeyCode, pressed: bool, ui_consumed: bool) {
        if pressed && ui_consumed {
            return;
        }
        self.set_key(key, pressed);
    }

    /// Drops held keys and buttons, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.state.keyboard.pressed.clear();
        for button in [Button::Left, Button::Right, Button::Middle] {
            let down = match button {
                Button::Left => self.state.mouse.buttons.left.is_down(),
                Button::Right => self.state.mouse.buttons.right.is_down(),
                Button::Middle => self.state.mouse.buttons.middle.is_down(),
            };
            if down {
                self.set_button(button, false);
            }
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Clone current state for processing
    ///
    /// Cloned rather than taken so continuous state like mouse position survives.
    pub fn clone_state(&self) -> InputState {
        self.state.clone()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse button slot in the collector
///
/// Kept separate from the event-level `MouseButton` so winit's extra buttons
/// never reach the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_scaled_to_logical() {
        let mut collector = InputCollector::new();
        collector.set_scale_factor(2.0);
        collector.cursor_moved([200.0, 100.0]);

        let mouse = &collector.state().mouse;
        assert_eq!(mouse.window_pos, Some([200.0, 100.0]));
        assert_eq!(mouse.screen_pos, Some([100.0, 50.0]));

        collector.cursor_left();
        assert_eq!(collector.state().mouse.screen_pos, None);
    }

    #[test]
    fn test_scroll_accumulates_until_frame_advance() {
        let mut collector = InputCollector::new();
        collector.add_scroll([0.0, 20.0]);
        collector.add_scroll([0.0, 20.0]);
        assert_eq!(collector.state().mouse.scroll_delta, [0.0, 40.0]);

        collector.advance_frame();
        assert_eq!(collector.state().mouse.scroll_delta, [0.0, 0.0]);
    }

    #[test]
    fn test_keys_tracked_and_other_ignored() {
        let mut collector = InputCollector::new();
        collector.set_key(KeyCode::Left, true);
        collector.set_key(KeyCode::Other, true);
        assert!(collector.state().keyboard.is_down(KeyCode::Left));
        assert_eq!(collector.state().keyboard.pressed.len(), 1);

        collector.set_key(KeyCode::Left, false);
        assert!(collector.state().keyboard.pressed.is_empty());
    }

    #[test]
    fn test_press_and_release_in_one_frame_is_a_tap() {
        let mut collector = InputCollector::new();
        collector.set_button(Button::Left, true);
        collector.set_button(Button::Left, false);

        let left = collector.state().mouse.buttons.left;
        assert_eq!(left, ButtonState::Tapped);
        assert!(left.is_just_pressed());

        collector.advance_frame();
        assert_eq!(collector.state().mouse.buttons.left, ButtonState::Released);

        // A release in a later frame is an ordinary edge
        collector.set_button(Button::Left, true);
        collector.advance_frame();
        collector.set_button(Button::Left, false);
        assert_eq!(
            collector.state().mouse.buttons.left,
            ButtonState::JustReleased
        );
    }

    #[test]
    fn test_ui_consumed_key_press_is_ignored() {
        let mut collector = InputCollector::new();
        collector.key_input(KeyCode::Right, true, true);
        assert!(!collector.state().keyboard.is_down(KeyCode::Right));

        collector.key_input(KeyCode::Right, true, false);
        collector.key_input(KeyCode::Right, false, true);
        assert!(!collector.state().keyboard.is_down(KeyCode::Right));
    }

    #[test]
    fn test_release_all_on_focus_loss() {
        let mut collector = InputCollector::new();
        collector.set_key(KeyCode::Up, true);
        collector.set_button(Button::Left, true);

        collector.release_all();

        let state = collector.state();
        assert!(state.keyboard.pressed.is_empty());
        assert_eq!(state.mouse.buttons.left, ButtonState::JustReleased);
        assert_eq!(state.mouse.buttons.right, ButtonState::Released);
    }
}
