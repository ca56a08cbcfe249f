//! Raw input state

use std::collections::HashSet;

use super::events::KeyCode;

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
}

/// Mouse input state
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Window coordinates (physical pixels)
    pub window_pos: Option<[f32; 2]>,
    /// DPI-scaled logical coordinates (screen space)
    pub screen_pos: Option<[f32; 2]>,
    pub buttons: MouseButtons,
    /// Scroll delta this frame, in pixels (positive y = away from the user)
    pub scroll_delta: [f32; 2],
}

/// State of all mouse buttons
#[derive(Debug, Clone, Default)]
pub struct MouseButtons {
    pub left: ButtonState,
    pub right: ButtonState,
    pub middle: ButtonState,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
    /// Pressed and released within one frame; both edges are reported
    Tapped,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased | Self::Tapped => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Tapped)
    }

    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased | Self::Tapped)
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub modifiers: Modifiers,
    /// Keys currently held down
    pub pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        self.mouse.buttons.left = self.mouse.buttons.left.advance();
        self.mouse.buttons.right = self.mouse.buttons.right.advance();
        self.mouse.buttons.middle = self.mouse.buttons.middle.advance();

        // Clear per-frame state
        self.mouse.scroll_delta = [0.0, 0.0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_settle() {
        assert_eq!(ButtonState::JustPressed.advance(), ButtonState::Pressed);
        assert_eq!(ButtonState::JustReleased.advance(), ButtonState::Released);
        assert_eq!(ButtonState::Pressed.advance(), ButtonState::Pressed);
        assert!(ButtonState::JustPressed.is_down());
        assert!(ButtonState::Pressed.is_down());
        assert!(!ButtonState::JustReleased.is_down());
    }

    #[test]
    fn test_tap_reports_both_edges() {
        assert!(ButtonState::Tapped.is_just_pressed());
        assert!(ButtonState::Tapped.is_just_released());
        assert!(!ButtonState::Tapped.is_down());
        assert_eq!(ButtonState::Tapped.advance(), ButtonState::Released);
    }

    #[test]
    fn test_advance_frame_clears_scroll_keeps_keys() {
        let mut state = InputState::new();
        state.mouse.scroll_delta = [0.0, 20.0];
        state.mouse.buttons.left = ButtonState::JustPressed;
        state.keyboard.pressed.insert(KeyCode::Up);

        state.advance_frame();

        assert_eq!(state.mouse.scroll_delta, [0.0, 0.0]);
        assert_eq!(state.mouse.buttons.left, ButtonState::Pressed);
        assert!(state.keyboard.is_down(KeyCode::Up));
    }
}
