//! Semantic input events

use super::state::Modifiers;

/// Semantic input events generated from raw state changes
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse click at screen position
    Click {
        button: MouseButton,
        /// Screen position in logical pixels
        pos: [f32; 2],
        /// Which viewport was clicked (if any)
        viewport: Option<ViewportId>,
    },

    /// Mouse drag operation
    Drag {
        button: MouseButton,
        /// Position when the button was pressed
        start: [f32; 2],
        current: [f32; 2],
        /// Delta since last frame
        delta: [f32; 2],
    },

    /// Pointer moved (or entered the window)
    Hover {
        pos: [f32; 2],
        viewport: Option<ViewportId>,
    },

    /// Pointer left the window
    HoverExit,

    /// Mouse wheel or touchpad scroll
    Scroll {
        /// Scroll delta in pixels
        delta: [f32; 2],
        pos: [f32; 2],
        viewport: Option<ViewportId>,
    },

    KeyPress { key: KeyCode, modifiers: Modifiers },

    KeyRelease { key: KeyCode },
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Viewport identifier for hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportId(pub u32);

/// Keys the game distinguishes; everything else maps to `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    Other,
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,
            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::Space => Self::Space,
            WK::Enter | WK::NumpadEnter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Tab => Self::Tab,
            _ => Self::Other,
        }
    }
}
