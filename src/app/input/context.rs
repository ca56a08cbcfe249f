//! Input event routing and distribution

use std::collections::HashMap;

use super::events::{InputEvent, KeyCode, MouseButton, ViewportId};
use super::handler::InputHandler;
use super::state::{ButtonState, InputState};

/// Rectangular area for viewport hit testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle (edges included)
    pub fn contains(&self, pos: [f32; 2]) -> bool {
        pos[0] >= self.x
            && pos[0] <= self.x + self.width
            && pos[1] >= self.y
            && pos[1] <= self.y + self.height
    }

    /// Position relative to the top-left corner
    pub fn to_local(&self, pos: [f32; 2]) -> [f32; 2] {
        [pos[0] - self.x, pos[1] - self.y]
    }
}

/// Stacking layer of a viewport; higher layers win hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Base,
    Overlay,
}

#[derive(Debug, Clone)]
struct ViewportInfo {
    rect: Rect,
    name: String,
    layer: Layer,
}

#[derive(Debug, Clone, Default)]
struct DragState {
    active: bool,
    start_pos: [f32; 2],
}

/// Central input routing and distribution system
pub struct InputContext {
    /// Registered input handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn InputHandler>>,
    state: InputState,
    prev_state: InputState,
    viewports: HashMap<ViewportId, ViewportInfo>,
    drag_states: HashMap<MouseButton, DragState>,
    /// Debug: events generated last frame
    last_events: Vec<String>,
}

impl InputContext {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            state: InputState::new(),
            prev_state: InputState::new(),
            viewports: HashMap::new(),
            drag_states: HashMap::new(),
            last_events: Vec::new(),
        }
    }

    /// Register an input handler
    ///
    /// Handlers are kept sorted by priority (highest first).
    pub fn register_handler(&mut self, handler: Box<dyn InputHandler>) {
        self.handlers.push(handler);
        self.handlers
            .sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Update input state from collector
    pub fn update_state(&mut self, state: InputState) {
        self.prev_state = std::mem::replace(&mut self.state, state);
    }

    /// Register a base viewport for hit testing
    ///
    /// Called during rendering once layout is known. Registrations persist
    /// between frames so input processed before the next draw still resolves.
    pub fn register_viewport(&mut self, id: ViewportId, rect: Rect, name: impl Into<String>) {
        self.insert_viewport(id, rect, name.into(), Layer::Base);
    }

    /// Register a viewport that sits above base viewports (floating windows)
    pub fn register_overlay(&mut self, id: ViewportId, rect: Rect, name: impl Into<String>) {
        self.insert_viewport(id, rect, name.into(), Layer::Overlay);
    }

    fn insert_viewport(&mut self, id: ViewportId, rect: Rect, name: String, layer: Layer) {
        self.viewports
            .insert(id, ViewportInfo { rect, name, layer });
    }

    pub fn unregister_viewport(&mut self, id: ViewportId) {
        self.viewports.remove(&id);
    }

    /// Process input and dispatch events to handlers
    ///
    /// Call once per frame after updating state.
    pub fn process(&mut self) {
        self.last_events.clear();

        for handler in &mut self.handlers {
            handler.begin_frame();
        }

        let events = self.generate_events();

        for event in &events {
            self.last_events.push(format!("{:?}", event));
        }

        for event in events {
            for handler in &mut self.handlers {
                if handler.handle_event(&event, &self.state) {
                    break;
                }
            }
        }

        for handler in &mut self.handlers {
            handler.update(&self.state);
        }
    }

    /// Generate semantic events from state changes
    fn generate_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        self.generate_key_events(&mut events);

        let Some(pos) = self.state.mouse.screen_pos else {
            if self.prev_state.mouse.screen_pos.is_some() {
                events.push(InputEvent::HoverExit);
            }
            for drag_state in self.drag_states.values_mut() {
                drag_state.active = false;
            }
            return events;
        };

        let viewport = self.find_viewport_at(pos);
        let buttons = &self.state.mouse.buttons;
        let button_states = [
            (MouseButton::Left, buttons.left),
            (MouseButton::Right, buttons.right),
            (MouseButton::Middle, buttons.middle),
        ];

        for (button, state) in button_states {
            if state.is_just_pressed() {
                events.push(InputEvent::Click {
                    button,
                    pos,
                    viewport,
                });
                self.drag_states.insert(
                    button,
                    DragState {
                        active: true,
                        start_pos: pos,
                    },
                );
            }
        }

        for (button, state) in button_states {
            let Some(drag_state) = self.drag_states.get_mut(&button) else {
                continue;
            };
            if !drag_state.active {
                continue;
            }
            if !state.is_down() {
                drag_state.active = false;
                continue;
            }
            if let Some(prev_pos) = self.prev_state.mouse.screen_pos
                && pos != prev_pos
            {
                events.push(InputEvent::Drag {
                    button,
                    start: drag_state.start_pos,
                    current: pos,
                    delta: [pos[0] - prev_pos[0], pos[1] - prev_pos[1]],
                });
            }
        }

        // First sighting after entering the window counts as a hover
        if self.prev_state.mouse.screen_pos != Some(pos) {
            events.push(InputEvent::Hover { pos, viewport });
        }

        let scroll_delta = self.state.mouse.scroll_delta;
        if scroll_delta != [0.0, 0.0] {
            events.push(InputEvent::Scroll {
                delta: scroll_delta,
                pos,
                viewport,
            });
        }

        events
    }

    fn generate_key_events(&self, events: &mut Vec<InputEvent>) {
        let now = &self.state.keyboard.pressed;
        let before = &self.prev_state.keyboard.pressed;

        // Sorted so event order does not depend on hash iteration
        let mut pressed: Vec<KeyCode> = now.difference(before).copied().collect();
        let mut released: Vec<KeyCode> = before.difference(now).copied().collect();
        pressed.sort();
        released.sort();

        for key in released {
            events.push(InputEvent::KeyRelease { key });
        }
        for key in pressed {
            events.push(InputEvent::KeyPress {
                key,
                modifiers: self.state.keyboard.modifiers,
            });
        }
    }

    /// Find the topmost viewport containing the given position
    fn find_viewport_at(&self, pos: [f32; 2]) -> Option<ViewportId> {
        self.viewports
            .iter()
            .filter(|(_, info)| info.rect.contains(pos))
            .max_by_key(|(_, info)| info.layer)
            .map(|(id, _)| *id)
    }

    pub fn viewport_rect(&self, id: ViewportId) -> Option<Rect> {
        self.viewports.get(&id).map(|info| info.rect)
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    /// Get a mutable reference to a handler by name
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn InputHandler + '_)> {
        if let Some(boxed) = self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Typed access to a handler by name
    pub fn get_handler_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_handler_mut(name)
            .and_then(|h| h.as_any_mut().downcast_mut::<T>())
    }

    /// Viewports as (id, rect, name), sorted by id
    pub fn debug_viewports(&self) -> Vec<(ViewportId, Rect, String)> {
        let mut viewports: Vec<_> = self
            .viewports
            .iter()
            .map(|(id, info)| (*id, info.rect, info.name.clone()))
            .collect();
        viewports.sort_by_key(|(id, ..)| id.0);
        viewports
    }

    /// Handlers as (name, priority), in dispatch order
    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }

    /// Buttons held in the current state, for debug display
    pub fn debug_buttons(&self) -> [(MouseButton, ButtonState); 3] {
        let buttons = &self.state.mouse.buttons;
        [
            (MouseButton::Left, buttons.left),
            (MouseButton::Right, buttons.right),
            (MouseButton::Middle, buttons.middle),
        ]
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}
