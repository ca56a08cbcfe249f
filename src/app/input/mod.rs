//! Input handling system
//!
//! Priority-based input routing:
//! - Collects raw input from winit events
//! - Generates semantic input events (clicks, drags, hovers, scrolls, keys)
//! - Routes events to handlers in priority order, with consumption
//! - Hit tests viewports, overlays above base viewports
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState
//!                                          ↓
//!                                    InputContext
//!                                    (generates events)
//!                                          ↓
//!                                   InputHandlers
//!                                   (by priority)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut input_context = InputContext::new();
//! input_context.register_handler(Box::new(GameInputHandler::new(ViewportId(0))));
//!
//! // In window_event()
//! let ui_consumed = renderer.handle_event(&window, &event);
//! collector.handle_window_event(&event, ui_consumed);
//!
//! // Each frame, before the simulation update
//! input_context.update_state(collector.clone_state());
//! input_context.process();
//! collector.advance_frame();
//! ```

mod collector;
mod context;
mod events;
mod game_handler;
mod handler;
mod state;

pub use collector::{Button, InputCollector, PIXELS_PER_SCROLL_LINE};
pub use context::{InputContext, Layer, Rect};
pub use events::{InputEvent, KeyCode, MouseButton, ViewportId};
pub use game_handler::{GameAction, GameInputHandler};
pub use handler::InputHandler;
pub use state::{ButtonState, InputState, KeyboardState, Modifiers, MouseButtons, MouseState};
