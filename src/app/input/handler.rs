//! Input handler trait for subsystems

use super::events::InputEvent;
use super::state::InputState;

/// Trait for subsystems that handle input
///
/// Handlers are called in priority order (highest first).
/// When a handler consumes an event (returns true), propagation stops.
pub trait InputHandler {
    /// Name of this handler, used for lookup and debugging
    fn name(&self) -> &str;

    /// Priority for input routing (higher = earlier)
    ///
    /// - 200+: debug overlays
    /// - 100-199: UI panels
    /// - 50-99: game handlers
    /// - 0-49: global fallbacks
    fn priority(&self) -> u32;

    /// Handle an input event
    ///
    /// Returns true if the event was consumed.
    fn handle_event(&mut self, event: &InputEvent, state: &InputState) -> bool;

    /// Called every frame with the current state, after all events
    fn update(&mut self, _state: &InputState) {}

    /// Called at the start of each frame, before events are generated
    fn begin_frame(&mut self) {}

    /// Downcast to concrete type for accessing handler-specific methods
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
