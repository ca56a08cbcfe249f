//! Game application module
//!
//! Handles windowing, rendering, and user input.

pub mod config;
pub mod debug_ui;
pub mod geometry;
pub mod input;
pub mod line_renderer;
mod renderer;
mod runner;
pub mod shader_system;
mod window;

pub use config::{AppConfig, ConfigValidationError, LoggingConfig, MovingBoxConfig, WindowConfig};
pub use runner::App;
pub use window::{present_mode, window_attributes_from_config};
