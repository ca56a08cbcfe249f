//! Moving Box
//!
//! A white box on a black field: arrow keys move it, clicks and the scroll
//! wheel resize it. Built with winit, wgpu and egui.

/// Game application - windowing, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup and CI health checks
pub mod health;

/// Log subscriber setup
pub mod logging;

/// Game simulation - world state and the box
pub mod sim;
