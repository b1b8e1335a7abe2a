//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and the session context shared by the per-frame systems.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with loading, frame controller and bridge systems
/// for both native and WASM targets.
pub mod app_setup;

/// Application state machine and loading progress transitions.
///
/// Manages states from initial loading through scene classification to runtime execution.
pub mod app_state;

/// Session-scoped context: board state, presentation edge tracking, warning latches.
pub mod session;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
