//! Runtime systems around the frame controller.
//!
//! Presentation gating, audio cues and frame rate reporting.

/// XR presentation flag, its run condition and the enter/exit reset.
pub mod presentation;

/// Ambient loop and footstep cue.
///
/// The loop starts on the first user gesture; footsteps never overlap.
pub mod audio;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native overlay.
pub mod fps_tracking;
