//! Viewer input: hand controllers, gaze dwell and head pose.
//!
//! Raw sources differ per platform (XR bridge messages on wasm, mouse and
//! keyboard on native) but all of them end up in one [`snapshot::InputSnapshot`]
//! sampled at the start of each presented frame.

/// Two-slot controller state driven by select and connection events.
pub mod controllers;

/// Gaze dwell navigation and the fallback timer that enables it.
pub mod gaze;

/// Camera pose relative to the dolly, from the XR bridge or desktop mouse look.
pub mod head_pose;

/// Per-frame aggregate of all input the core systems consume.
pub mod snapshot;
