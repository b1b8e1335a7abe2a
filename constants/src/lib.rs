//! Shared tuning constants for the campus walkthrough.
//!
//! Units are metres and seconds unless stated otherwise.

pub mod audio;
pub mod board;
pub mod gaze;
pub mod navigation;
pub mod rig;
pub mod surface;
