//! Scene dressing around the campus model.
//!
//! Lights, the replacement surface materials applied during classification
//! and the image based lighting attached to the viewer camera.

/// Ambient fill plus a toggleable directional light.
pub mod lighting;

/// Colour helpers and the replacement material for each surface class.
pub mod materials;

/// Environment map light once both cubemaps are available.
pub mod environment;
