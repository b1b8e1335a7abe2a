//! Proximity infoboards.
//!
//! The tracker picks at most one anchor near the rig each presented frame and
//! emits a [`tracker::BoardCommand`]; the panel module owns the single
//! render-to-texture board that command is applied to.

/// Anchor selection state machine and its per-frame system.
pub mod tracker;

/// Render-to-texture board quad, its placement and command application.
pub mod panel;
