//! Dolly navigation against the campus collision proxy.
//!
//! Turns the activate signal and head orientation into a wall- and
//! floor-constrained rig transform once per presented frame.

/// Ray queries and the world-space triangle proxy they run against.
pub mod spatial_query;

/// Per-frame forward step, side push-back and floor follow.
pub mod dolly;

/// Dolly and viewer camera entities and the systems that drive them.
pub mod rig;
