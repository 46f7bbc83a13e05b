//! Gridbot - real-time perception layer for a grid-world game agent
//!
//! Converts a synchronized game-state snapshot (walls, pellets,
//! adversaries, agent pose) into a fixed 22-value observation each tick
//! and feeds it to an opaque decision policy on a cooperative loop that
//! never starves the state-synchronization channel.

pub mod agent;
pub mod core;
pub mod observe;
pub mod policy;
pub mod spatial;
pub mod state;
