//! Short-horizon fallback target memory
//!
//! When no pellet is detectable in any probe direction, the agent heads
//! for the grid corner diagonally opposite its current quadrant. The
//! chosen corner is remembered for a fixed number of ticks so the target
//! does not oscillate while the agent crosses the board.

use crate::core::types::TilePos;
use crate::spatial::index::GridIndex;

/// Corner ids: 0 top-left, 1 bottom-left, 2 bottom-right, 3 top-right
fn quadrant_corner(index: GridIndex, pos: TilePos) -> u8 {
    if pos.row < index.rows() / 2 {
        if pos.col < index.cols() / 2 {
            0
        } else {
            3
        }
    } else if pos.col < index.cols() / 2 {
        1
    } else {
        2
    }
}

fn opposite_corner(corner: u8) -> u8 {
    (corner + 2) % 4
}

/// Interior tile of a corner, one step in from each border wall
fn corner_tile(index: GridIndex, corner: u8) -> TilePos {
    match corner {
        0 => TilePos::new(1, 1),
        1 => TilePos::new(index.rows() - 2, 1),
        2 => TilePos::new(index.rows() - 2, index.cols() - 2),
        _ => TilePos::new(1, index.cols() - 2),
    }
}

/// Two-state fallback-target machine: Idle (no target) or Tracking
///
/// Invariant: a target is held iff `ttl > 0`. The ttl decays once per
/// tick; on reaching 0 the target is dropped whether or not it was
/// reached. Idle is the initial state.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalMemory {
    target: Option<TilePos>,
    ttl: u32,
}

impl GoalMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once-per-tick decay; clears the target when the horizon expires
    pub fn tick(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            self.target = None;
        }
    }

    pub fn target(&self) -> Option<TilePos> {
        self.target
    }

    pub fn is_tracking(&self) -> bool {
        self.target.is_some()
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// The remembered target, or a fresh opposite-corner target with a
    /// full horizon when Idle
    pub fn acquire(&mut self, index: GridIndex, agent: TilePos, horizon: u32) -> TilePos {
        if let Some(target) = self.target {
            return target;
        }
        let target = corner_tile(index, opposite_corner(quadrant_corner(index, agent)));
        self.target = Some(target);
        self.ttl = horizon;
        target
    }
}
