//! BFS-based spatial analysis over the maze snapshot
//!
//! Directional nearest-match search, multi-source adversary flood fill,
//! and entrapment/safe-tile counting. All searches share a fixed neighbor
//! order and a monotonic visited-depth buffer (-1 = unvisited), so every
//! search terminates on the bounded grid.

use std::collections::VecDeque;

use crate::core::types::TilePos;
use crate::spatial::index::GridIndex;
use crate::state::GameState;

/// Depth value for tiles no search has reached
const UNVISITED: i32 = -1;

/// Fixed expansion order: +row, -row, +col, -col
///
/// Affects nothing about correctness, only reproducible traversal timing.
const NEIGHBOR_ORDER: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Read-only spatial queries against one game-state snapshot
pub struct SpatialAnalyzer<'a> {
    state: &'a GameState,
    index: GridIndex,
    /// Expansion guard for `safe_tile_count`
    max_distance: u32,
}

impl<'a> SpatialAnalyzer<'a> {
    pub fn new(state: &'a GameState, max_distance: u32) -> Self {
        Self {
            state,
            index: state.grid_index(),
            max_distance,
        }
    }

    /// BFS depth of the nearest tile satisfying `predicate`
    ///
    /// Searches over non-wall tiles from `origin`. A wall origin returns
    /// `not_found` without visiting anything. `exclude_origin` is
    /// pre-seeded to depth 0 so a probe started one step away from the
    /// agent cannot path back through the agent's own tile. Neighbors are
    /// only admitted while their depth stays below `max_distance`, so
    /// every returned distance is in `0..max_distance` or `not_found`.
    pub fn search_nearest(
        &self,
        origin: TilePos,
        predicate: impl Fn(TilePos) -> bool,
        exclude_origin: Option<TilePos>,
        not_found: u32,
        max_distance: u32,
    ) -> u32 {
        if self.state.wall_at(origin) {
            return not_found;
        }

        let mut visited = vec![UNVISITED; self.index.len()];
        visited[self.index.index(origin)] = 0;
        if let Some(excluded) = exclude_origin {
            if self.index.contains(excluded) {
                visited[self.index.index(excluded)] = 0;
            }
        }

        let mut queue = VecDeque::new();
        queue.push_back(origin);

        while let Some(tile) = queue.pop_front() {
            let depth = visited[self.index.index(tile)];
            if predicate(tile) {
                return depth as u32;
            }
            for (dr, dc) in NEIGHBOR_ORDER {
                let next = TilePos::new(tile.row + dr, tile.col + dc);
                if self.state.wall_at(next) {
                    continue;
                }
                let slot = self.index.index(next);
                if visited[slot] != UNVISITED {
                    continue;
                }
                visited[slot] = depth + 1;
                if ((depth + 1) as u32) < max_distance {
                    queue.push_back(next);
                }
            }
        }

        not_found
    }

    /// Minimum adversary moves to every tile, from all active adversaries at once
    ///
    /// Seeded simultaneously from each non-spawning adversary at depth 0.
    /// Tiles no active adversary can reach stay at -1, meaning never
    /// threatened. This field models which side reaches each tile first.
    pub fn adversary_flood_fill(&self) -> Vec<i32> {
        let mut visited = vec![UNVISITED; self.index.len()];
        let mut queue = VecDeque::new();

        for adversary in &self.state.adversaries {
            if adversary.spawning || !self.index.contains(adversary.pos) {
                continue;
            }
            let slot = self.index.index(adversary.pos);
            if visited[slot] == UNVISITED {
                visited[slot] = 0;
                queue.push_back(adversary.pos);
            }
        }

        while let Some(tile) = queue.pop_front() {
            let depth = visited[self.index.index(tile)];
            for (dr, dc) in NEIGHBOR_ORDER {
                let next = TilePos::new(tile.row + dr, tile.col + dc);
                if self.state.wall_at(next) {
                    continue;
                }
                let slot = self.index.index(next);
                if visited[slot] == UNVISITED {
                    visited[slot] = depth + 1;
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    /// Tiles the agent provably reaches before any adversary could
    ///
    /// Returns 0 when `origin` is a wall or already holds a non-spawning
    /// adversary. Otherwise BFS from `origin` (same origin-exclusion
    /// seeding as `search_nearest`), expanding from a tile only while the
    /// agent strictly beats the adversary flood depth there; ties favor
    /// the adversary. Every visited tile counts toward the result, and
    /// expansion stops past the internal max-distance guard to bound cost.
    pub fn safe_tile_count(&self, origin: TilePos, exclude_origin: Option<TilePos>) -> u32 {
        if self.state.wall_at(origin) {
            return 0;
        }
        if self
            .state
            .adversaries
            .iter()
            .any(|a| !a.spawning && a.pos == origin)
        {
            return 0;
        }

        let flood = self.adversary_flood_fill();

        let mut visited = vec![UNVISITED; self.index.len()];
        visited[self.index.index(origin)] = 0;
        if let Some(excluded) = exclude_origin {
            if self.index.contains(excluded) {
                visited[self.index.index(excluded)] = 0;
            }
        }

        let mut queue = VecDeque::new();
        queue.push_back(origin);
        let mut safe_tiles = 0u32;

        while let Some(tile) = queue.pop_front() {
            let slot = self.index.index(tile);
            let depth = visited[slot];
            safe_tiles += 1;

            if depth as u32 > self.max_distance {
                continue;
            }
            // -1 in the flood field means no adversary ever gets here
            if flood[slot] != UNVISITED && depth >= flood[slot] {
                continue;
            }

            for (dr, dc) in NEIGHBOR_ORDER {
                let next = TilePos::new(tile.row + dr, tile.col + dc);
                if self.state.wall_at(next) {
                    continue;
                }
                let next_slot = self.index.index(next);
                if visited[next_slot] == UNVISITED {
                    visited[next_slot] = depth + 1;
                    queue.push_back(next);
                }
            }
        }

        safe_tiles
    }
}
