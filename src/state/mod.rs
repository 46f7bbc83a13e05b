//! Shared game-state snapshot and the channels around it
//!
//! The transport layer owns mutation of this state between decisions; the
//! decision loop takes the scoped lock for the duration of one
//! extract-predict-emit critical section and releases it before yielding.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::types::{Action, AgentPose, TilePos};
use crate::spatial::index::GridIndex;

/// One adversary as reported by the game server
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: TilePos,
    /// Temporarily harmless, with `fright_steps` ticks remaining
    pub frightened: bool,
    /// Still in the spawn area; cannot threaten tiles yet
    pub spawning: bool,
    pub fright_steps: u32,
}

impl Adversary {
    pub fn at(pos: TilePos) -> Self {
        Self {
            pos,
            frightened: false,
            spawning: false,
            fright_steps: 0,
        }
    }
}

/// Snapshot of the game world as last synchronized from the server
///
/// Immutable for the duration of one decision; only the transport layer
/// mutates it between critical sections.
#[derive(Debug, Clone)]
pub struct GameState {
    index: GridIndex,
    walls: Vec<bool>,
    pellets: Vec<bool>,
    /// Static per-level pellet maximum, for the level-progress reading
    pub total_pellets: u32,
    pub agent: AgentPose,
    pub adversaries: Vec<Adversary>,
    /// False once the server connection is gone; terminal for the loop
    pub connected: bool,
    /// Set by the transport when a fresh update lands, cleared by the loop
    pub update_ready: bool,
}

impl GameState {
    /// An all-open grid with no pellets and no adversaries
    pub fn open(rows: i16, cols: i16) -> Self {
        let index = GridIndex::new(rows, cols);
        Self {
            walls: vec![false; index.len()],
            pellets: vec![false; index.len()],
            index,
            total_pellets: 0,
            agent: AgentPose::default(),
            adversaries: Vec::new(),
            connected: true,
            update_ready: false,
        }
    }

    pub fn rows(&self) -> i16 {
        self.index.rows()
    }

    pub fn cols(&self) -> i16 {
        self.index.cols()
    }

    pub fn grid_index(&self) -> GridIndex {
        self.index
    }

    /// Wall membership; out-of-range coordinates are walls
    pub fn wall_at(&self, pos: TilePos) -> bool {
        if !self.index.contains(pos) {
            return true;
        }
        self.walls[self.index.index(pos)]
    }

    pub fn set_wall(&mut self, pos: TilePos, wall: bool) {
        if self.index.contains(pos) {
            let i = self.index.index(pos);
            self.walls[i] = wall;
        }
    }

    pub fn pellet_at(&self, pos: TilePos) -> bool {
        self.index.contains(pos) && self.pellets[self.index.index(pos)]
    }

    pub fn set_pellet(&mut self, pos: TilePos, pellet: bool) {
        if self.index.contains(pos) {
            let i = self.index.index(pos);
            self.pellets[i] = pellet;
        }
    }

    /// Pellets still on the board
    pub fn num_pellets(&self) -> u32 {
        self.pellets.iter().filter(|&&p| p).count() as u32
    }
}

/// Handle shared between the transport layer and the decision loop
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<Mutex<GameState>>,
}

impl SharedState {
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Scoped exclusive access; released when the guard drops
    pub fn lock(&self) -> MutexGuard<'_, GameState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outbound action slot between the decision loop and the transport writer
///
/// Holds at most one pending action; the loop must not produce a new one
/// until the transport has drained the previous.
#[derive(Clone, Default)]
pub struct ActionQueue {
    slot: Arc<Mutex<Option<(u8, Action)>>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a previously queued action has not been sent yet
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Queue one action addressed to `agent_id`
    ///
    /// Returns false (and drops the action) if the previous one is still
    /// pending; callers are expected to have checked `is_pending` first.
    pub fn queue(&self, agent_id: u8, action: Action) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some((agent_id, action));
        true
    }

    /// Transport side: take the pending action for the wire
    pub fn drain(&self) -> Option<(u8, Action)> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Action;

    #[test]
    fn test_out_of_range_is_wall() {
        let state = GameState::open(5, 5);
        assert!(state.wall_at(TilePos::new(-1, 0)));
        assert!(state.wall_at(TilePos::new(0, 5)));
        assert!(!state.wall_at(TilePos::new(2, 2)));
    }

    #[test]
    fn test_pellet_count_tracks_board() {
        let mut state = GameState::open(4, 4);
        assert_eq!(state.num_pellets(), 0);
        state.set_pellet(TilePos::new(1, 1), true);
        state.set_pellet(TilePos::new(2, 3), true);
        assert_eq!(state.num_pellets(), 2);
        state.set_pellet(TilePos::new(1, 1), false);
        assert_eq!(state.num_pellets(), 1);
    }

    #[test]
    fn test_action_queue_holds_one() {
        let queue = ActionQueue::new();
        assert!(!queue.is_pending());
        assert!(queue.queue(1, Action::Up));
        assert!(queue.is_pending());
        assert!(!queue.queue(1, Action::Down));
        assert_eq!(queue.drain(), Some((1, Action::Up)));
        assert!(!queue.is_pending());
        assert_eq!(queue.drain(), None);
    }
}
