//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (one decision cycle)
pub type Tick = u64;

/// Tile coordinate on the maze grid
///
/// Signed so that neighbor probes may step off the grid edge;
/// out-of-range coordinates are walls by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub row: i16,
    pub col: i16,
}

impl TilePos {
    pub fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The adjacent tile one step in `dir`
    pub fn step(&self, dir: Direction) -> TilePos {
        let (dr, dc) = dir.offset();
        TilePos::new(self.row + dr, self.col + dc)
    }
}

/// The four cardinal probe directions, in feature-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Fixed iteration order used everywhere a per-direction reading is produced
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// (row_delta, col_delta) for one step in this direction
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

/// Discrete action emitted to the game server
///
/// Discriminants match the policy's output indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
}

impl Action {
    pub fn from_index(index: usize) -> Option<Action> {
        match index {
            0 => Some(Action::Right),
            1 => Some(Action::Left),
            2 => Some(Action::Up),
            3 => Some(Action::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Right => "RIGHT",
            Action::Left => "LEFT",
            Action::Up => "UP",
            Action::Down => "DOWN",
        }
    }
}

/// Agent position plus current heading
///
/// The heading pair is only ever read as four binary
/// "currently moving in direction D" flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentPose {
    pub row: i16,
    pub col: i16,
    /// -1 moving up, +1 moving down, 0 neither
    pub row_dir: i8,
    /// -1 moving left, +1 moving right, 0 neither
    pub col_dir: i8,
}

impl AgentPose {
    pub fn pos(&self) -> TilePos {
        TilePos::new(self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets_are_unit_steps() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.offset();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }

    #[test]
    fn test_action_index_round_trip() {
        for i in 0..4 {
            let action = Action::from_index(i).unwrap();
            assert_eq!(action as usize, i);
        }
        assert!(Action::from_index(4).is_none());
    }

    #[test]
    fn test_step_moves_one_tile() {
        let pos = TilePos::new(5, 5);
        assert_eq!(pos.step(Direction::Left), TilePos::new(5, 4));
        assert_eq!(pos.step(Direction::Right), TilePos::new(5, 6));
        assert_eq!(pos.step(Direction::Up), TilePos::new(4, 5));
        assert_eq!(pos.step(Direction::Down), TilePos::new(6, 5));
    }
}
