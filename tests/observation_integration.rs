//! Integration tests for end-to-end observation assembly
//!
//! These tests verify full 22-entry vectors on small fixture levels:
//! - directional pellet readings in an open room
//! - saturation when a direction is genuinely blocked
//! - entrapment asymmetry beside an adversary
//! - invariance under uniform translation of the level geometry

use gridbot::core::config::BotConfig;
use gridbot::core::types::TilePos;
use gridbot::observe::FeatureVectorBuilder;
use gridbot::state::{Adversary, GameState};

fn builder() -> FeatureVectorBuilder {
    FeatureVectorBuilder::new(BotConfig::default())
}

/// Bordered room with open interior
fn walled_room(rows: i16, cols: i16) -> GameState {
    let mut state = GameState::open(rows, cols);
    for row in 0..rows {
        state.set_wall(TilePos::new(row, 0), true);
        state.set_wall(TilePos::new(row, cols - 1), true);
    }
    for col in 0..cols {
        state.set_wall(TilePos::new(0, col), true);
        state.set_wall(TilePos::new(rows - 1, col), true);
    }
    state
}

// ============================================================================
// Pellet readings
// ============================================================================

#[test]
fn test_open_room_pellet_readings_rank_the_directions() {
    // 3x3 open room (out-of-range is wall), agent centered, one pellet in
    // the top-right corner, no adversaries
    let mut state = GameState::open(3, 3);
    state.agent.row = 1;
    state.agent.col = 1;
    state.set_pellet(TilePos::new(0, 2), true);
    state.total_pellets = 1;

    let observation = builder().build(&state);

    // up and right probes sit one step from the pellet
    assert!((observation[4] - 1.0 / 64.0).abs() < 1e-6, "up");
    assert!((observation[3] - 1.0 / 64.0).abs() < 1e-6, "right");
    // left and down still reach it around the agent tile, three steps out
    assert!((observation[2] - 3.0 / 64.0).abs() < 1e-6, "left");
    assert!((observation[5] - 3.0 / 64.0).abs() < 1e-6, "down");
    // the near directions read strictly closer
    assert!(observation[4] < observation[2]);
    assert!(observation[3] < observation[5]);
}

#[test]
fn test_blocked_direction_saturates_at_one() {
    // dead-end corridor: the agent tile is the only way out of the left
    // stub, so the left probe can never reach the pellet on the right
    let mut state = GameState::open(1, 5);
    state.agent.row = 0;
    state.agent.col = 1;
    state.set_pellet(TilePos::new(0, 4), true);
    state.total_pellets = 1;

    let observation = builder().build(&state);

    // left probe (0,0) is boxed in once the agent tile is excluded
    assert_eq!(observation[2], 1.0, "left saturates");
    // right probe walks straight to the pellet
    assert!((observation[3] - 2.0 / 64.0).abs() < 1e-6, "right");
    // up and down probes are out of range, walls by definition
    assert_eq!(observation[4], 1.0, "up saturates");
    assert_eq!(observation[5], 1.0, "down saturates");
}

// ============================================================================
// Entrapment
// ============================================================================

#[test]
fn test_adjacent_adversary_skews_entrapment_away() {
    // single active adversary immediately right of the agent
    let mut state = walled_room(9, 9);
    state.agent.row = 4;
    state.agent.col = 4;
    state.set_pellet(TilePos::new(1, 1), true);
    state.total_pellets = 1;
    state.adversaries.push(Adversary::at(TilePos::new(4, 5)));

    let observation = builder().build(&state);

    // probing right starts on the adversary tile: zero safe tiles, the
    // most constrained direction
    assert_eq!(observation[15], 0.0, "entrapment right is the floor");
    assert!(
        observation[14] > observation[15],
        "left {} should beat right {}",
        observation[14],
        observation[15]
    );
}

// ============================================================================
// Translation invariance
// ============================================================================

/// Carve the same 7x7 room pattern into `state` at a row/col offset
fn carve_room(state: &mut GameState, dr: i16, dc: i16) {
    for row in 1..6 {
        for col in 1..6 {
            state.set_wall(TilePos::new(row + dr, col + dc), false);
        }
    }
    // one pillar so the geometry is not symmetric
    state.set_wall(TilePos::new(3 + dr, 2 + dc), true);
    state.set_pellet(TilePos::new(1 + dr, 4 + dc), true);
    state.total_pellets = 1;
    state.agent.row = 3 + dr;
    state.agent.col = 3 + dc;
    state.adversaries.push(Adversary::at(TilePos::new(5 + dr, 5 + dc)));
}

#[test]
fn test_feature_vector_invariant_under_translation() {
    // same geometry embedded at two different offsets inside all-wall
    // grids; only relative positions matter to every feature
    let mut base = GameState::open(7, 7);
    for row in 0..7 {
        for col in 0..7 {
            base.set_wall(TilePos::new(row, col), true);
        }
    }
    let mut shifted = GameState::open(12, 13);
    for row in 0..12 {
        for col in 0..13 {
            shifted.set_wall(TilePos::new(row, col), true);
        }
    }
    carve_room(&mut base, 0, 0);
    carve_room(&mut shifted, 3, 4);

    let observation_base = builder().build(&base);
    let observation_shifted = builder().build(&shifted);
    assert_eq!(observation_base, observation_shifted);
}
