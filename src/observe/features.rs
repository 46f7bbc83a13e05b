//! Observation assembly: the 22-entry feature vector
//!
//! Fixed layout, every entry clamped to [0,1] at the end:
//!   0      level progress
//!   1      threat duration (max remaining fright steps, normalized)
//!   2..6   nearest-pellet distance L,R,U,D
//!   6..10  active-adversary minus intersection distance L,R,U,D
//!   10..14 neutralized-adversary distance L,R,U,D
//!   14..18 entrapment L,R,U,D
//!   18..22 heading flags L,R,U,D

use crate::core::config::BotConfig;
use crate::core::types::{Direction, TilePos};
use crate::observe::goal::GoalMemory;
use crate::spatial::analyzer::SpatialAnalyzer;
use crate::state::GameState;

/// Observation length; the policy's input width
pub const OBS_LEN: usize = 22;

pub type Observation = [f32; OBS_LEN];

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Builds one observation per tick, carrying goal memory across ticks
///
/// Read-only against the snapshot; the only state mutated is the goal
/// memory, which lives for one episode.
pub struct FeatureVectorBuilder {
    config: BotConfig,
    goal: GoalMemory,
}

impl FeatureVectorBuilder {
    pub fn new(config: BotConfig) -> Self {
        Self {
            config,
            goal: GoalMemory::new(),
        }
    }

    pub fn goal(&self) -> &GoalMemory {
        &self.goal
    }

    /// Assemble the observation for the current snapshot
    ///
    /// Degenerate inputs (agent on a wall, empty adversary list) produce
    /// sentinel readings rather than failing; the loop always gets a
    /// vector.
    pub fn build(&mut self, state: &GameState) -> Observation {
        let analyzer = SpatialAnalyzer::new(state, self.config.max_distance);
        let max_distance = self.config.max_distance;
        let norm = max_distance as f32;

        let level_progress = if state.total_pellets == 0 {
            0.0
        } else {
            1.0 - state.num_pellets() as f32 / state.total_pellets as f32
        };

        let threat_duration = state
            .adversaries
            .iter()
            .map(|a| a.fright_steps)
            .max()
            .unwrap_or(0) as f32
            / self.config.fright_steps_max as f32;

        let agent = state.agent.pos();
        let probes = Direction::ALL.map(|dir| agent.step(dir));

        let mut pellet = [0.0f32; 4];
        for (reading, &probe) in pellet.iter_mut().zip(&probes) {
            let distance = analyzer.search_nearest(
                probe,
                |t| state.pellet_at(t),
                Some(agent),
                max_distance,
                max_distance,
            );
            *reading = clamp01(distance as f32 / norm);
        }

        self.goal.tick();
        if pellet == [1.0; 4] {
            // nothing informative nearby in any direction; steer toward
            // the remembered fallback corner instead
            pellet = self.goal_readings(state, &analyzer, agent, &probes);
        }

        let active = probes.map(|probe| {
            analyzer.search_nearest(
                probe,
                |t| {
                    state
                        .adversaries
                        .iter()
                        .any(|a| !a.frightened && a.pos == t)
                },
                Some(agent),
                0,
                max_distance,
            ) as f32
                / norm
        });

        let neutralized = probes.map(|probe| {
            analyzer.search_nearest(
                probe,
                |t| {
                    state
                        .adversaries
                        .iter()
                        .any(|a| a.frightened && a.pos == t)
                },
                Some(agent),
                max_distance,
                max_distance,
            ) as f32
                / norm
        });

        let intersection = probes.map(|probe| {
            analyzer.search_nearest(
                probe,
                |t| open_neighbors(state, t) > 2,
                Some(agent),
                max_distance,
                max_distance,
            ) as f32
                / norm
        });

        let safe_tiles = probes.map(|probe| analyzer.safe_tile_count(probe, Some(agent)));
        let min_safe = safe_tiles.iter().copied().min().unwrap_or(0);
        let entrapment = safe_tiles.map(|count| (count - min_safe) as f32 / norm);

        let pose = state.agent;
        let heading = [
            if pose.col_dir < 0 { 1.0 } else { 0.0 },
            if pose.col_dir > 0 { 1.0 } else { 0.0 },
            if pose.row_dir < 0 { 1.0 } else { 0.0 },
            if pose.row_dir > 0 { 1.0 } else { 0.0 },
        ];

        let mut observation = [0.0f32; OBS_LEN];
        observation[0] = level_progress;
        observation[1] = threat_duration;
        for i in 0..4 {
            observation[2 + i] = pellet[i];
            // signed threat/mobility signal; only the final clamp applies
            observation[6 + i] = active[i] - intersection[i];
            observation[10 + i] = neutralized[i];
            observation[14 + i] = entrapment[i];
            observation[18 + i] = heading[i];
        }
        for value in &mut observation {
            *value = clamp01(*value);
        }
        observation
    }

    /// Ranked readings toward the fallback corner target
    ///
    /// Per direction, the remap yields exactly one of four levels:
    /// 0.8 for the worse direction on its axis, 0.4/0.6 for the better
    /// one depending on which axis is further from the target, and 1.0
    /// reserved for a direction where the target is truly unreachable.
    fn goal_readings(
        &mut self,
        state: &GameState,
        analyzer: &SpatialAnalyzer<'_>,
        agent: TilePos,
        probes: &[TilePos; 4],
    ) -> [f32; 4] {
        let target = self
            .goal
            .acquire(state.grid_index(), agent, self.config.goal_horizon);
        let not_found = self.config.goal_not_found;

        let distance = probes.map(|probe| {
            analyzer.search_nearest(
                probe,
                |t| t == target,
                Some(agent),
                not_found,
                self.config.max_distance,
            )
        });
        let [left, right, up, down] = distance;

        // reward the axis with the larger gap to the target
        let horizontal_further = left.min(right) > up.min(down);

        let mut readings = [
            rank(left, right, horizontal_further),
            rank(right, left, horizontal_further),
            rank(up, down, !horizontal_further),
            rank(down, up, !horizontal_further),
        ];
        for (reading, d) in readings.iter_mut().zip(distance) {
            if d == not_found {
                *reading = 1.0;
            }
        }
        readings
    }
}

/// One remap level: the farther direction on an axis reads 0.8, the
/// nearer one 0.4 when its axis is the further one and 0.6 otherwise
fn rank(own: u32, opposite: u32, axis_further: bool) -> f32 {
    if own > opposite {
        0.8
    } else if axis_further {
        0.4
    } else {
        0.6
    }
}

/// Open cardinal neighbors of a tile; more than 2 makes an intersection
fn open_neighbors(state: &GameState, pos: TilePos) -> u8 {
    Direction::ALL
        .iter()
        .filter(|dir| !state.wall_at(pos.step(**dir)))
        .count() as u8
}
