//! Agent configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose.
//! The defaults match the competition client this agent was trained against;
//! a trained policy is only valid for the constants it saw during training.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{BotError, Result};

/// Tuning constants for perception and loop pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    // === SPATIAL PROBES ===
    /// Maximum BFS depth for distance probes (tiles)
    ///
    /// Doubles as the normalizer mapping raw tile distances into [0,1]:
    /// anything at or beyond this depth reads as a saturated 1.0.
    pub max_distance: u32,

    /// Not-found sentinel for goal-target probes
    ///
    /// Distinct from `max_distance` so a direction where the fallback
    /// target is truly unreachable can be told apart from one where it
    /// is merely far away.
    pub goal_not_found: u32,

    // === GOAL MEMORY ===
    /// Ticks a fallback corner target stays alive before being dropped
    ///
    /// Short enough that a stale target cannot steer the agent for long,
    /// long enough to prevent tick-over-tick corner oscillation.
    pub goal_horizon: u32,

    // === NORMALIZATION ===
    /// Fright-step countdown that maps to a threat-duration reading of 1.0
    pub fright_steps_max: u32,

    // === PACING ===
    /// Delay before each decision to let the snapshot stabilize (ms)
    pub settle_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_distance: 64,
            goal_not_found: 255,
            goal_horizon: 16,
            fright_steps_max: 40,
            settle_ms: 150,
        }
    }
}

impl BotConfig {
    /// Parse a config from TOML text; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BotError::Config(format!("failed to parse config: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
