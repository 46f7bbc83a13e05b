//! Decision policy seam
//!
//! The policy is an opaque, deterministic function from one observation
//! to one of four discrete actions. The production policy is a linear
//! model exported from training as JSON weights, loaded once at startup
//! and immutable afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};
use crate::observe::{Observation, OBS_LEN};

/// Number of discrete actions the policy chooses between
pub const ACTION_COUNT: usize = 4;

pub trait Policy {
    /// Map one observation to an action index in `0..ACTION_COUNT`
    fn predict(&self, observation: &Observation) -> usize;
}

/// Per-action linear scoring with argmax selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPolicy {
    /// One weight row per action, `OBS_LEN` entries each
    weights: Vec<Vec<f32>>,
    biases: Vec<f32>,
}

impl LinearPolicy {
    pub fn new(weights: Vec<Vec<f32>>, biases: Vec<f32>) -> Result<Self> {
        let policy = Self { weights, biases };
        policy.validate()?;
        Ok(policy)
    }

    /// All-zero weights; argmax ties resolve to the first action
    pub fn zeroed() -> Self {
        Self {
            weights: vec![vec![0.0; OBS_LEN]; ACTION_COUNT],
            biases: vec![0.0; ACTION_COUNT],
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.len() != ACTION_COUNT || self.biases.len() != ACTION_COUNT {
            return Err(BotError::Policy(format!(
                "expected {ACTION_COUNT} weight rows and biases, got {} and {}",
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (i, row) in self.weights.iter().enumerate() {
            if row.len() != OBS_LEN {
                return Err(BotError::Policy(format!(
                    "weight row {i} has {} entries, expected {OBS_LEN}",
                    row.len()
                )));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(BotError::Policy(format!("weight row {i} is not finite")));
            }
        }
        if self.biases.iter().any(|b| !b.is_finite()) {
            return Err(BotError::Policy("biases are not finite".into()));
        }
        Ok(())
    }
}

impl Policy for LinearPolicy {
    fn predict(&self, observation: &Observation) -> usize {
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (action, (row, bias)) in self.weights.iter().zip(&self.biases).enumerate() {
            let score: f32 = bias
                + row
                    .iter()
                    .zip(observation.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f32>();
            if score > best_score {
                best = action;
                best_score = score;
            }
        }
        best
    }
}

/// Reject malformed vectors before they reach the policy
///
/// Length is fixed by the array type; the remaining failure mode is a
/// non-finite entry leaking out of feature assembly.
pub fn validate_observation(observation: &Observation) -> Result<()> {
    for (i, value) in observation.iter().enumerate() {
        if !value.is_finite() {
            return Err(BotError::InvalidObservation(format!(
                "entry {i} is {value}"
            )));
        }
    }
    Ok(())
}
