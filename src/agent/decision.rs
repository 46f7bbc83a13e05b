//! Cooperative decision loop
//!
//! One decision per tick: wait until a fresh snapshot has arrived and the
//! outbound slot is free, let the snapshot settle, then hold the state
//! lock for exactly one extract-predict-emit critical section. Explicit
//! yield points keep the transport channel responsive; the loop never
//! blocks it, and it exits cleanly when connectivity is lost.

use std::time::Duration;

use serde::Serialize;
use tokio::task::yield_now;
use tokio::time::sleep;

use crate::core::config::BotConfig;
use crate::core::types::{Action, Tick};
use crate::observe::FeatureVectorBuilder;
use crate::policy::{validate_observation, Policy};
use crate::state::{ActionQueue, SharedState};

/// Agent id actions are addressed to on the wire
const AGENT_ID: u8 = 1;

/// Outcome of one loop step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStep {
    /// Outbound slot busy or no fresh snapshot; nothing decided
    Idle,
    /// One action queued
    Decided(Action),
    /// Observation or policy output failed validation; no action this tick
    SkippedInvalid,
    /// Connectivity lost; the loop is done
    Terminated,
}

/// Counters reported when the loop terminates
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LoopMetrics {
    /// Critical sections entered (fresh snapshot consumed)
    pub ticks: Tick,
    pub decided: u64,
    pub skipped_invalid: u64,
}

pub struct DecisionLoop<P: Policy> {
    state: SharedState,
    actions: ActionQueue,
    builder: FeatureVectorBuilder,
    policy: P,
    settle: Duration,
    metrics: LoopMetrics,
}

impl<P: Policy> DecisionLoop<P> {
    pub fn new(config: BotConfig, state: SharedState, actions: ActionQueue, policy: P) -> Self {
        let settle = Duration::from_millis(config.settle_ms);
        Self {
            state,
            actions,
            builder: FeatureVectorBuilder::new(config),
            policy,
            settle,
            metrics: LoopMetrics::default(),
        }
    }

    pub fn metrics(&self) -> LoopMetrics {
        self.metrics
    }

    /// One decision attempt; pacing and yielding belong to the caller
    ///
    /// Re-checks the gating conditions under the lock, so a driver may
    /// call it at any time without racing the transport.
    pub fn step(&mut self) -> LoopStep {
        let guard = self.state.lock();
        if !guard.connected {
            return LoopStep::Terminated;
        }
        if self.actions.is_pending() || !guard.update_ready {
            return LoopStep::Idle;
        }

        let mut guard = guard;
        let observation = self.builder.build(&guard);
        // the snapshot is consumed whether or not an action goes out
        guard.update_ready = false;
        self.metrics.ticks += 1;

        if let Err(e) = validate_observation(&observation) {
            tracing::warn!(error = %e, "skipping tick on invalid observation");
            self.metrics.skipped_invalid += 1;
            return LoopStep::SkippedInvalid;
        }

        let index = self.policy.predict(&observation);
        let Some(action) = Action::from_index(index) else {
            tracing::warn!(index, "policy returned an out-of-range action index");
            self.metrics.skipped_invalid += 1;
            return LoopStep::SkippedInvalid;
        };

        self.actions.queue(AGENT_ID, action);
        self.metrics.decided += 1;
        tracing::debug!(action = action.name(), "decided");
        LoopStep::Decided(action)
    }

    /// Drive steps until connectivity is lost
    ///
    /// Yields with zero-duration suspensions while the outbound slot is
    /// occupied or no fresh update has arrived, so the transport side of
    /// the shared thread is never starved. The settle delay runs without
    /// holding the lock.
    pub async fn run(&mut self) -> LoopMetrics {
        loop {
            let (connected, ready) = {
                let guard = self.state.lock();
                (guard.connected, guard.update_ready)
            };
            if !connected {
                break;
            }
            if self.actions.is_pending() || !ready {
                yield_now().await;
                continue;
            }

            // let the snapshot stabilize before deciding on it
            sleep(self.settle).await;

            if self.step() == LoopStep::Terminated {
                break;
            }
            yield_now().await;
        }
        tracing::info!(
            ticks = self.metrics.ticks,
            decided = self.metrics.decided,
            skipped = self.metrics.skipped_invalid,
            "connectivity lost, decision loop terminated"
        );
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TilePos;
    use crate::observe::{Observation, OBS_LEN};
    use crate::state::GameState;

    /// Policy stub returning a fixed action index
    struct Fixed(usize);

    impl Policy for Fixed {
        fn predict(&self, _observation: &Observation) -> usize {
            self.0
        }
    }

    fn fixture() -> (SharedState, ActionQueue) {
        let mut state = GameState::open(5, 5);
        state.agent.row = 2;
        state.agent.col = 2;
        state.set_pellet(TilePos::new(1, 1), true);
        state.total_pellets = 1;
        state.update_ready = true;
        (SharedState::new(state), ActionQueue::new())
    }

    fn decision_loop(state: SharedState, actions: ActionQueue, policy: Fixed) -> DecisionLoop<Fixed> {
        DecisionLoop::new(BotConfig::default(), state, actions, policy)
    }

    #[test]
    fn test_step_decides_and_consumes_the_update() {
        let (state, actions) = fixture();
        let mut decision = decision_loop(state.clone(), actions.clone(), Fixed(2));

        assert_eq!(decision.step(), LoopStep::Decided(Action::Up));
        assert_eq!(actions.drain(), Some((AGENT_ID, Action::Up)));
        assert!(!state.lock().update_ready);

        // no fresh update: the next step idles
        assert_eq!(decision.step(), LoopStep::Idle);
    }

    #[test]
    fn test_pending_action_blocks_the_next_decision() {
        let (state, actions) = fixture();
        let mut decision = decision_loop(state.clone(), actions.clone(), Fixed(0));

        assert_eq!(decision.step(), LoopStep::Decided(Action::Right));
        state.lock().update_ready = true;
        // the transport has not drained the slot yet
        assert_eq!(decision.step(), LoopStep::Idle);

        actions.drain();
        assert_eq!(decision.step(), LoopStep::Decided(Action::Right));
    }

    #[test]
    fn test_out_of_range_policy_output_skips_the_tick() {
        let (state, actions) = fixture();
        let mut decision = decision_loop(state, actions.clone(), Fixed(7));

        assert_eq!(decision.step(), LoopStep::SkippedInvalid);
        assert!(!actions.is_pending());
        assert_eq!(decision.metrics().skipped_invalid, 1);
        assert_eq!(decision.metrics().decided, 0);
    }

    #[test]
    fn test_disconnect_terminates() {
        let (state, actions) = fixture();
        state.lock().connected = false;
        let mut decision = decision_loop(state, actions, Fixed(0));
        assert_eq!(decision.step(), LoopStep::Terminated);
    }

    #[test]
    fn test_observation_width_matches_policy_input() {
        assert_eq!(OBS_LEN, 22);
    }
}
