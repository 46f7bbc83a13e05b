//! Gridbot - Entry Point
//!
//! Loads the policy weights and config, builds the shared game state, and
//! runs the decision loop on a single-threaded runtime. The real server
//! transport lives outside this crate; an in-process driver stands in for
//! it here, feeding snapshot updates and draining emitted actions so the
//! binary can be exercised end to end.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::task::yield_now;
use tokio::time::sleep;

use gridbot::agent::DecisionLoop;
use gridbot::core::config::BotConfig;
use gridbot::core::error::Result;
use gridbot::core::types::{Direction, TilePos};
use gridbot::policy::LinearPolicy;
use gridbot::state::{ActionQueue, Adversary, GameState, SharedState};

#[derive(Parser, Debug)]
#[command(name = "gridbot", about = "Perception agent for a grid-world game")]
struct Args {
    /// Policy weights (JSON); zero weights when omitted
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Config file (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snapshot updates the demo driver feeds before disconnecting
    #[arg(long, default_value_t = 40)]
    ticks: u32,

    /// Seed for the demo driver's adversary movement
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("gridbot=debug")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    let policy = match &args.weights {
        Some(path) => LinearPolicy::from_path(path)?,
        None => {
            tracing::warn!("no weights file given, running with zero weights");
            LinearPolicy::zeroed()
        }
    };

    let state = SharedState::new(demo_level());
    let actions = ActionQueue::new();
    let mut decision = DecisionLoop::new(config, state.clone(), actions.clone(), policy);

    tracing::info!("gridbot starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let metrics = runtime.block_on(async {
        let driver = drive_demo(state, actions, args.ticks, args.seed);
        let (metrics, _) = tokio::join!(decision.run(), driver);
        metrics
    });

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

/// Bordered 15x15 level: pellets on every open tile, agent centered,
/// two adversaries in opposite corners
fn demo_level() -> GameState {
    let rows = 15;
    let cols = 15;
    let mut state = GameState::open(rows, cols);
    for row in 0..rows {
        state.set_wall(TilePos::new(row, 0), true);
        state.set_wall(TilePos::new(row, cols - 1), true);
    }
    for col in 0..cols {
        state.set_wall(TilePos::new(0, col), true);
        state.set_wall(TilePos::new(rows - 1, col), true);
    }
    // a few interior pillars so the maze has intersections and corridors
    for &(row, col) in &[(3, 3), (3, 11), (7, 5), (7, 9), (11, 3), (11, 11)] {
        state.set_wall(TilePos::new(row, col), true);
    }

    let mut pellets = 0;
    for row in 0..rows {
        for col in 0..cols {
            let pos = TilePos::new(row, col);
            if !state.wall_at(pos) && pos != TilePos::new(7, 7) {
                state.set_pellet(pos, true);
                pellets += 1;
            }
        }
    }
    state.total_pellets = pellets;

    state.agent.row = 7;
    state.agent.col = 7;
    state.adversaries.push(Adversary::at(TilePos::new(1, 1)));
    state
        .adversaries
        .push(Adversary::at(TilePos::new(rows - 2, cols - 2)));
    state
}

/// Stand-in for the server transport: drains emitted actions, walks the
/// adversaries one random step per update, and flags each fresh snapshot
async fn drive_demo(state: SharedState, actions: ActionQueue, ticks: u32, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..ticks {
        {
            let mut guard = state.lock();
            if let Some((agent_id, action)) = actions.drain() {
                tracing::debug!(agent_id, action = action.name(), "sent");
            }
            for i in 0..guard.adversaries.len() {
                let here = guard.adversaries[i].pos;
                let open: Vec<TilePos> = Direction::ALL
                    .iter()
                    .map(|dir| here.step(*dir))
                    .filter(|next| !guard.wall_at(*next))
                    .collect();
                if let Some(next) = open.choose(&mut rng) {
                    guard.adversaries[i].pos = *next;
                }
            }
            guard.update_ready = true;
        }
        sleep(Duration::from_millis(200)).await;
        yield_now().await;
    }

    state.lock().connected = false;
}
