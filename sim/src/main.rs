//! Headless battle driver: two scripted players duel in an arena at the
//! engine's fixed tick rate, recording a replay as they go.
//!
//! `ARENA=quarry cargo run -p sim` selects the arena; `RUST_LOG` controls
//! verbosity as usual.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use engine::input::{InputState, Key, MouseButton};
use engine::map::{MapDefinition, MapName};
use engine::unit::Unit;
use engine::units::TwinViaPlatelet;
use engine::{GameCore, TICKS_PER_SECOND, codec};
use glam::Vec2;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / TICKS_PER_SECOND as u64);
const BATTLE_TICK_CAP: u32 = TICKS_PER_SECOND * 60;
const RNG_SEED: u64 = 0xB477;

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    init_tracing();

    let arena = arena_from_env();
    info!(?arena, "setting up battle");

    let mut core = GameCore::new(MapDefinition::load(arena), RNG_SEED)?;
    let alice = core.add_player();
    let bob = core.add_player();
    let alice_tank = core.spawn_unit::<TwinViaPlatelet>(alice)?;
    let bob_tank = core.spawn_unit::<TwinViaPlatelet>(bob)?;
    info!(
        unit = core.unit(alice_tank).map(|u| u.name()).unwrap_or("?"),
        "both players fielded"
    );

    let mut replay: Vec<u8> = Vec::new();
    let mut ticker = time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down early");
                break;
            }
            _ = ticker.tick() => {
                let alice_pos = core.unit(alice_tank).map(|u| u.base().position);
                let bob_pos = core.unit(bob_tank).map(|u| u.base().position);

                if let (Some(alice_pos), Some(bob_pos)) = (alice_pos, bob_pos) {
                    core.set_input(alice, charge_and_fire(bob_pos));
                    core.set_input(bob, charge_and_fire(alice_pos));
                }

                let report = core.tick();
                record_frame(&mut replay, &core);

                for kill in &report.kills {
                    info!(killer = ?kill.killer, victim = ?kill.victim, "kill");
                }
                if !report.kills.is_empty() {
                    info!(tick = report.tick.0, "battle decided");
                    break;
                }
                if report.tick.0 >= BATTLE_TICK_CAP as u64 {
                    warn!("tick cap reached without a kill, calling it a draw");
                    break;
                }
            }
        }
    }

    info!(
        ticks = core.tick_id().0,
        replay_bytes = replay.len(),
        "battle finished"
    );
    Ok(())
}

/// Drive toward the opponent, keep the cursor on them, hold the trigger.
fn charge_and_fire(target: Vec2) -> InputState {
    let mut input = InputState::default();
    input.press(Key::W);
    input.set_cursor(target);
    input.hold_mouse(MouseButton::Left);
    input
}

/// Appends one length-prefixed snapshot frame to the replay buffer.
fn record_frame(replay: &mut Vec<u8>, core: &GameCore) {
    match codec::encode_snapshot(&core.snapshot()) {
        Ok(frame) => {
            replay.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            replay.extend_from_slice(&frame);
        }
        Err(err) => debug!(%err, "skipping replay frame"),
    }
}

fn arena_from_env() -> MapName {
    match env::var("ARENA") {
        Ok(name) => MapName::from_str(&name).unwrap_or_else(|_| {
            warn!(%name, "unknown arena, falling back to basic");
            MapName::Basic
        }),
        Err(_) => MapName::Basic,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
