pub mod assets;
pub mod bullet;
pub mod codec;
pub mod events;
pub mod game;
pub mod graphics;
pub mod input;
pub mod map;
pub mod math;
pub mod player;
pub mod unit;
pub mod units;

pub use game::{EngineError, GameCore, KillReport, TickId, TickReport};

/// Fixed simulation rate. Everything time-based in the engine is expressed
/// in ticks, so changing this rescales speeds and cooldowns together.
pub const TICKS_PER_SECOND: u32 = 60;
pub const SECONDS_PER_TICK: f32 = 1.0 / TICKS_PER_SECOND as f32;
