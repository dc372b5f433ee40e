use std::mem;

use glam::Vec2;
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SECONDS_PER_TICK;
use crate::assets::{AssetError, AssetLibrary, ModelId};
use crate::bullet::{Bullet, BulletId, BulletSpawn, advance_bullets, cannon_ball_model};
use crate::codec::{BattleSnapshot, BulletSnapshot, UnitSnapshot};
use crate::events::GameEvent;
use crate::graphics::{RenderFrame, WHITE_TEXTURE};
use crate::map::{MapDefinition, find_spawn_position};
use crate::player::{Player, PlayerId, player_color};
use crate::unit::{RenderContext, SpawnableUnit, Unit, UnitId, UpdateContext};

// Units keep roughly this much distance from walls when spawned.
const SPAWN_CLEARANCE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickId(pub u64);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    #[error("no spawn position available")]
    NoSpawnPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillReport {
    pub killer: PlayerId,
    pub victim: UnitId,
}

#[derive(Debug)]
pub struct TickReport {
    pub tick: TickId,
    pub kills: Vec<KillReport>,
}

/// The battle core: owns the arena, players, units, and bullets, and runs
/// the fixed-rate tick cycle.
///
/// Units request movement through the event queue; the core applies the
/// queue after every unit has updated, re-validating each move against the
/// obstacle query. That keeps all position/rotation mutation in one place.
pub struct GameCore {
    assets: AssetLibrary,
    map: MapDefinition,
    players: Vec<Player>,
    units: Vec<Box<dyn Unit>>,
    bullets: Vec<Bullet>,
    events: Vec<GameEvent>,
    bullet_spawns: Vec<BulletSpawn>,
    bullet_model: ModelId,
    next_player_id: u32,
    next_unit_id: u32,
    next_bullet_id: u64,
    next_spawn_point: usize,
    tick: TickId,
    rng: StdRng,
}

impl GameCore {
    pub fn new(map: MapDefinition, seed: u64) -> Result<Self, EngineError> {
        let mut assets = AssetLibrary::new();
        let bullet_model = assets.get_or_register("bullet/cannon_ball", cannon_ball_model)?;
        Ok(Self {
            assets,
            map,
            players: Vec::new(),
            units: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            bullet_spawns: Vec::new(),
            bullet_model,
            next_player_id: 1,
            next_unit_id: 1,
            next_bullet_id: 1,
            next_spawn_point: 0,
            tick: TickId(0),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn add_player(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        let color = player_color(self.players.len());
        self.players.push(Player::new(id, color));
        id
    }

    /// Spawns a unit for `player_id`, registering the unit type's models on
    /// first use. Spawn points are handed out round-robin; a blocked point
    /// falls through to probing the arena.
    pub fn spawn_unit<U: SpawnableUnit>(&mut self, player_id: PlayerId) -> Result<UnitId, EngineError> {
        if !self.players.iter().any(|player| player.id == player_id) {
            return Err(EngineError::UnknownPlayer(player_id));
        }

        let position = self
            .pick_spawn_point()
            .or_else(|| find_spawn_position(&self.map, SPAWN_CLEARANCE, &mut self.rng))
            .ok_or(EngineError::NoSpawnPosition)?;

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let unit = U::spawn(&mut self.assets, id, player_id, position)?;
        self.units.push(Box::new(unit));
        Ok(id)
    }

    fn pick_spawn_point(&mut self) -> Option<Vec2> {
        for _ in 0..self.map.spawn_points.len() {
            let point = self.map.spawn_points[self.next_spawn_point % self.map.spawn_points.len()];
            self.next_spawn_point += 1;
            if !self.map.is_blocked(point) {
                return Some(point);
            }
        }
        None
    }

    /// Replaces a player's input snapshot for the coming ticks. Input for
    /// an unknown player is dropped.
    pub fn set_input(&mut self, player_id: PlayerId, input: crate::input::InputState) {
        match self.players.iter_mut().find(|player| player.id == player_id) {
            Some(player) => player.input = input,
            None => warn!("dropping input for unknown player {player_id:?}"),
        }
    }

    /// Advances the battle by one tick: update units, apply the movement
    /// queue, materialize requested bullets, fly bullets, resolve hits.
    pub fn tick(&mut self) -> TickReport {
        let mut units = mem::take(&mut self.units);
        for unit in &mut units {
            let input = self
                .players
                .iter()
                .find(|player| player.id == unit.base().player_id)
                .map(|player| &player.input);
            let mut ctx = UpdateContext {
                input,
                map: &self.map,
                events: &mut self.events,
                bullet_spawns: &mut self.bullet_spawns,
            };
            unit.update(&mut ctx);
        }
        self.units = units;

        self.apply_events();
        self.materialize_bullets();
        advance_bullets(&mut self.bullets, &self.map, SECONDS_PER_TICK);
        let kills = self.resolve_hits();

        self.tick.0 += 1;
        TickReport {
            tick: self.tick,
            kills,
        }
    }

    fn apply_events(&mut self) {
        for event in self.events.drain(..) {
            match event {
                GameEvent::MoveUnit { unit_id, position } => {
                    if self.map.is_blocked(position) {
                        warn!("dropping blocked move for {unit_id:?} to {position:?}");
                        continue;
                    }
                    match self.units.iter_mut().find(|unit| unit.base().id == unit_id) {
                        Some(unit) => unit.base_mut().position = position,
                        None => warn!("dropping move for unknown unit {unit_id:?}"),
                    }
                }
                GameEvent::RotateUnit { unit_id, rotation } => {
                    match self.units.iter_mut().find(|unit| unit.base().id == unit_id) {
                        Some(unit) => unit.base_mut().rotation = rotation,
                        None => warn!("dropping rotation for unknown unit {unit_id:?}"),
                    }
                }
            }
        }
    }

    fn materialize_bullets(&mut self) {
        for spawn in self.bullet_spawns.drain(..) {
            let BulletSpawn {
                kind,
                owner,
                position,
                rotation,
                damage,
                velocity,
            } = spawn;
            let id = BulletId(self.next_bullet_id);
            self.next_bullet_id += 1;
            self.bullets.push(Bullet {
                id,
                kind,
                owner,
                position,
                rotation,
                velocity,
                damage,
                radius: kind.radius(),
            });
        }
    }

    /// A bullet damages the first enemy unit whose hitbox contains it and
    /// is destroyed on impact. Units at zero health are removed and
    /// reported; the killer is credited.
    fn resolve_hits(&mut self) -> Vec<KillReport> {
        let mut kills = Vec::new();
        let units = &mut self.units;
        self.bullets.retain(|bullet| {
            let mut hit = false;
            for unit in units.iter_mut() {
                if unit.base().player_id == bullet.owner {
                    continue;
                }
                if unit.is_hit(bullet.position) {
                    let base = unit.base_mut();
                    base.health -= bullet.damage;
                    if base.health <= 0.0 {
                        kills.push(KillReport {
                            killer: bullet.owner,
                            victim: base.id,
                        });
                    }
                    hit = true;
                    break;
                }
            }
            !hit
        });

        self.units.retain(|unit| unit.base().health > 0.0);

        for kill in &kills {
            if let Some(player) = self.players.iter_mut().find(|player| player.id == kill.killer) {
                player.kills += 1;
            }
        }
        kills
    }

    /// Records every unit and bullet into the frame, in spawn order.
    pub fn render(&self, frame: &mut RenderFrame) {
        let ctx = RenderContext {
            players: &self.players,
        };
        for unit in &self.units {
            unit.render(frame, &ctx);
        }
        for bullet in &self.bullets {
            frame.set_transformation(bullet.position, bullet.rotation);
            frame.set_texture(WHITE_TEXTURE);
            frame.set_color(ctx.player_color(bullet.owner));
            frame.draw_model(self.bullet_model);
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            tick: self.tick,
            units: self
                .units
                .iter()
                .map(|unit| {
                    let base = unit.base();
                    UnitSnapshot {
                        id: base.id,
                        player_id: base.player_id,
                        position: base.position,
                        rotation: base.rotation,
                        health: base.health,
                    }
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|bullet| BulletSnapshot {
                    id: bullet.id,
                    owner: bullet.owner,
                    position: bullet.position,
                    velocity: bullet.velocity,
                })
                .collect(),
        }
    }

    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    pub fn map(&self) -> &MapDefinition {
        &self.map
    }

    pub fn unit(&self, id: UnitId) -> Option<&dyn Unit> {
        self.units
            .iter()
            .find(|unit| unit.base().id == id)
            .map(|unit| unit.as_ref())
    }

    pub fn units(&self) -> &[Box<dyn Unit>] {
        &self.units
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_color(&self, id: PlayerId) -> [f32; 4] {
        RenderContext {
            players: &self.players,
        }
        .player_color(id)
    }
}
