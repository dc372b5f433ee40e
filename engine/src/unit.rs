use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetError, AssetLibrary, ModelId, ModelVertex};
use crate::bullet::{BulletKind, BulletSpawn};
use crate::events::GameEvent;
use crate::graphics::{RenderFrame, WHITE_TEXTURE};
use crate::input::InputState;
use crate::map::MapDefinition;
use crate::math;
use crate::player::{Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

pub const UNIT_MAX_HEALTH: f32 = 100.0;

const LIFE_BAR_OFFSET: f32 = 1.4;
const LIFE_BAR_WIDTH: f32 = 1.6;
const LIFE_BAR_HEIGHT: f32 = 0.15;
const LIFE_BAR_BACKDROP: [f32; 4] = [0.3, 0.05, 0.05, 0.9];
const LIFE_BAR_FILL: [f32; 4] = [0.1, 0.9, 0.2, 0.9];

/// State every unit carries regardless of type. Concrete units embed this
/// and layer their own fields (turret angle, cooldowns, ...) on top.
#[derive(Debug, Clone)]
pub struct UnitBase {
    pub id: UnitId,
    pub player_id: PlayerId,
    pub position: Vec2,
    pub rotation: f32,
    pub health: f32,
    pub speed_scale: f32,
    pub damage_scale: f32,
    life_bar_model: ModelId,
}

impl UnitBase {
    pub fn new(
        assets: &mut AssetLibrary,
        id: UnitId,
        player_id: PlayerId,
        position: Vec2,
    ) -> Result<Self, AssetError> {
        let life_bar_model = assets.get_or_register("unit/life_bar", life_bar_model)?;
        Ok(Self {
            id,
            player_id,
            position,
            rotation: 0.0,
            health: UNIT_MAX_HEALTH,
            speed_scale: 1.0,
            damage_scale: 1.0,
            life_bar_model,
        })
    }

    /// Maps a world-space point into this unit's local frame.
    pub fn world_to_local(&self, point: Vec2) -> Vec2 {
        math::world_to_local(point, self.position, self.rotation)
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / UNIT_MAX_HEALTH).clamp(0.0, 1.0)
    }

    /// Draws the backdrop bar and a fill scaled by remaining health. The
    /// fill stays anchored to the bar's left edge as it shrinks.
    pub fn render_life_bar(&self, frame: &mut RenderFrame) {
        let anchor = self.position + Vec2::new(0.0, LIFE_BAR_OFFSET);
        frame.set_texture(WHITE_TEXTURE);
        frame.set_scaled_transformation(anchor, 0.0, Vec2::new(LIFE_BAR_WIDTH, LIFE_BAR_HEIGHT));
        frame.set_color(LIFE_BAR_BACKDROP);
        frame.draw_model(self.life_bar_model);

        let fraction = self.health_fraction();
        let fill_anchor = anchor - Vec2::new(0.5 * LIFE_BAR_WIDTH * (1.0 - fraction), 0.0);
        frame.set_scaled_transformation(
            fill_anchor,
            0.0,
            Vec2::new(LIFE_BAR_WIDTH * fraction, LIFE_BAR_HEIGHT),
        );
        frame.set_color(LIFE_BAR_FILL);
        frame.draw_model(self.life_bar_model);
    }
}

fn life_bar_model() -> (Vec<ModelVertex>, Vec<u32>) {
    let white = [1.0, 1.0, 1.0, 1.0];
    let vertices = vec![
        ModelVertex::colored(Vec2::new(-0.5, -0.5), white),
        ModelVertex::colored(Vec2::new(0.5, -0.5), white),
        ModelVertex::colored(Vec2::new(0.5, 0.5), white),
        ModelVertex::colored(Vec2::new(-0.5, 0.5), white),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// A controllable entity with type-specific behavior. The core drives the
/// trait methods once per tick (update) and once per frame (render).
pub trait Unit {
    fn base(&self) -> &UnitBase;
    fn base_mut(&mut self) -> &mut UnitBase;

    fn update(&mut self, ctx: &mut UpdateContext);
    fn render(&self, frame: &mut RenderFrame, ctx: &RenderContext);

    /// Whether a world-space point lands inside this unit's hitbox.
    fn is_hit(&self, position: Vec2) -> bool;

    fn name(&self) -> &'static str;
    fn author(&self) -> &'static str;
}

/// Constructor surface the core spawns units through; registers the unit
/// type's models on first use.
pub trait SpawnableUnit: Unit + Sized + 'static {
    fn spawn(
        assets: &mut AssetLibrary,
        id: UnitId,
        player_id: PlayerId,
        position: Vec2,
    ) -> Result<Self, AssetError>;
}

/// Services a unit may call during its per-tick update.
pub struct UpdateContext<'a> {
    pub(crate) input: Option<&'a InputState>,
    pub(crate) map: &'a MapDefinition,
    pub(crate) events: &'a mut Vec<GameEvent>,
    pub(crate) bullet_spawns: &'a mut Vec<BulletSpawn>,
}

impl<'a> UpdateContext<'a> {
    /// Input snapshot of the owning player, or `None` when the player is
    /// gone. Units skip input-driven behavior in that case.
    pub fn input(&self) -> Option<&'a InputState> {
        self.input
    }

    pub fn is_blocked(&self, point: Vec2) -> bool {
        self.map.is_blocked(point)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Requests a projectile. Damage is the kind's base damage scaled by
    /// the firing unit's damage scale.
    pub fn fire_bullet(
        &mut self,
        kind: BulletKind,
        owner: PlayerId,
        position: Vec2,
        rotation: f32,
        damage_scale: f32,
        velocity: Vec2,
    ) {
        self.bullet_spawns.push(BulletSpawn {
            kind,
            owner,
            position,
            rotation,
            damage: kind.base_damage() * damage_scale,
            velocity,
        });
    }
}

/// Read-only lookups available while rendering.
pub struct RenderContext<'a> {
    pub(crate) players: &'a [Player],
}

impl RenderContext<'_> {
    /// Tint for a player's units; white when the player is unknown.
    pub fn player_color(&self, player_id: PlayerId) -> [f32; 4] {
        self.players
            .iter()
            .find(|player| player.id == player_id)
            .map(|player| player.color)
            .unwrap_or([1.0, 1.0, 1.0, 1.0])
    }
}
