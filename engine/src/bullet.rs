use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::ModelVertex;
use crate::map::MapDefinition;
use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BulletId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    CannonBall,
}

const CANNON_BALL_DAMAGE: f32 = 10.0;
const CANNON_BALL_RADIUS: f32 = 0.1;

impl BulletKind {
    pub fn base_damage(self) -> f32 {
        match self {
            BulletKind::CannonBall => CANNON_BALL_DAMAGE,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            BulletKind::CannonBall => CANNON_BALL_RADIUS,
        }
    }
}

/// A live projectile owned by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: BulletId,
    pub kind: BulletKind,
    pub owner: PlayerId,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub damage: f32,
    pub radius: f32,
}

/// A spawn request pushed by a unit during its update. The core assigns the
/// id when it materializes the bullet at the end of the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletSpawn {
    pub kind: BulletKind,
    pub owner: PlayerId,
    pub position: Vec2,
    pub rotation: f32,
    pub damage: f32,
    pub velocity: Vec2,
}

/// Advances every bullet by one step and drops the ones that left the arena
/// or flew into a wall.
pub fn advance_bullets(bullets: &mut Vec<Bullet>, map: &MapDefinition, dt: f32) {
    bullets.retain_mut(|bullet| {
        bullet.position += bullet.velocity * dt;
        !map.is_blocked(bullet.position)
    });
}

/// Shared disc model for rendering cannon balls, tinted per owner at draw
/// time.
pub fn cannon_ball_model() -> (Vec<ModelVertex>, Vec<u32>) {
    let white = [1.0, 1.0, 1.0, 1.0];
    let precision = 12u32;
    let mut vertices = Vec::with_capacity(precision as usize + 1);
    let mut indices = Vec::with_capacity(precision as usize * 3);
    for i in 0..precision {
        let theta = (i as f32 + 0.5) / precision as f32 * TAU;
        vertices.push(ModelVertex::colored(
            Vec2::new(theta.sin(), theta.cos()) * CANNON_BALL_RADIUS,
            white,
        ));
        indices.extend([i, (i + 1) % precision, precision]);
    }
    vertices.push(ModelVertex::colored(Vec2::ZERO, white));
    (vertices, indices)
}
