//! A tank with a twin-barrel turret: both barrels fire a cannon ball per
//! shot, offset to either side of the turret axis.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

use crate::SECONDS_PER_TICK;
use crate::TICKS_PER_SECOND;
use crate::assets::{AssetError, AssetLibrary, ModelId, ModelVertex};
use crate::bullet::BulletKind;
use crate::events::GameEvent;
use crate::graphics::{RenderFrame, WHITE_TEXTURE};
use crate::input::{Key, MouseButton};
use crate::math;
use crate::player::PlayerId;
use crate::unit::{RenderContext, SpawnableUnit, Unit, UnitBase, UnitId, UpdateContext};

const FORWARD_SPEED: f32 = 3.0;
const ROTATION_SPEED: f32 = PI; // 180°/s
const MUZZLE_SPEED: f32 = 20.0;
const FIRE_INTERVAL_TICKS: u32 = TICKS_PER_SECOND / 10;

const LEFT_BARREL_OFFSET: Vec2 = Vec2::new(-0.2, 1.2);
const RIGHT_BARREL_OFFSET: Vec2 = Vec2::new(0.2, 1.2);

// Below this squared cursor distance the aim direction is meaningless and
// the turret holds the body rotation instead.
const AIM_EPSILON_SQUARED: f32 = 1e-8;

const BODY_MODEL: &str = "twin_via_platelet/body";
const TURRET_MODEL: &str = "twin_via_platelet/turret";

pub struct TwinViaPlatelet {
    base: UnitBase,
    turret_rotation: f32,
    fire_count_down: u32,
    body_model: ModelId,
    turret_model: ModelId,
}

impl SpawnableUnit for TwinViaPlatelet {
    fn spawn(
        assets: &mut AssetLibrary,
        id: UnitId,
        player_id: PlayerId,
        position: Vec2,
    ) -> Result<Self, AssetError> {
        let body_model = assets.get_or_register(BODY_MODEL, body_model)?;
        let turret_model = assets.get_or_register(TURRET_MODEL, turret_model)?;
        let base = UnitBase::new(assets, id, player_id, position)?;
        Ok(Self {
            turret_rotation: base.rotation,
            base,
            fire_count_down: 0,
            body_model,
            turret_model,
        })
    }
}

impl TwinViaPlatelet {
    pub fn turret_rotation(&self) -> f32 {
        self.turret_rotation
    }

    fn drive(&mut self, ctx: &mut UpdateContext) {
        let Some(input) = ctx.input() else {
            return;
        };

        let mut offset = Vec2::ZERO;
        if input.key(Key::W) {
            offset.y += 1.0;
        }
        if input.key(Key::S) {
            offset.y -= 1.0;
        }
        let speed = FORWARD_SPEED * self.base.speed_scale;
        let offset = offset * (SECONDS_PER_TICK * speed);
        let new_position = self.base.position + math::rotate_vector(offset, self.base.rotation);
        if !ctx.is_blocked(new_position) {
            ctx.push_event(GameEvent::MoveUnit {
                unit_id: self.base.id,
                position: new_position,
            });
        }

        let mut rotation_offset = 0.0;
        if input.key(Key::A) {
            rotation_offset += 1.0;
        }
        if input.key(Key::D) {
            rotation_offset -= 1.0;
        }
        rotation_offset *= SECONDS_PER_TICK * ROTATION_SPEED * self.base.speed_scale;
        ctx.push_event(GameEvent::RotateUnit {
            unit_id: self.base.id,
            rotation: self.base.rotation + rotation_offset,
        });
    }

    fn aim(&mut self, ctx: &UpdateContext) {
        let Some(input) = ctx.input() else {
            return;
        };

        let diff = input.cursor_world - self.base.position;
        if diff.length_squared() < AIM_EPSILON_SQUARED {
            self.turret_rotation = self.base.rotation;
        } else {
            self.turret_rotation = diff.y.atan2(diff.x) - FRAC_PI_2;
        }
    }

    fn fire(&mut self, ctx: &mut UpdateContext) {
        if self.fire_count_down == 0 {
            if let Some(input) = ctx.input() {
                if input.mouse(MouseButton::Left) {
                    let velocity =
                        math::rotate_vector(Vec2::new(0.0, MUZZLE_SPEED), self.turret_rotation);
                    for barrel in [LEFT_BARREL_OFFSET, RIGHT_BARREL_OFFSET] {
                        let muzzle =
                            self.base.position + math::rotate_vector(barrel, self.turret_rotation);
                        ctx.fire_bullet(
                            BulletKind::CannonBall,
                            self.base.player_id,
                            muzzle,
                            self.turret_rotation,
                            self.base.damage_scale,
                            velocity,
                        );
                    }
                    self.fire_count_down = FIRE_INTERVAL_TICKS;
                }
            }
        }
        if self.fire_count_down > 0 {
            self.fire_count_down -= 1;
        }
    }
}

impl Unit for TwinViaPlatelet {
    fn base(&self) -> &UnitBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut UnitBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UpdateContext) {
        self.drive(ctx);
        self.aim(ctx);
        self.fire(ctx);
    }

    fn render(&self, frame: &mut RenderFrame, ctx: &RenderContext) {
        frame.set_transformation(self.base.position, self.base.rotation);
        frame.set_texture(WHITE_TEXTURE);
        frame.set_color(ctx.player_color(self.base.player_id));
        frame.draw_model(self.body_model);

        frame.set_rotation(self.turret_rotation);
        frame.draw_model(self.turret_model);

        self.base.render_life_bar(frame);
    }

    fn is_hit(&self, position: Vec2) -> bool {
        let local = self.base.world_to_local(position);
        local.x > -0.8
            && local.x < 0.8
            && local.y > -1.0
            && local.y < 1.0
            && local.x + local.y < 1.6
            && local.y - local.x < 1.6
    }

    fn name(&self) -> &'static str {
        "Twin Via Platelet"
    }

    fn author(&self) -> &'static str {
        "platelet"
    }
}

/// Hull: a rectangle with the two front corners cut off.
fn body_model() -> (Vec<ModelVertex>, Vec<u32>) {
    let white = [1.0, 1.0, 1.0, 1.0];
    let corners = [
        (-0.8, 0.8),
        (-0.8, -1.0),
        (0.8, 0.8),
        (0.8, -1.0),
        (0.6, 1.0),
        (-0.6, 1.0),
    ];
    let vertices = corners
        .into_iter()
        .map(|(x, y)| ModelVertex::colored(Vec2::new(x, y), white))
        .collect();
    (vertices, vec![0, 1, 2, 1, 2, 3, 0, 2, 5, 2, 4, 5])
}

/// Turret: a disc with two barrels side by side.
fn turret_model() -> (Vec<ModelVertex>, Vec<u32>) {
    let gray = [0.7, 0.7, 0.7, 1.0];
    let precision = 60u32;
    let mut vertices = Vec::with_capacity(precision as usize + 9);
    let mut indices = Vec::with_capacity(precision as usize * 3 + 12);

    for i in 0..precision {
        let theta = (i as f32 + 0.5) / precision as f32 * TAU;
        vertices.push(ModelVertex::colored(
            Vec2::new(theta.sin(), theta.cos()) * 0.5,
            gray,
        ));
        indices.extend([i, (i + 1) % precision, precision]);
    }
    vertices.push(ModelVertex::colored(Vec2::ZERO, gray));

    for barrel_x in [-0.2, 0.2] {
        let first = vertices.len() as u32;
        for (x, y) in [(-0.1, 0.0), (0.1, 0.0), (-0.1, 1.2), (0.1, 1.2)] {
            vertices.push(ModelVertex::colored(Vec2::new(x + barrel_x, y), gray));
        }
        indices.extend([first, first + 1, first + 2, first + 1, first + 2, first + 3]);
    }

    (vertices, indices)
}
