use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Texture slot 0 is the plain white texture, so tinting alone decides the
/// final color.
pub const WHITE_TEXTURE: TextureId = TextureId(0);

/// One recorded draw. The backend replaying these is out of scope here; the
/// frame is the engine's rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub model: ModelId,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub texture: TextureId,
    pub color: [f32; 4],
}

/// Stateful draw recorder mirroring the immediate-mode surface units render
/// against: set transform/texture/color, then draw a registered model.
#[derive(Debug)]
pub struct RenderFrame {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    texture: TextureId,
    color: [f32; 4],
    calls: Vec<DrawCall>,
}

impl Default for RenderFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderFrame {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            texture: WHITE_TEXTURE,
            color: [1.0, 1.0, 1.0, 1.0],
            calls: Vec::new(),
        }
    }

    /// Sets the world transform for subsequent draws. Scale resets to 1.
    pub fn set_transformation(&mut self, position: Vec2, rotation: f32) {
        self.position = position;
        self.rotation = rotation;
        self.scale = Vec2::ONE;
    }

    pub fn set_scaled_transformation(&mut self, position: Vec2, rotation: f32, scale: Vec2) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// Replaces only the rotation, keeping position and scale. Used for
    /// sub-parts layered on a body, like a turret.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    pub fn draw_model(&mut self, model: ModelId) {
        self.calls.push(DrawCall {
            model,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            texture: self.texture,
            color: self.color,
        });
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}
