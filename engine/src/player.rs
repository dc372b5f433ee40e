use serde::{Deserialize, Serialize};

use crate::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// A participant: owns units, holds the latest input snapshot, and carries
/// the tint color their units and bullets are rendered with.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub color: [f32; 4],
    pub input: InputState,
    pub kills: u32,
}

impl Player {
    pub fn new(id: PlayerId, color: [f32; 4]) -> Self {
        Self {
            id,
            color,
            input: InputState::default(),
            kills: 0,
        }
    }
}

const PALETTE: [[f32; 4]; 6] = [
    [0.2, 0.5, 1.0, 1.0], // blue
    [1.0, 0.3, 0.3, 1.0], // red
    [0.3, 0.9, 0.4, 1.0], // green
    [1.0, 0.8, 0.2, 1.0], // yellow
    [0.8, 0.4, 1.0, 1.0], // purple
    [0.4, 0.9, 0.9, 1.0], // cyan
];

/// Tint for the n-th player to join; cycles once the palette runs out.
pub fn player_color(index: usize) -> [f32; 4] {
    PALETTE[index % PALETTE.len()]
}
