use glam::Vec2;

use crate::unit::UnitId;

/// Movement mutations requested by units during their update.
///
/// Units never write their own position or rotation; they push one of these
/// and the core applies the queue after every unit has updated, so mutation
/// order is stable and validation happens in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    MoveUnit { unit_id: UnitId, position: Vec2 },
    RotateUnit { unit_id: UnitId, rotation: f32 },
}
