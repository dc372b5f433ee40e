//! Replay frame serialization.
//!
//! Snapshots of the battle state are encoded with bincode's standard
//! config; a recorded battle is just the concatenation of its per-tick
//! frames, each length-prefixed by the recorder.

use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode, decode_from_slice, encode_to_vec};
use glam::Vec2;

use crate::bullet::BulletId;
use crate::game::TickId;
use crate::player::PlayerId;
use crate::unit::UnitId;

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct UnitSnapshot {
    #[bincode(with_serde)]
    pub id: UnitId,
    #[bincode(with_serde)]
    pub player_id: PlayerId,
    #[bincode(with_serde)]
    pub position: Vec2,
    pub rotation: f32,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct BulletSnapshot {
    #[bincode(with_serde)]
    pub id: BulletId,
    #[bincode(with_serde)]
    pub owner: PlayerId,
    #[bincode(with_serde)]
    pub position: Vec2,
    #[bincode(with_serde)]
    pub velocity: Vec2,
}

/// Full state of one tick, sufficient to replay a battle visually.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct BattleSnapshot {
    #[bincode(with_serde)]
    pub tick: TickId,
    pub units: Vec<UnitSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
}

fn bincode_config() -> impl bincode::config::Config {
    bincode::config::standard()
}

pub fn encode_snapshot(snapshot: &BattleSnapshot) -> Result<Vec<u8>, EncodeError> {
    encode_to_vec(snapshot, bincode_config())
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<BattleSnapshot, DecodeError> {
    let (snapshot, _) = decode_from_slice(bytes, bincode_config())?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BattleSnapshot {
        BattleSnapshot {
            tick: TickId(1200),
            units: vec![UnitSnapshot {
                id: UnitId(1),
                player_id: PlayerId(1),
                position: Vec2::new(-3.5, 2.0),
                rotation: 0.75,
                health: 80.0,
            }],
            bullets: vec![BulletSnapshot {
                id: BulletId(17),
                owner: PlayerId(1),
                position: Vec2::new(-3.3, 3.2),
                velocity: Vec2::new(0.0, 20.0),
            }],
        }
    }

    #[test]
    fn snapshot_roundtrip() {
        let original = sample();
        let encoded = encode_snapshot(&original).unwrap();
        let decoded = decode_snapshot(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn empty_battle_roundtrip() {
        let original = BattleSnapshot {
            tick: TickId(0),
            units: Vec::new(),
            bullets: Vec::new(),
        };
        let encoded = encode_snapshot(&original).unwrap();
        assert_eq!(decode_snapshot(&encoded).unwrap(), original);
    }

    #[test]
    fn truncated_frames_fail_to_decode() {
        let encoded = encode_snapshot(&sample()).unwrap();
        assert!(decode_snapshot(&encoded[..encoded.len() / 2]).is_err());
    }
}
