use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectWall {
    pub min: Vec2,
    pub max: Vec2,
}

impl RectWall {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[derive(EnumIter, EnumString, Copy, Clone, Debug, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum MapName {
    Basic,
    Quarry,
}

/// An arena. World coordinates are centered on the origin; the playable
/// area spans `±width/2 × ±height/2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub width: f32,
    pub height: f32,
    pub walls: Vec<RectWall>,
    pub spawn_points: Vec<Vec2>,
}

impl MapDefinition {
    pub fn load(name: MapName) -> Self {
        match name {
            MapName::Basic => Self {
                width: 24.0,
                height: 24.0,
                walls: vec![
                    // Two mid bars with an open corridor between them.
                    RectWall {
                        min: (-7.0, -0.6).into(),
                        max: (-2.0, 0.6).into(),
                    },
                    RectWall {
                        min: (2.0, -0.6).into(),
                        max: (7.0, 0.6).into(),
                    },
                    RectWall {
                        min: (-9.0, 5.0).into(),
                        max: (-6.0, 6.0).into(),
                    },
                    RectWall {
                        min: (6.0, -6.0).into(),
                        max: (9.0, -5.0).into(),
                    },
                ],
                spawn_points: vec![
                    (0.0, -9.0).into(),
                    (0.0, 9.0).into(),
                    (-9.0, 0.0).into(),
                    (9.0, 0.0).into(),
                ],
            },
            MapName::Quarry => Self {
                width: 30.0,
                height: 18.0,
                walls: vec![
                    RectWall {
                        min: (-10.0, -4.5).into(),
                        max: (-8.5, 4.5).into(),
                    },
                    RectWall {
                        min: (8.5, -4.5).into(),
                        max: (10.0, 4.5).into(),
                    },
                    RectWall {
                        min: (-3.0, -1.0).into(),
                        max: (3.0, 1.0).into(),
                    },
                ],
                spawn_points: vec![
                    (-13.0, 0.0).into(),
                    (13.0, 0.0).into(),
                    (-13.0, 6.0).into(),
                    (13.0, -6.0).into(),
                ],
            },
        }
    }

    /// Obstacle query: true when the point is outside the arena or inside
    /// any wall.
    pub fn is_blocked(&self, point: Vec2) -> bool {
        let half_width = self.width * 0.5;
        let half_height = self.height * 0.5;
        if point.x.abs() > half_width || point.y.abs() > half_height {
            return true;
        }
        self.walls.iter().any(|wall| wall.contains(point))
    }

    /// True when `point` keeps at least `clearance` distance from the arena
    /// edge and every wall.
    fn is_clear(&self, point: Vec2, clearance: f32) -> bool {
        let half_width = self.width * 0.5 - clearance;
        let half_height = self.height * 0.5 - clearance;
        if point.x.abs() > half_width || point.y.abs() > half_height {
            return false;
        }
        self.walls.iter().all(|wall| {
            let expanded = RectWall {
                min: wall.min - Vec2::splat(clearance),
                max: wall.max + Vec2::splat(clearance),
            };
            !expanded.contains(point)
        })
    }
}

/// Finds a free position using random guesses first, then a deterministic
/// grid scan so a crowded arena still resolves.
pub fn find_spawn_position(
    map: &MapDefinition,
    clearance: f32,
    rng: &mut impl Rng,
) -> Option<Vec2> {
    let half_width = map.width * 0.5 - clearance;
    let half_height = map.height * 0.5 - clearance;
    if half_width <= 0.0 || half_height <= 0.0 {
        return None;
    }

    let max_attempts = 10_000;
    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            rng.random_range(-half_width..half_width),
            rng.random_range(-half_height..half_height),
        );
        if map.is_clear(candidate, clearance) {
            return Some(candidate);
        }
    }

    // Step by half the clearance so no clearance-sized gap is skipped.
    let step = clearance * 0.5;
    let mut y = -half_height;
    while y <= half_height {
        let mut x = -half_width;
        while x <= half_width {
            let candidate = Vec2::new(x, y);
            if map.is_clear(candidate, clearance) {
                return Some(candidate);
            }
            x += step;
        }
        y += step;
    }

    None
}
