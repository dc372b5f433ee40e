use glam::Vec2;

/// Rotates `v` counter-clockwise by `angle` radians.
pub fn rotate_vector(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Maps a world-space point into the local frame of an object sitting at
/// `origin` with the given rotation.
pub fn world_to_local(point: Vec2, origin: Vec2, rotation: f32) -> Vec2 {
    rotate_vector(point - origin, -rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!(
            (a - b).length() < EPSILON,
            "expected {b:?}, got {a:?} (difference {:?})",
            a - b
        );
    }

    #[test]
    fn rotate_then_rotate_back_is_identity() {
        let v = Vec2::new(3.5, -1.25);
        for angle in [0.0, 0.3, FRAC_PI_2, PI, 2.7, -1.1] {
            let round_trip = rotate_vector(rotate_vector(v, angle), -angle);
            assert_vec2_eq(round_trip, v);
        }
    }

    #[test]
    fn quarter_turn_maps_x_axis_to_y_axis() {
        let rotated = rotate_vector(Vec2::X, FRAC_PI_2);
        assert_vec2_eq(rotated, Vec2::Y);
    }

    #[test]
    fn world_to_local_undoes_the_body_transform() {
        let origin = Vec2::new(4.0, -2.0);
        let rotation = 0.8;
        // A point one unit "forward" of the body should land at local (0, 1).
        let forward = origin + rotate_vector(Vec2::Y, rotation);
        assert_vec2_eq(world_to_local(forward, origin, rotation), Vec2::Y);
    }

    #[test]
    fn world_to_local_of_the_origin_is_zero() {
        let origin = Vec2::new(-7.0, 3.0);
        assert_vec2_eq(world_to_local(origin, origin, 1.9), Vec2::ZERO);
    }
}
