//! Orientation helpers.
//!
//! Conventions: +Y is up, +Z is forward, +X is right. A yaw of zero faces +Z
//! and positive yaw turns toward +X.

use glam::{Quat, Vec3};

/// Forward direction of a rotation
#[inline]
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::Z
}

/// Yaw (radians) of a direction projected on the horizontal plane
#[inline]
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Horizontal distance between two points, ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Upright rotation facing along the horizontal part of `direction`.
///
/// Returns `None` when the direction has no horizontal component.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-6 {
        return None;
    }
    Some(Quat::from_rotation_y(yaw_of(flat)))
}

/// Signed horizontal angle (radians) turning `from` onto `to`, in [-PI, PI]
pub fn signed_yaw_angle(from: Vec3, to: Vec3) -> f32 {
    wrap_angle(yaw_of(to) - yaw_of(from))
}

/// Unsigned angle between two vectors (radians)
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let mag_a = a.length();
    let mag_b = b.length();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let cos_angle = (a.dot(b) / (mag_a * mag_b)).clamp(-1.0, 1.0);
    cos_angle.acos()
}

/// Rotate `current` toward `goal` by at most `max_radians`.
///
/// Uses spherical interpolation, so repeated calls turn at a constant
/// angular rate and land exactly on `goal`.
pub fn rotate_towards(current: Quat, goal: Quat, max_radians: f32) -> Quat {
    let dot = current.dot(goal).abs().min(1.0);
    let angle = 2.0 * dot.acos();

    if angle < 1e-6 || angle <= max_radians {
        return goal;
    }
    if max_radians <= 0.0 {
        return current;
    }

    current.slerp(goal, max_radians / angle).normalize()
}

fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};

    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_forward_of_identity() {
        assert_relative_eq!(forward(Quat::IDENTITY).z, 1.0);
        let right = forward(Quat::from_rotation_y(FRAC_PI_2));
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_rotation_ignores_height() {
        let rot = look_rotation(Vec3::new(1.0, 5.0, 0.0)).unwrap();
        let fwd = forward(rot);
        assert_relative_eq!(fwd.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(fwd.y, 0.0, epsilon = 1e-6);

        assert!(look_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn test_signed_yaw_angle() {
        assert_relative_eq!(signed_yaw_angle(Vec3::Z, Vec3::X), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(signed_yaw_angle(Vec3::Z, Vec3::NEG_X), -FRAC_PI_2, epsilon = 1e-6);
        // Crossing the +/-PI seam stays short
        let a = Vec3::new(-0.1, 0.0, -1.0);
        let b = Vec3::new(0.1, 0.0, -1.0);
        assert!(signed_yaw_angle(a, b).abs() < 0.3);
    }

    #[test]
    fn test_angle_between() {
        assert_relative_eq!(angle_between(Vec3::X, Vec3::Z), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(angle_between(Vec3::X, Vec3::NEG_X), PI, epsilon = 1e-6);
        assert_eq!(angle_between(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_rotate_towards_constant_rate() {
        let goal = Quat::from_rotation_y(FRAC_PI_2);
        let step = FRAC_PI_2 / 4.0;

        let mut rot = Quat::IDENTITY;
        for _ in 0..2 {
            rot = rotate_towards(rot, goal, step);
        }
        let yaw = yaw_of(forward(rot));
        assert_relative_eq!(yaw, FRAC_PI_2 / 2.0, epsilon = 1e-4);

        for _ in 0..3 {
            rot = rotate_towards(rot, goal, step);
        }
        assert_eq!(rot, goal);
    }

    #[test]
    fn test_rotate_towards_zero_step_holds() {
        let goal = Quat::from_rotation_y(1.0);
        assert_eq!(rotate_towards(Quat::IDENTITY, goal, 0.0), Quat::IDENTITY);
    }

    #[test]
    fn test_planar_distance() {
        let d = planar_distance(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 10.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }
}
