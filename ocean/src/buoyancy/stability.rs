//! Proportional righting torque.
//!
//! The body is nudged toward a target up direction halfway between world up
//! and the local wave normal, so it rides the waves without capsizing.

use bevy::math::Vec3;

/// Blend world up with the wave normal. `blend = 0` is world up, `1` the normal.
pub fn target_up(wave_normal: Vec3, blend: f32) -> Vec3 {
    Vec3::Y.lerp(wave_normal, blend).normalize_or(Vec3::Y)
}

/// Torque rotating `current_up` toward `target_up`.
///
/// Magnitude is `angle_degrees * coefficient` about the unit rotation axis.
/// Returns `None` inside the deadband, so an aligned body never receives a
/// torque.
pub fn stability_torque(
    current_up: Vec3,
    target_up: Vec3,
    coefficient: f32,
    deadband_deg: f32,
) -> Option<Vec3> {
    if coefficient == 0.0 {
        return None;
    }
    let current = current_up.try_normalize()?;
    let target = target_up.try_normalize()?;

    let angle = current.angle_between(target).to_degrees();
    if !angle.is_finite() || angle <= deadband_deg {
        return None;
    }

    // Opposite vectors: any horizontal-ish axis will right the body
    let axis = current
        .cross(target)
        .try_normalize()
        .unwrap_or_else(|| current.any_orthonormal_vector());

    Some(axis * angle * coefficient)
}
