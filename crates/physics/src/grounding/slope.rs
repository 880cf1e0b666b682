//! Slope classification.

use glam::Vec3;

/// Angle in degrees between a surface normal and straight up.
///
/// A zero-magnitude normal reads as 90 degrees, which downstream policy
/// treats as unclimbable.
pub fn slope_degrees(normal: Vec3) -> f32 {
    let up_dot = normal.dot(Vec3::Y).clamp(-1.0, 1.0);
    up_dot.acos().to_degrees()
}

/// Whether a surface normal is beyond the maximum climbable slope.
///
/// Exactly at the limit still passes; the first degree beyond it fails.
/// Non-finite normals are always too steep.
pub fn is_too_steep(normal: Vec3, max_slope_deg: f32) -> bool {
    if !normal.is_finite() {
        return true;
    }
    slope_degrees(normal) > max_slope_deg
}
