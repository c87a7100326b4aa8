//! Damage math and hit-detection primitives
//!
//! Everything that decides "did it hit, and for how much" lives here so the
//! formulas are testable without a running simulation.

use glam::Vec2;

/// Reduce raw damage by the target's defense, never below 1. The floor
/// guarantees chip damage regardless of defense stacking.
#[inline]
pub fn resolve_damage(raw: f32, defense: f32) -> f32 {
    (raw - defense).max(1.0)
}

/// Health an attacker recovers from a hit. Computed from the raw (pre-defense)
/// damage; the caller clamps against max health.
#[inline]
pub fn lifesteal_heal(raw: f32, lifesteal_fraction: f32) -> f32 {
    if lifesteal_fraction > 0.0 {
        raw * lifesteal_fraction
    } else {
        0.0
    }
}

/// Point-vs-circle: true if `point` is within `radius` of `center`.
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Point-vs-segment band: true if `point` lies within `half_width` of the
/// segment from `origin` along `dir` (unit vector) of the given `length`.
///
/// Checks both the perpendicular distance to the carrying line and the
/// parametric projection so points beyond either endpoint miss.
pub fn point_near_segment(point: Vec2, origin: Vec2, dir: Vec2, length: f32, half_width: f32) -> bool {
    if length <= 0.0 {
        return false;
    }
    let rel = point - origin;
    let along = rel.dot(dir);
    if along < 0.0 || along > length {
        return false;
    }
    let perp = rel.perp_dot(dir).abs();
    perp <= half_width
}

/// Point-vs-travelling band: true if `point` sits inside the sweep envelope
/// ahead of `front` moving along `dir`, within `depth` along the travel
/// direction and `half_width` of the centerline.
pub fn point_in_band(point: Vec2, front: Vec2, dir: Vec2, depth: f32, half_width: f32) -> bool {
    let rel = point - front;
    let along = rel.dot(dir);
    if along < 0.0 || along > depth {
        return false;
    }
    rel.perp_dot(dir).abs() <= half_width
}

/// Sample points for the orbiting melee weapon: one per weapon copy, evenly
/// spaced angularly around `center` at the orbit radius.
pub fn weapon_sample_points(center: Vec2, base_angle: f32, copies: u32, orbit_radius: f32) -> Vec<Vec2> {
    let copies = copies.max(1);
    let step = std::f32::consts::TAU / copies as f32;
    (0..copies)
        .map(|i| {
            let theta = base_angle + step * i as f32;
            center + Vec2::new(theta.cos(), theta.sin()) * orbit_radius
        })
        .collect()
}
