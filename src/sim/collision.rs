//! Collision tests between the player circle and hazard shapes
//!
//! All tests are strict: touching edges (distance exactly equal to the sum of
//! radii) is not a hit.

use glam::Vec2;

/// Circle vs circle overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Point on (or inside) the axis-aligned rectangle `[min, max]` closest to `p`
#[inline]
pub fn closest_point_on_rect(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    p.clamp(min, max)
}

/// Circle vs axis-aligned rectangle overlap
///
/// Finds the rectangle point nearest the circle center and compares its
/// distance against the radius.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    center.distance(closest_point_on_rect(center, min, max)) < radius
}
