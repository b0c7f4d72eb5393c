//! Patrol target sampling
//!
//! Enemies wander toward randomly chosen points around their spawn origin.
//! The sample is polar (uniform angle, uniform distance) and the Y result is
//! clamped into the safe vertical band so a patrol target never lands inside
//! the floor hazard or above the playfield.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

/// Margin kept from the top of the world and above the hazard surface
const PATROL_EDGE_MARGIN: f32 = 20.0;

/// Pick a random reachable patrol point around `origin`.
///
/// `world_height` is the canvas height, `hazard_height` the floor hazard
/// band, `entity_height` the patrolling entity's own height (kept fully
/// above the hazard). Always returns a valid point; clamping is the only
/// correction applied.
pub fn random_patrol_point<R: Rng>(
    rng: &mut R,
    origin: Vec2,
    range: f32,
    world_height: f32,
    hazard_height: f32,
    entity_height: f32,
) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let distance = rng.random_range(0.0..=range);

    let x = origin.x + angle.cos() * distance;

    let min_y = PATROL_EDGE_MARGIN;
    let max_y = world_height - hazard_height - entity_height - PATROL_EDGE_MARGIN;
    let y = (origin.y + angle.sin() * distance).clamp(min_y, max_y.max(min_y));

    Vec2::new(x, y)
}
