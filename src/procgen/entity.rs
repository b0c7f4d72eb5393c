//! Level entity records
//!
//! Everything the generator emits lives here: platforms, rewards, the goal
//! doorway, and the four enemy kinds. Enemies share a common core and carry
//! kind-specific fields in a tagged payload; construction goes through
//! immutable per-kind templates so instances never share mutable defaults.
//!
//! The runtime gameplay loop mutates enemy `state`/position on its own
//! copies; the generator's output is immutable once returned.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::patrol::random_patrol_point;
use crate::config::{BossTuning, FlyerTuning, PatrollerTuning, SerpentTuning};

/// A solid platform. `hazard` marks a cactus-bearing platform the player
/// must not land on carelessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub hazard: bool,
    /// Base body color tag (0xRRGGBB), resolved by the renderer
    pub color: u32,
}

/// The level exit doorway, anchored to a host platform by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    /// Index of the host platform in the level's platform list
    pub platform: usize,
}

/// A collectible orb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub rect: Rect,
    pub collected: bool,
}

/// Initial behavior state handed to the gameplay AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Idle,
    Patrolling,
    Chasing,
    Returning,
    Defeated,
}

/// Kind-specific enemy fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Flying patroller (bat)
    Flyer {
        /// Wing animation phase, randomized so spawns don't flap in sync
        flap_timer: f32,
    },
    /// Walks back and forth on one platform
    GroundPatroller {
        /// +1.0 walking right, -1.0 walking left
        direction: f32,
        /// Index of the platform being walked (arena+index, no aliasing)
        platform: usize,
    },
    /// Serpent hugging the ground near platforms
    Serpent {
        /// Body wave animation phase
        undulation_timer: f32,
        /// +1.0 facing right, -1.0 facing left
        facing: f32,
    },
    /// The giant flyer guarding the goal; at most one per level
    Boss {
        /// Seconds until the next minion wave
        minion_timer: f32,
        /// Minions per wave
        minion_count: u32,
        /// Radius around the boss where minions appear
        minion_radius: f32,
        defeated: bool,
    },
}

/// An enemy instance: shared core plus kind payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Anchor for patrol and leash behavior
    pub origin: Vec2,
    pub patrol_target: Vec2,
    pub patrol_range: f32,
    pub detection_radius: f32,
    pub leash_radius: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub health: u32,
    pub state: EnemyState,
    pub state_timer: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    /// Bounding rectangle at the spawn position
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Immutable per-kind spawn template, derived from config
#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    pub size: Vec2,
    pub patrol_range: f32,
    pub detection_radius: f32,
    pub leash_radius: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub health: u32,
}

impl EnemyTemplate {
    pub fn flyer(tuning: &FlyerTuning) -> Self {
        Self {
            size: Vec2::new(tuning.width, tuning.height),
            patrol_range: tuning.patrol_range,
            detection_radius: tuning.detection_radius,
            leash_radius: tuning.detection_radius * tuning.leash_multiplier,
            chase_speed: tuning.chase_speed,
            patrol_speed: tuning.patrol_speed,
            health: tuning.health,
        }
    }

    pub fn ground_patroller(tuning: &PatrollerTuning) -> Self {
        // Patrollers never leave their platform: no detection or leash
        Self {
            size: Vec2::new(tuning.width, tuning.height),
            patrol_range: 0.0,
            detection_radius: 0.0,
            leash_radius: 0.0,
            chase_speed: tuning.speed,
            patrol_speed: tuning.speed,
            health: tuning.health,
        }
    }

    pub fn serpent(tuning: &SerpentTuning) -> Self {
        Self {
            size: Vec2::new(tuning.width, tuning.height),
            patrol_range: tuning.patrol_range,
            detection_radius: tuning.detection_radius,
            leash_radius: tuning.detection_radius * tuning.leash_multiplier,
            chase_speed: tuning.chase_speed,
            patrol_speed: tuning.patrol_speed,
            health: tuning.health,
        }
    }

    pub fn boss(tuning: &BossTuning) -> Self {
        Self {
            size: Vec2::new(tuning.width, tuning.height),
            patrol_range: tuning.patrol_range,
            detection_radius: tuning.detection_radius,
            leash_radius: tuning.detection_radius * tuning.leash_multiplier,
            chase_speed: tuning.chase_speed,
            patrol_speed: tuning.patrol_speed,
            health: tuning.health,
        }
    }

    /// Instantiate an enemy at `pos` (top-left corner).
    ///
    /// Sets the origin to the spawn center, rolls an initial patrol target,
    /// starts at full health in Idle or Patrolling with equal probability,
    /// and randomizes the state timer so instances desynchronize.
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        pos: Vec2,
        kind: EnemyKind,
        world_height: f32,
        hazard_height: f32,
    ) -> Enemy {
        let origin = pos + self.size / 2.0;
        let patrol_target = if self.patrol_range > 0.0 {
            random_patrol_point(
                rng,
                origin,
                self.patrol_range,
                world_height,
                hazard_height,
                self.size.y,
            )
        } else {
            origin
        };
        let state = if rng.random_bool(0.5) {
            EnemyState::Patrolling
        } else {
            EnemyState::Idle
        };
        Enemy {
            pos,
            size: self.size,
            origin,
            patrol_target,
            patrol_range: self.patrol_range,
            detection_radius: self.detection_radius,
            leash_radius: self.leash_radius,
            chase_speed: self.chase_speed,
            patrol_speed: self.patrol_speed,
            health: self.health,
            state,
            state_timer: rng.random_range(0.0..1.0),
            kind,
        }
    }
}

/// Random animation phase in [0, 1), used for flap/undulation timers
pub fn random_phase<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(0.0..1.0)
}

/// Random facing/walking direction, -1.0 or +1.0
pub fn random_direction<R: Rng>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
