//! Level generation module
//!
//! Pure and deterministic: no I/O, no shared state, every random draw comes
//! from the caller's RNG. Bounded-retry loops guarantee termination; failed
//! placements degrade the level instead of erroring.

pub mod entity;
pub mod geom;
pub mod goal;
pub mod level;
pub mod patrol;
pub mod place;
pub mod platforms;

pub use entity::{Enemy, EnemyKind, EnemyState, EnemyTemplate, Goal, Platform, Reward};
pub use geom::{dist_sq, overlaps_any_buffered, Rect};
pub use goal::place_goal;
pub use level::{generate_level, GenMode, GenOptions, Level, LevelGenerator, PlacementReport};
pub use patrol::random_patrol_point;
pub use place::{place_boss, place_flyers, place_rewards, place_serpents, Shortfall};
pub use platforms::{generate_platforms, start_platform};
