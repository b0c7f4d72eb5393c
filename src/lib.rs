//! Carpet Levelgen - procedural levels for a magic-carpet platformer
//!
//! Core modules:
//! - `config`: explicit generator configuration and the precondition error
//! - `procgen`: the generator itself (geometry, chunked platforms, entity
//!   placers, goal placement, level assembly)
//!
//! The generator is synchronous and deterministic: given the same seed and
//! configuration it produces structurally identical levels. It performs no
//! I/O; rendering, gameplay AI, and persistence are external consumers of
//! the [`procgen::Level`] record.

pub mod config;
pub mod procgen;

pub use config::{ConfigError, GenConfig};
pub use procgen::{generate_level, GenMode, GenOptions, Level, LevelGenerator};
