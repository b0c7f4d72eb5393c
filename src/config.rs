//! Generator configuration
//!
//! Every tunable the generator reads lives in [`GenConfig`], passed in
//! explicitly by the embedding game rather than pulled from ambient
//! constants. Defaults reproduce the shipped game's balance; tests override
//! individual fields (tiny worlds, zero enemy counts, one-attempt budgets).

use serde::{Deserialize, Serialize};

/// Default platform body color (sandy tan), 0xRRGGBB
pub const PLATFORM_BASE_COLOR: u32 = 0xD2B48C;

/// Per-kind tuning for the flying patroller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerTuning {
    pub width: f32,
    pub height: f32,
    pub patrol_range: f32,
    pub detection_radius: f32,
    pub leash_multiplier: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub health: u32,
    /// Minimum clearance kept between two flyers at spawn
    pub separation_buffer: f32,
    /// Multiplier on `spawn_clear_radius` for the start exclusion zone
    pub start_clear_multiplier: f32,
    /// Multiplier on `exit_clear_radius` for the goal exclusion zone
    pub exit_clear_multiplier: f32,
}

impl Default for FlyerTuning {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 15.0,
            patrol_range: 200.0,
            detection_radius: 400.0,
            leash_multiplier: 1.6,
            chase_speed: 80.0,
            patrol_speed: 48.0,
            health: 1,
            separation_buffer: 10.0,
            start_clear_multiplier: 2.0,
            exit_clear_multiplier: 1.0,
        }
    }
}

/// Per-kind tuning for the ground patroller (placed during chunk generation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrollerTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    /// Chance rolled per accepted platform to host a patroller
    pub spawn_chance: f64,
    /// Minimum center-to-center distance between two patrollers
    pub min_separation: f32,
}

impl Default for PatrollerTuning {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 60.0,
            speed: 90.0,
            health: 2,
            spawn_chance: 0.25,
            min_separation: 400.0,
        }
    }
}

/// Per-kind tuning for the serpent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpentTuning {
    pub width: f32,
    pub height: f32,
    pub patrol_range: f32,
    pub detection_radius: f32,
    pub leash_multiplier: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub health: u32,
    /// Loosest of the separation buffers, keeps serpents from clustering
    pub separation_buffer: f32,
    pub start_clear_multiplier: f32,
    pub exit_clear_multiplier: f32,
}

impl Default for SerpentTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 20.0,
            patrol_range: 250.0,
            detection_radius: 350.0,
            leash_multiplier: 1.4,
            chase_speed: 90.0,
            patrol_speed: 60.0,
            health: 3,
            separation_buffer: 60.0,
            start_clear_multiplier: 1.5,
            exit_clear_multiplier: 0.8,
        }
    }
}

/// Per-kind tuning for the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    pub patrol_range: f32,
    pub detection_radius: f32,
    pub leash_multiplier: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub health: u32,
    /// Large platform clearance so the boss arena stays open
    pub platform_buffer: f32,
    /// Seconds between minion spawn waves
    pub minion_spawn_interval: f32,
    /// Minions per spawn wave
    pub minion_spawn_count: u32,
    /// Radius around the boss where minions appear
    pub minion_spawn_radius: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 50.0,
            patrol_range: 300.0,
            detection_radius: 550.0,
            leash_multiplier: 1.8,
            chase_speed: 95.0,
            patrol_speed: 55.0,
            health: 20,
            platform_buffer: 40.0,
            minion_spawn_interval: 15.0,
            minion_spawn_count: 2,
            minion_spawn_radius: 200.0,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    // Chunking
    pub chunk_width: f32,
    pub num_chunks: u32,

    // Platforms
    pub platform_height: f32,
    pub platform_buffer: f32,
    pub min_plat_width: f32,
    pub max_plat_width: f32,
    pub start_platform_x: f32,
    pub start_platform_width: f32,

    // Stepped placement
    pub step_height_min: f32,
    pub step_height_max: f32,
    pub step_width_min: f32,
    pub step_width_max: f32,

    // Floating placement
    pub float_sep_x_min: f32,
    pub float_sep_x_max: f32,
    pub float_sep_y_min: f32,
    pub float_sep_y_max: f32,

    // Platform hazards (cacti) and the floor hazard band (lava)
    pub hazard_chance: f64,
    pub hazard_min_platform_width: f32,
    pub floor_hazard_height: f32,
    pub floor_wave_height: f32,

    // Exclusion radii
    pub spawn_clear_radius: f32,
    pub reward_clear_radius: f32,
    pub exit_clear_radius: f32,

    // Attempt ceilings
    pub max_placement_attempts: u32,
    pub max_reward_placement_attempts: u32,

    // Entity counts
    pub num_rewards: u32,
    pub num_flyers: u32,
    pub num_ground_patrollers: u32,
    pub num_serpents: u32,

    // Rewards
    pub reward_size: f32,
    pub reward_buffer: f32,

    // Goal doorway
    pub goal_width: f32,
    pub goal_height: f32,
    pub level_end_margin: f32,

    // Enemy tuning
    pub flyer: FlyerTuning,
    pub patroller: PatrollerTuning,
    pub serpent: SerpentTuning,
    pub boss: BossTuning,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            chunk_width: 1280.0,
            num_chunks: 10,
            platform_height: 20.0,
            platform_buffer: 30.0,
            min_plat_width: 100.0,
            max_plat_width: 250.0,
            start_platform_x: 50.0,
            start_platform_width: 200.0,
            step_height_min: 40.0,
            step_height_max: 80.0,
            step_width_min: 100.0,
            step_width_max: 180.0,
            float_sep_x_min: 80.0,
            float_sep_x_max: 200.0,
            float_sep_y_min: 50.0,
            float_sep_y_max: 120.0,
            hazard_chance: 0.30,
            hazard_min_platform_width: 150.0,
            floor_hazard_height: 80.0,
            floor_wave_height: 25.0,
            spawn_clear_radius: 120.0,
            reward_clear_radius: 100.0,
            exit_clear_radius: 150.0,
            max_placement_attempts: 25,
            max_reward_placement_attempts: 25,
            num_rewards: 3,
            num_flyers: 10,
            num_ground_patrollers: 4,
            num_serpents: 6,
            reward_size: 30.0,
            reward_buffer: 15.0,
            goal_width: 80.0,
            goal_height: 120.0,
            level_end_margin: 200.0,
            flyer: FlyerTuning::default(),
            patroller: PatrollerTuning::default(),
            serpent: SerpentTuning::default(),
            boss: BossTuning::default(),
        }
    }
}

impl GenConfig {
    /// Vertical clearance kept above the floor hazard for spawn placement:
    /// worst-case wave crest plus room for the player.
    pub fn safe_spawn_buffer(&self) -> f32 {
        self.floor_wave_height * 1.5 + 100.0
    }

    /// Check that a canvas of the given size can host the start platform
    /// inside the safe vertical band. This is the generator's only hard
    /// failure mode; everything past it degrades gracefully.
    pub fn validate(&self, canvas_width: f32, canvas_height: f32) -> Result<(), ConfigError> {
        let band_top = self.platform_height;
        let band_bottom = canvas_height - self.floor_hazard_height - self.safe_spawn_buffer();
        if band_bottom <= band_top {
            return Err(ConfigError::CanvasTooSmall {
                width: canvas_width,
                height: canvas_height,
            });
        }
        if self.start_platform_x + self.start_platform_width > canvas_width {
            return Err(ConfigError::CanvasTooSmall {
                width: canvas_width,
                height: canvas_height,
            });
        }
        Ok(())
    }
}

/// Precondition violations reported to the caller instead of patched over
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Canvas cannot fit the start platform inside the safe vertical band
    CanvasTooSmall { width: f32, height: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::CanvasTooSmall { width, height } => write!(
                f,
                "canvas {width}x{height} too small for the start platform safe band"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates_at_720p() {
        let config = GenConfig::default();
        assert!(config.validate(1280.0, 720.0).is_ok());
    }

    #[test]
    fn test_tiny_canvas_rejected() {
        let config = GenConfig::default();
        let err = config.validate(1280.0, 200.0).unwrap_err();
        assert!(matches!(err, ConfigError::CanvasTooSmall { .. }));
    }

    #[test]
    fn test_narrow_canvas_rejected() {
        let config = GenConfig::default();
        assert!(config.validate(100.0, 720.0).is_err());
    }
}
