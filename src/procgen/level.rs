//! Level assembly
//!
//! [`LevelGenerator`] runs the placement stages in a fixed sequence and
//! returns a structurally complete [`Level`] in one synchronous call. The
//! only hard failure is the canvas precondition, checked at construction;
//! every later stage degrades by placing fewer entities than requested.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{random_phase, Enemy, EnemyKind, EnemyTemplate, Goal, Platform, Reward};
use super::geom::Rect;
use super::goal::place_goal;
use super::place::{place_boss, place_flyers, place_rewards, place_serpents, Shortfall};
use super::platforms::{generate_platforms, start_platform};
use crate::config::{ConfigError, GenConfig, PLATFORM_BASE_COLOR};

/// Generation mode
///
/// The non-standard modes bypass the procedural algorithm and return fixed
/// hand-authored layouts for external test harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenMode {
    /// Full procedural generation
    #[default]
    Standard,
    /// One platform, no enemies or rewards, double-width end
    EmptyTest,
    /// Four fixed platforms, nothing else; for movement/collision harnesses
    PhysicsTest,
    /// The fixed platforms plus two flyers; for combat harnesses
    CombatTest,
    /// The fixed platforms plus two rewards; for pickup-effect harnesses
    ParticlesTest,
}

/// Options for a single generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenOptions {
    pub mode: GenMode,
}

/// Requested-versus-placed counts for every entity stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementReport {
    pub rewards: Shortfall,
    pub flyers: Shortfall,
    pub ground_patrollers: Shortfall,
    pub serpents: Shortfall,
    pub boss_placed: bool,
}

/// A complete generated level, immutable once returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// All platforms; index 0 is always the start platform
    pub platforms: Vec<Platform>,
    pub rewards: Vec<Reward>,
    pub flyers: Vec<Enemy>,
    pub ground_patrollers: Vec<Enemy>,
    pub serpents: Vec<Enemy>,
    /// At most one boss; `None` is a valid degraded outcome
    pub boss: Option<Enemy>,
    pub goal: Goal,
    /// Index of the start platform (always 0)
    pub start_platform: usize,
    /// Rightmost extent, consumed by camera and completion logic
    pub level_end_x: f32,
    pub report: PlacementReport,
}

impl Level {
    pub fn start(&self) -> &Platform {
        &self.platforms[self.start_platform]
    }
}

/// Builds levels for a fixed canvas size and configuration
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    width: f32,
    height: f32,
    config: GenConfig,
}

impl LevelGenerator {
    /// Validate the canvas precondition and construct a generator.
    pub fn new(width: f32, height: f32, config: GenConfig) -> Result<Self, ConfigError> {
        config.validate(width, height)?;
        log::info!(
            "level generator for {width}x{height}, safe buffer {:.0}",
            config.safe_spawn_buffer()
        );
        Ok(Self {
            width,
            height,
            config,
        })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate one level. Infallible: degraded stages under-fill and are
    /// recorded in the report, never surfaced as errors.
    pub fn generate<R: Rng>(&self, rng: &mut R, options: &GenOptions) -> Level {
        match options.mode {
            GenMode::Standard => self.standard_level(rng),
            GenMode::EmptyTest => self.empty_test_level(),
            mode => self.fixed_test_level(rng, mode),
        }
    }

    fn standard_level<R: Rng>(&self, rng: &mut R) -> Level {
        let config = &self.config;

        let (platforms, ground_patrollers) = generate_platforms(rng, config, self.height);
        let goal = place_goal(rng, config, &platforms);
        let (rewards, reward_shortfall) = place_rewards(rng, config, &platforms, &goal);
        let (flyers, flyer_shortfall) = place_flyers(rng, config, &platforms, &goal, self.height);
        let (serpents, serpent_shortfall) =
            place_serpents(rng, config, &platforms, &goal, self.height);
        let boss = place_boss(rng, config, &platforms, &goal, self.height);

        let nominal_end = config.num_chunks as f32 * config.chunk_width;
        let goal_host_right = platforms[goal.platform].rect.right();
        let level_end_x = nominal_end.max(goal_host_right + config.level_end_margin);

        let report = PlacementReport {
            rewards: reward_shortfall,
            flyers: flyer_shortfall,
            ground_patrollers: Shortfall {
                requested: config.num_ground_patrollers,
                placed: ground_patrollers.len() as u32,
            },
            serpents: serpent_shortfall,
            boss_placed: boss.is_some(),
        };

        log::info!(
            "level: {} platforms, {} rewards, {} flyers, {} patrollers, {} serpents, boss={}, end_x={:.0}",
            platforms.len(),
            rewards.len(),
            flyers.len(),
            ground_patrollers.len(),
            serpents.len(),
            report.boss_placed,
            level_end_x
        );

        Level {
            platforms,
            rewards,
            flyers,
            ground_patrollers,
            serpents,
            boss,
            goal,
            start_platform: 0,
            level_end_x,
            report,
        }
    }

    /// Degenerate fixed level used by external test harnesses.
    fn empty_test_level(&self) -> Level {
        let config = &self.config;
        let start = start_platform(config, self.height);
        let level_end_x = self.width * 2.0;
        let goal = Goal {
            rect: Rect::new(
                level_end_x - config.level_end_margin,
                100.0,
                config.goal_width,
                config.goal_height,
            ),
            platform: 0,
        };
        Level {
            platforms: vec![start],
            rewards: Vec::new(),
            flyers: Vec::new(),
            ground_patrollers: Vec::new(),
            serpents: Vec::new(),
            boss: None,
            goal,
            start_platform: 0,
            level_end_x,
            report: PlacementReport::default(),
        }
    }

    /// Fixed four-platform layouts for the physics, combat, and particle
    /// test harnesses. Only the entity dressing differs between modes.
    fn fixed_test_level<R: Rng>(&self, rng: &mut R, mode: GenMode) -> Level {
        let config = &self.config;
        let (w, h) = (self.width, self.height);
        let plat = |x: f32, y: f32, width: f32| Platform {
            rect: Rect::new(x, y, width, config.platform_height),
            hazard: false,
            color: PLATFORM_BASE_COLOR,
        };
        let platforms = vec![
            plat(100.0, h - 150.0, 300.0),
            plat(w / 2.0 - 150.0, h - 300.0, 300.0),
            plat(w - 350.0, h - 200.0, 250.0),
            plat(150.0, h - 400.0, 200.0),
        ];

        let level_end_x = w * 1.5;
        let goal = Goal {
            rect: Rect::new(
                level_end_x - config.level_end_margin,
                100.0,
                config.goal_width,
                config.goal_height,
            ),
            platform: 0,
        };

        let mut flyers = Vec::new();
        let mut rewards = Vec::new();
        match mode {
            GenMode::CombatTest => {
                let template = EnemyTemplate::flyer(&config.flyer);
                for pos in [
                    Vec2::new(w / 2.0, h - 350.0),
                    Vec2::new(w - 250.0, h - 250.0),
                ] {
                    let flap_timer = random_phase(rng);
                    flyers.push(template.spawn(
                        rng,
                        pos,
                        EnemyKind::Flyer { flap_timer },
                        h,
                        config.floor_hazard_height,
                    ));
                }
            }
            GenMode::ParticlesTest => {
                for (x, y) in [(w / 2.0 - 20.0, h - 350.0), (w - 250.0, h - 250.0)] {
                    rewards.push(Reward {
                        rect: Rect::new(x, y, config.reward_size, config.reward_size),
                        collected: false,
                    });
                }
            }
            _ => {}
        }

        let report = PlacementReport {
            rewards: Shortfall {
                requested: rewards.len() as u32,
                placed: rewards.len() as u32,
            },
            flyers: Shortfall {
                requested: flyers.len() as u32,
                placed: flyers.len() as u32,
            },
            ..PlacementReport::default()
        };

        Level {
            platforms,
            rewards,
            flyers,
            ground_patrollers: Vec::new(),
            serpents: Vec::new(),
            boss: None,
            goal,
            start_platform: 0,
            level_end_x,
            report,
        }
    }
}

/// One-call convenience entry point: seed a PCG stream and generate.
pub fn generate_level(
    canvas_width: f32,
    canvas_height: f32,
    seed: u64,
    config: &GenConfig,
    options: &GenOptions,
) -> Result<Level, ConfigError> {
    let generator = LevelGenerator::new(canvas_width, canvas_height, config.clone())?;
    let mut rng = Pcg32::seed_from_u64(seed);
    Ok(generator.generate(&mut rng, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procgen::geom::dist_sq;

    const CANVAS_W: f32 = 1280.0;
    const CANVAS_H: f32 = 720.0;

    fn default_level(seed: u64) -> Level {
        let _ = env_logger::builder().is_test(true).try_init();
        generate_level(
            CANVAS_W,
            CANVAS_H,
            seed,
            &GenConfig::default(),
            &GenOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_standard_scenario_1280x720() {
        let config = GenConfig::default();
        let level = default_level(4242);

        assert_eq!(level.start().rect.x, 50.0);
        assert!(level.level_end_x >= 10.0 * CANVAS_W);

        // Counts never exceed targets
        assert!(level.rewards.len() as u32 <= config.num_rewards);
        assert!(level.flyers.len() as u32 <= config.num_flyers);
        assert!(level.serpents.len() as u32 <= config.num_serpents);
        assert!(level.ground_patrollers.len() as u32 <= config.num_ground_patrollers);

        // Goal is anchored to a real platform and clear of the others
        let host = &level.platforms[level.goal.platform];
        assert_eq!(level.goal.rect.bottom(), host.rect.y);
        for (i, p) in level.platforms.iter().enumerate() {
            if i != level.goal.platform {
                assert!(!level.goal.rect.overlaps(&p.rect.inflated(-5.0)));
            }
        }
    }

    #[test]
    fn test_report_matches_lists() {
        let level = default_level(17);
        assert_eq!(level.report.rewards.placed as usize, level.rewards.len());
        assert_eq!(level.report.flyers.placed as usize, level.flyers.len());
        assert_eq!(
            level.report.serpents.placed as usize,
            level.serpents.len()
        );
        assert_eq!(level.report.boss_placed, level.boss.is_some());
    }

    #[test]
    fn test_enemy_spawns_outside_exclusion_zones() {
        let config = GenConfig::default();
        let level = default_level(300);
        let start_center = level.start().rect.center();
        let goal_center = level.goal.rect.center();

        let flyer_start = config.spawn_clear_radius * config.flyer.start_clear_multiplier;
        let flyer_exit = config.exit_clear_radius * config.flyer.exit_clear_multiplier;
        for f in &level.flyers {
            assert!(dist_sq(f.rect().center(), start_center) > flyer_start * flyer_start);
            assert!(dist_sq(f.rect().center(), goal_center) > flyer_exit * flyer_exit);
        }

        let serpent_start = config.spawn_clear_radius * config.serpent.start_clear_multiplier;
        let serpent_exit = config.exit_clear_radius * config.serpent.exit_clear_multiplier;
        for s in &level.serpents {
            assert!(dist_sq(s.rect().center(), start_center) > serpent_start * serpent_start);
            assert!(dist_sq(s.rect().center(), goal_center) > serpent_exit * serpent_exit);
        }
    }

    #[test]
    fn test_determinism_same_seed_same_level() {
        let a = default_level(987654);
        let b = default_level(987654);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = default_level(1);
        let b = default_level(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_test_mode() {
        let level = generate_level(
            CANVAS_W,
            CANVAS_H,
            0,
            &GenConfig::default(),
            &GenOptions {
                mode: GenMode::EmptyTest,
            },
        )
        .unwrap();
        assert_eq!(level.platforms.len(), 1);
        assert!(level.rewards.is_empty());
        assert!(level.flyers.is_empty());
        assert!(level.ground_patrollers.is_empty());
        assert!(level.serpents.is_empty());
        assert!(level.boss.is_none());
        assert_eq!(level.level_end_x, 2.0 * CANVAS_W);
    }

    fn mode_level(mode: GenMode) -> Level {
        generate_level(
            CANVAS_W,
            CANVAS_H,
            0,
            &GenConfig::default(),
            &GenOptions { mode },
        )
        .unwrap()
    }

    #[test]
    fn test_physics_test_mode() {
        let level = mode_level(GenMode::PhysicsTest);
        assert_eq!(level.platforms.len(), 4);
        assert_eq!(level.platforms[0].rect.x, 100.0);
        assert!(level.rewards.is_empty());
        assert!(level.flyers.is_empty());
        assert!(level.serpents.is_empty());
        assert!(level.ground_patrollers.is_empty());
        assert!(level.boss.is_none());
        assert_eq!(level.level_end_x, 1.5 * CANVAS_W);
    }

    #[test]
    fn test_combat_test_mode() {
        let level = mode_level(GenMode::CombatTest);
        assert_eq!(level.platforms.len(), 4);
        assert_eq!(level.flyers.len(), 2);
        for f in &level.flyers {
            assert!(matches!(f.kind, EnemyKind::Flyer { .. }));
        }
        assert!(level.rewards.is_empty());
        assert_eq!(level.report.flyers.placed, 2);
        assert!(level.report.flyers.is_complete());
    }

    #[test]
    fn test_particles_test_mode() {
        let level = mode_level(GenMode::ParticlesTest);
        assert_eq!(level.platforms.len(), 4);
        assert_eq!(level.rewards.len(), 2);
        assert!(level.rewards.iter().all(|r| !r.collected));
        assert!(level.flyers.is_empty());
        assert_eq!(level.report.rewards.placed, 2);
    }

    #[test]
    fn test_fixed_platforms_keep_spacing() {
        let config = GenConfig::default();
        let level = mode_level(GenMode::PhysicsTest);
        for i in 0..level.platforms.len() {
            for j in (i + 1)..level.platforms.len() {
                let a = &level.platforms[i].rect;
                let b = &level.platforms[j].rect;
                assert!(!a.overlaps(&b.inflated(config.platform_buffer)));
            }
        }
    }

    #[test]
    fn test_single_attempt_budget_still_valid() {
        let config = GenConfig {
            max_placement_attempts: 1,
            max_reward_placement_attempts: 1,
            ..GenConfig::default()
        };
        let level = generate_level(CANVAS_W, CANVAS_H, 5, &config, &GenOptions::default()).unwrap();
        assert!(!level.platforms.is_empty());
        assert!(level.level_end_x >= config.num_chunks as f32 * config.chunk_width);
        // Sparse but structurally complete
        assert!(level.goal.platform < level.platforms.len());
    }

    #[test]
    fn test_tiny_canvas_is_config_error() {
        let err = generate_level(
            300.0,
            180.0,
            0,
            &GenConfig::default(),
            &GenOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::CanvasTooSmall { .. }));
    }

    // The save system persists generated levels as JSON; keep the record
    // serializable end to end.
    #[test]
    fn test_level_survives_save_payload() {
        let level = default_level(777);
        let payload = serde_json::to_string(&level).unwrap();
        let restored: Level = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored.platforms.len(), level.platforms.len());
        assert_eq!(restored.goal, level.goal);
        assert_eq!(restored.report, level.report);
    }
}
