//! Bounded-retry entity placement
//!
//! Rewards, flyers, serpents, and the boss all share one retry shape: pick a
//! random anchor platform, derive a candidate position from type-specific
//! offsets, then run the exclusion checks (start/goal clear radii, buffered
//! platform overlap, same-type separation). Exhausting the attempt ceiling
//! is not an error; the level ships with fewer entities and the shortfall is
//! logged and reported.

use glam::Vec2;
use rand::Rng;

use super::entity::{
    random_direction, random_phase, Enemy, EnemyKind, EnemyTemplate, Goal, Platform, Reward,
};
use super::geom::{dist_sq, overlaps_any_buffered, Rect};
use crate::config::GenConfig;

/// Platform clearance for rewards and flyers; serpents deliberately use
/// none so they can nestle against their host platform.
const REWARD_PLATFORM_BUFFER: f32 = 10.0;
const FLYER_PLATFORM_BUFFER: f32 = 10.0;

/// Margin from the top of the world for clamped spawns
const SPAWN_TOP_MARGIN: f32 = 20.0;

/// Requested-versus-placed count for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Shortfall {
    pub requested: u32,
    pub placed: u32,
}

impl Shortfall {
    pub fn is_complete(&self) -> bool {
        self.placed >= self.requested
    }
}

fn clamp_spawn_y(config: &GenConfig, canvas_height: f32, y: f32, entity_height: f32) -> f32 {
    let max_y =
        canvas_height - config.floor_hazard_height - config.floor_wave_height - entity_height;
    y.clamp(SPAWN_TOP_MARGIN, max_y.max(SPAWN_TOP_MARGIN))
}

/// Place up to `num_rewards` collectibles on platforms other than the start
/// and goal hosts.
pub fn place_rewards<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    platforms: &[Platform],
    goal: &Goal,
) -> (Vec<Reward>, Shortfall) {
    let target = config.num_rewards;
    let mut rewards: Vec<Reward> = Vec::with_capacity(target as usize);
    let clear_sq = config.reward_clear_radius * config.reward_clear_radius;
    let start_center = platforms[0].rect.center();
    let goal_center = goal.rect.center();

    let ceiling = config.max_reward_placement_attempts.max(1) * target;
    let mut attempts = 0u32;
    while (rewards.len() as u32) < target && attempts < ceiling {
        attempts += 1;
        if platforms.len() < 2 {
            break;
        }
        let index = rng.random_range(1..platforms.len());
        if index == goal.platform {
            continue;
        }
        let plat = &platforms[index].rect;

        let max_x = (plat.right() - config.reward_size).max(plat.x);
        let x = rng.random_range(plat.x..=max_x);
        let y = plat.y - config.reward_size - rng.random_range(20.0..=60.0);
        let rect = Rect::new(x, y, config.reward_size, config.reward_size);

        if dist_sq(rect.center(), start_center) <= clear_sq
            || dist_sq(rect.center(), goal_center) <= clear_sq
        {
            continue;
        }
        if overlaps_any_buffered(
            &rect,
            platforms.iter().map(|p| &p.rect),
            REWARD_PLATFORM_BUFFER,
        ) {
            continue;
        }
        if overlaps_any_buffered(
            &rect,
            rewards.iter().map(|r| &r.rect),
            config.reward_buffer,
        ) {
            continue;
        }

        rewards.push(Reward {
            rect,
            collected: false,
        });
    }

    let shortfall = Shortfall {
        requested: target,
        placed: rewards.len() as u32,
    };
    if !shortfall.is_complete() {
        log::warn!(
            "placed {}/{} rewards after {attempts} attempts",
            shortfall.placed,
            shortfall.requested
        );
    }
    (rewards, shortfall)
}

/// Place up to `num_flyers` flying patrollers well above and beside
/// platforms.
pub fn place_flyers<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    platforms: &[Platform],
    goal: &Goal,
    canvas_height: f32,
) -> (Vec<Enemy>, Shortfall) {
    let template = EnemyTemplate::flyer(&config.flyer);
    let target = config.num_flyers;
    let mut flyers: Vec<Enemy> = Vec::with_capacity(target as usize);

    let start_clear = config.spawn_clear_radius * config.flyer.start_clear_multiplier;
    let exit_clear = config.exit_clear_radius * config.flyer.exit_clear_multiplier;
    let start_clear_sq = start_clear * start_clear;
    let exit_clear_sq = exit_clear * exit_clear;
    let start_center = platforms[0].rect.center();
    let goal_center = goal.rect.center();

    let ceiling = config.max_placement_attempts.max(1) * target;
    let mut attempts = 0u32;
    while (flyers.len() as u32) < target && attempts < ceiling {
        attempts += 1;
        let plat = &platforms[rng.random_range(0..platforms.len())].rect;

        let center_x = plat.center().x + rng.random_range(-150.0..=150.0);
        let y = clamp_spawn_y(
            config,
            canvas_height,
            plat.y - rng.random_range(80.0..=200.0),
            template.size.y,
        );
        let pos = Vec2::new(center_x - template.size.x / 2.0, y);
        let rect = Rect::new(pos.x, pos.y, template.size.x, template.size.y);

        if dist_sq(rect.center(), start_center) <= start_clear_sq
            || dist_sq(rect.center(), goal_center) <= exit_clear_sq
        {
            continue;
        }
        if overlaps_any_buffered(
            &rect,
            platforms.iter().map(|p| &p.rect),
            FLYER_PLATFORM_BUFFER,
        ) {
            continue;
        }
        let occupied: Vec<Rect> = flyers.iter().map(|f| f.rect()).collect();
        if overlaps_any_buffered(&rect, &occupied, config.flyer.separation_buffer) {
            continue;
        }

        let flap_timer = random_phase(rng);
        flyers.push(template.spawn(
            rng,
            pos,
            EnemyKind::Flyer { flap_timer },
            canvas_height,
            config.floor_hazard_height,
        ));
    }

    let shortfall = Shortfall {
        requested: target,
        placed: flyers.len() as u32,
    };
    if !shortfall.is_complete() {
        log::warn!(
            "placed {}/{} flyers after {attempts} attempts",
            shortfall.placed,
            shortfall.requested
        );
    }
    (flyers, shortfall)
}

/// Place up to `num_serpents` serpents nestled just above platforms.
pub fn place_serpents<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    platforms: &[Platform],
    goal: &Goal,
    canvas_height: f32,
) -> (Vec<Enemy>, Shortfall) {
    let template = EnemyTemplate::serpent(&config.serpent);
    let target = config.num_serpents;
    let mut serpents: Vec<Enemy> = Vec::with_capacity(target as usize);

    let start_clear = config.spawn_clear_radius * config.serpent.start_clear_multiplier;
    let exit_clear = config.exit_clear_radius * config.serpent.exit_clear_multiplier;
    let start_clear_sq = start_clear * start_clear;
    let exit_clear_sq = exit_clear * exit_clear;
    let start_center = platforms[0].rect.center();
    let goal_center = goal.rect.center();

    let ceiling = config.max_placement_attempts.max(1) * target;
    let mut attempts = 0u32;
    while (serpents.len() as u32) < target && attempts < ceiling {
        attempts += 1;
        if platforms.len() < 2 {
            break;
        }
        let index = rng.random_range(1..platforms.len());
        if index == goal.platform {
            continue;
        }
        let plat = &platforms[index].rect;

        let max_x = (plat.right() - template.size.x).max(plat.x);
        let x = rng.random_range(plat.x..=max_x);
        // Close above the host platform; serpents hug the ground
        let y = plat.y - template.size.y - rng.random_range(4.0..=16.0);
        let pos = Vec2::new(x, y);
        let rect = Rect::new(pos.x, pos.y, template.size.x, template.size.y);

        if dist_sq(rect.center(), start_center) <= start_clear_sq
            || dist_sq(rect.center(), goal_center) <= exit_clear_sq
        {
            continue;
        }
        // Plain (unbuffered) platform check: nestling close is the point
        if overlaps_any_buffered(&rect, platforms.iter().map(|p| &p.rect), 0.0) {
            continue;
        }
        let occupied: Vec<Rect> = serpents.iter().map(|s| s.rect()).collect();
        if overlaps_any_buffered(&rect, &occupied, config.serpent.separation_buffer) {
            continue;
        }

        let undulation_timer = random_phase(rng);
        let facing = random_direction(rng);
        serpents.push(template.spawn(
            rng,
            pos,
            EnemyKind::Serpent {
                undulation_timer,
                facing,
            },
            canvas_height,
            config.floor_hazard_height,
        ));
    }

    let shortfall = Shortfall {
        requested: target,
        placed: serpents.len() as u32,
    };
    if !shortfall.is_complete() {
        log::warn!(
            "placed {}/{} serpents after {attempts} attempts",
            shortfall.placed,
            shortfall.requested
        );
    }
    (serpents, shortfall)
}

/// Place at most one boss near the goal.
///
/// Candidates that clip a platform (large buffer) or the goal doorway are
/// rejected; exhausting the budget leaves the level bossless, which is a
/// valid degraded outcome.
pub fn place_boss<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    platforms: &[Platform],
    goal: &Goal,
    canvas_height: f32,
) -> Option<Enemy> {
    let template = EnemyTemplate::boss(&config.boss);
    let goal_center = goal.rect.center();

    for _ in 0..config.max_placement_attempts.max(1) {
        let center_x = goal_center.x + rng.random_range(-300.0..=300.0);
        let y = clamp_spawn_y(
            config,
            canvas_height,
            goal.rect.y - rng.random_range(150.0..=300.0),
            template.size.y,
        );
        let pos = Vec2::new(center_x - template.size.x / 2.0, y);
        let rect = Rect::new(pos.x, pos.y, template.size.x, template.size.y);

        if overlaps_any_buffered(
            &rect,
            platforms.iter().map(|p| &p.rect),
            config.boss.platform_buffer,
        ) {
            continue;
        }
        if rect.overlaps(&goal.rect) {
            continue;
        }

        return Some(template.spawn(
            rng,
            pos,
            EnemyKind::Boss {
                minion_timer: config.boss.minion_spawn_interval,
                minion_count: config.boss.minion_spawn_count,
                minion_radius: config.boss.minion_spawn_radius,
                defeated: false,
            },
            canvas_height,
            config.floor_hazard_height,
        ));
    }

    log::warn!("boss unplaceable near goal, level ships without one");
    None
}
