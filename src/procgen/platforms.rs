//! Chunk-paced platform generation
//!
//! The level is walked left to right in fixed-width chunks. Inside each
//! chunk, candidate platforms are rolled with one of three placement modes
//! (biased toward connected stepping so the level stays traversable on foot)
//! and accepted only if they keep clear of every existing platform and of
//! the start area. A chunk that exhausts its attempt budget is forced
//! forward instead of stalling; sparse chunks are a degraded outcome, not an
//! error.

use glam::Vec2;
use rand::Rng;

use super::entity::{random_direction, Enemy, EnemyKind, EnemyTemplate, Platform};
use super::geom::{dist_sq, overlaps_any_buffered, Rect};
use crate::config::{GenConfig, PLATFORM_BASE_COLOR};

/// Attempt budget per chunk, as a multiple of `max_placement_attempts`
const CHUNK_ATTEMPT_MULTIPLIER: u32 = 4;

/// Ceiling margin for stepped platforms
const STEP_BAND_TOP: f32 = 100.0;
/// Clearance kept above the floor hazard for stepped platforms
const STEP_BAND_FLOOR_MARGIN: f32 = 40.0;
/// Ceiling margin for floating platforms (stricter mid-band)
const FLOAT_BAND_TOP: f32 = 150.0;
/// Clearance kept above the floor hazard for floating platforms
const FLOAT_BAND_FLOOR_MARGIN: f32 = 120.0;

/// A platform must be this many patroller-widths wide to host one
const PATROLLER_PLATFORM_WIDTH_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaceMode {
    StepUp,
    StepDown,
    Float,
}

/// The fixed start platform for a canvas of the given height.
///
/// Sits inside the safe vertical band, above the worst-case hazard crest.
pub fn start_platform(config: &GenConfig, canvas_height: f32) -> Platform {
    let y = canvas_height - config.floor_hazard_height - config.safe_spawn_buffer();
    Platform {
        rect: Rect::new(
            config.start_platform_x,
            y,
            config.start_platform_width,
            config.platform_height,
        ),
        hazard: false,
        color: PLATFORM_BASE_COLOR,
    }
}

/// Generate the full platform set across all chunks, starting from the
/// fixed start platform.
///
/// Ground patrollers are placed opportunistically alongside platform
/// emission (they need a freshly accepted, hazard-free platform) and are
/// returned with the platforms. The returned list always begins with the
/// start platform at index 0.
pub fn generate_platforms<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    canvas_height: f32,
) -> (Vec<Platform>, Vec<Enemy>) {
    let start = start_platform(config, canvas_height);
    let start_center = start.rect.center();

    let mut platforms = vec![start];
    let mut patrollers: Vec<Enemy> = Vec::new();
    let patroller_template = EnemyTemplate::ground_patroller(&config.patroller);

    let mut cursor = platforms[0].rect.right();
    // Y anchor for step placement; only non-floating platforms update it
    let mut last_connected_y = platforms[0].rect.y;

    let step_floor = canvas_height
        - config.floor_hazard_height
        - config.platform_height
        - STEP_BAND_FLOOR_MARGIN;
    let float_floor = canvas_height
        - config.floor_hazard_height
        - config.platform_height
        - FLOAT_BAND_FLOOR_MARGIN;

    let spawn_clear_sq = config.spawn_clear_radius * config.spawn_clear_radius;
    let chunk_budget = config.max_placement_attempts.max(1) * CHUNK_ATTEMPT_MULTIPLIER;

    for chunk in 0..config.num_chunks {
        let chunk_right = (chunk + 1) as f32 * config.chunk_width;
        let mut attempts = 0u32;

        while cursor < chunk_right {
            if attempts >= chunk_budget {
                log::warn!(
                    "chunk {chunk} exhausted {chunk_budget} attempts at x={cursor:.0}, forcing cursor to {chunk_right:.0}"
                );
                cursor = chunk_right;
                break;
            }
            attempts += 1;

            let roll: f32 = rng.random_range(0.0..1.0);
            let mode = if roll < 0.4 {
                PlaceMode::StepUp
            } else if roll < 0.7 {
                PlaceMode::StepDown
            } else {
                PlaceMode::Float
            };

            let width = rng.random_range(config.min_plat_width..=config.max_plat_width);

            let (x, y) = match mode {
                PlaceMode::StepUp | PlaceMode::StepDown => {
                    let x = cursor + rng.random_range(config.step_width_min..=config.step_width_max);
                    let dy = rng.random_range(config.step_height_min..=config.step_height_max);
                    let y = if mode == PlaceMode::StepUp {
                        last_connected_y - dy
                    } else {
                        last_connected_y + dy
                    };
                    (x, y.clamp(STEP_BAND_TOP, step_floor.max(STEP_BAND_TOP)))
                }
                PlaceMode::Float => {
                    let x = cursor
                        + rng.random_range(config.float_sep_x_min..=config.float_sep_x_max);
                    let y = last_connected_y + float_offset_y(rng, config);
                    (x, y.clamp(FLOAT_BAND_TOP, float_floor.max(FLOAT_BAND_TOP)))
                }
            };

            let hazard = width > config.hazard_min_platform_width
                && rng.random_bool(config.hazard_chance);

            let rect = Rect::new(x, y, width, config.platform_height);

            // Strict full-list scan; platform counts are small enough that
            // the windowed variant isn't worth its miss risk.
            if overlaps_any_buffered(
                &rect,
                platforms.iter().map(|p| &p.rect),
                config.platform_buffer,
            ) {
                continue;
            }
            if dist_sq(rect.center(), start_center) < spawn_clear_sq {
                continue;
            }

            platforms.push(Platform {
                rect,
                hazard,
                color: PLATFORM_BASE_COLOR,
            });
            cursor = rect.right();
            if mode != PlaceMode::Float {
                last_connected_y = rect.y;
            }

            maybe_place_patroller(
                rng,
                config,
                &patroller_template,
                &platforms,
                platforms.len() - 1,
                &mut patrollers,
                canvas_height,
            );
        }
    }

    (platforms, patrollers)
}

/// Vertical offset for a floating platform: magnitude between the
/// configured minimum and maximum separation, sign random. The minimum
/// keeps floats from sitting nearly level with the previous platform.
fn float_offset_y<R: Rng>(rng: &mut R, config: &GenConfig) -> f32 {
    let magnitude = rng.random_range(config.float_sep_y_min..=config.float_sep_y_max);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Roll a ground patroller for a freshly accepted platform.
///
/// Requires a hazard-free platform wide enough to walk, a passing spawn
/// roll, and minimum separation from every patroller already placed.
fn maybe_place_patroller<R: Rng>(
    rng: &mut R,
    config: &GenConfig,
    template: &EnemyTemplate,
    platforms: &[Platform],
    platform_index: usize,
    patrollers: &mut Vec<Enemy>,
    canvas_height: f32,
) {
    if patrollers.len() >= config.num_ground_patrollers as usize {
        return;
    }
    let platform = &platforms[platform_index];
    if platform.hazard
        || platform.rect.width < config.patroller.width * PATROLLER_PLATFORM_WIDTH_FACTOR
    {
        return;
    }
    if !rng.random_bool(config.patroller.spawn_chance) {
        return;
    }

    let center = platform.rect.center();
    let pos = Vec2::new(
        center.x - config.patroller.width / 2.0,
        platform.rect.y - config.patroller.height,
    );
    let candidate_origin = pos + template.size / 2.0;
    let min_sep_sq = config.patroller.min_separation * config.patroller.min_separation;
    if patrollers
        .iter()
        .any(|p| dist_sq(p.origin, candidate_origin) < min_sep_sq)
    {
        return;
    }

    let direction = random_direction(rng);
    let enemy = template.spawn(
        rng,
        pos,
        EnemyKind::GroundPatroller {
            direction,
            platform: platform_index,
        },
        canvas_height,
        config.floor_hazard_height,
    );
    log::debug!(
        "ground patroller on platform {platform_index} at ({:.0}, {:.0})",
        pos.x,
        pos.y
    );
    patrollers.push(enemy);
}
