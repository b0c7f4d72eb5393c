//! Goal doorway placement
//!
//! The exit is anchored to an end-of-level platform drawn from the last
//! fifth of the platform list. Placement can only "fail" into a
//! deterministic fallback: if the centered doorway clips a neighboring
//! platform it slides to the host's right edge instead.

use rand::Rng;

use super::entity::{Goal, Platform};
use super::geom::{overlaps_any_buffered, Rect};
use crate::config::GenConfig;

/// Slightly negative buffer: a few pixels of visual overlap with a
/// neighboring platform is tolerated before the fallback kicks in.
const GOAL_OVERLAP_TOLERANCE: f32 = -5.0;

/// Choose the end platform and position the goal doorway on it.
///
/// `platforms` must be non-empty; index 0 is the start platform.
pub fn place_goal<R: Rng>(rng: &mut R, config: &GenConfig, platforms: &[Platform]) -> Goal {
    let n = platforms.len();
    // Prefer the last fifth, excluding the very last platform; short lists
    // fall back to the last platform outright.
    let window_start = n * 4 / 5;
    let host_index = if window_start < n - 1 {
        rng.random_range(window_start..n - 1)
    } else {
        n - 1
    };

    let host = &platforms[host_index].rect;
    let mut rect = Rect::new(
        host.x + (host.width - config.goal_width) / 2.0,
        host.y - config.goal_height,
        config.goal_width,
        config.goal_height,
    );

    let others = platforms
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != host_index)
        .map(|(_, p)| &p.rect);
    if overlaps_any_buffered(&rect, others, GOAL_OVERLAP_TOLERANCE) {
        // Deterministic fallback: anchor to the host's right edge
        rect.x = host.right() - config.goal_width;
        log::debug!("goal repositioned to right edge of platform {host_index}");
    }

    Goal {
        rect,
        platform: host_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLATFORM_BASE_COLOR;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn plat(x: f32, y: f32, w: f32) -> Platform {
        Platform {
            rect: Rect::new(x, y, w, 20.0),
            hazard: false,
            color: PLATFORM_BASE_COLOR,
        }
    }

    #[test]
    fn test_goal_host_in_last_fifth() {
        let config = GenConfig::default();
        let platforms: Vec<Platform> =
            (0..20).map(|i| plat(i as f32 * 400.0, 500.0, 150.0)).collect();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let goal = place_goal(&mut rng, &config, &platforms);
            assert!(goal.platform >= 16);
            assert!(goal.platform < 19);
        }
    }

    #[test]
    fn test_goal_sits_on_host() {
        let config = GenConfig::default();
        let platforms: Vec<Platform> =
            (0..20).map(|i| plat(i as f32 * 400.0, 500.0, 150.0)).collect();
        let mut rng = Pcg32::seed_from_u64(11);
        let goal = place_goal(&mut rng, &config, &platforms);
        let host = &platforms[goal.platform].rect;
        assert_eq!(goal.rect.bottom(), host.y);
        assert!(goal.rect.x >= host.x - config.goal_width);
        assert!(goal.rect.right() <= host.right() + config.goal_width);
    }

    #[test]
    fn test_short_list_falls_back_to_last() {
        let config = GenConfig::default();
        let platforms = vec![plat(50.0, 500.0, 200.0), plat(600.0, 450.0, 150.0)];
        let mut rng = Pcg32::seed_from_u64(3);
        let goal = place_goal(&mut rng, &config, &platforms);
        assert_eq!(goal.platform, 1);
    }

    #[test]
    fn test_overlap_triggers_edge_fallback() {
        let config = GenConfig::default();
        // A platform hovering right where the centered goal would sit
        let host = plat(1000.0, 500.0, 200.0);
        let blocker = plat(1040.0, 420.0, 80.0);
        let platforms = vec![plat(50.0, 500.0, 200.0), blocker, host];
        let mut rng = Pcg32::seed_from_u64(3);
        let goal = place_goal(&mut rng, &config, &platforms);
        assert_eq!(goal.platform, 2);
        // Edge-anchored on the host
        assert_eq!(goal.rect.right(), platforms[2].rect.right());
    }
}
