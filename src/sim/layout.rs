//! Seeded obstacle layouts
//!
//! Produces random but reproducible arenas for stress runs. Convergence of
//! the bug algorithm is not guaranteed on generated layouts.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::Obstacle;
use crate::config::SimConfig;
use crate::consts::ARENA_SIZE;

/// Gap kept between obstacles and the arena frame
pub const FRAME_MARGIN: f64 = 8.0;
/// Gap kept between obstacles
pub const OBSTACLE_SPACING: f64 = 8.0;
/// Clearance around the robot start and the target
pub const ENDPOINT_CLEARANCE: f64 = 8.0;

const MIN_SIDE: f64 = 4.0;
const MAX_SIDE: f64 = 40.0;
/// Placement attempts per requested obstacle before giving up on it
const ATTEMPTS_PER_OBSTACLE: usize = 64;
/// Consecutive rejections after which the arena is considered full
const STALL_ATTEMPTS: usize = 1024;

/// Replace `base`'s obstacles with up to `count` seeded rectangles
///
/// Rectangles never overlap each other (with [`OBSTACLE_SPACING`]), stay
/// [`FRAME_MARGIN`] inside the frame and keep [`ENDPOINT_CLEARANCE`] from the
/// robot start and the target. Fewer than `count` are placed when the arena
/// runs out of room.
pub fn generate_layout(seed: u64, count: usize, base: &SimConfig) -> SimConfig {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut obstacles: Vec<Obstacle> = Vec::new();

    let start = base.robot.position;
    let goal = base.target.position;
    let start_clearance = ENDPOINT_CLEARANCE + base.robot.radius;
    let goal_clearance = ENDPOINT_CLEARANCE + base.target.radius;

    let mut attempts = 0usize;
    let mut misses = 0usize;
    let max_attempts = ATTEMPTS_PER_OBSTACLE.saturating_mul(count);
    while obstacles.len() < count && attempts < max_attempts && misses < STALL_ATTEMPTS {
        attempts += 1;
        misses += 1;

        let width = rng.random_range(MIN_SIDE..MAX_SIDE);
        let height = rng.random_range(MIN_SIDE..MAX_SIDE);
        let max_x = ARENA_SIZE - FRAME_MARGIN - width;
        let max_y = ARENA_SIZE - FRAME_MARGIN - height;
        if max_x <= FRAME_MARGIN || max_y <= FRAME_MARGIN {
            continue;
        }
        let candidate = Obstacle::new(
            rng.random_range(FRAME_MARGIN..max_x),
            rng.random_range(FRAME_MARGIN..max_y),
            width,
            height,
        );

        let nearby = std::slice::from_ref(&candidate);
        if !is_clear(nearby, start, start_clearance)
            || !is_clear(nearby, goal, goal_clearance)
            || obstacles.iter().any(|o| o.overlaps(&candidate, OBSTACLE_SPACING))
        {
            continue;
        }
        obstacles.push(candidate);
        misses = 0;
    }

    if obstacles.len() < count {
        log::warn!(
            "Layout seed {}: placed {} of {} obstacles",
            seed,
            obstacles.len(),
            count
        );
    } else {
        log::info!("Layout seed {}: placed {} obstacles", seed, obstacles.len());
    }

    SimConfig {
        obstacles,
        ..base.clone()
    }
}

/// Check that a point keeps `clearance` from every obstacle
pub fn is_clear(obstacles: &[Obstacle], point: DVec2, clearance: f64) -> bool {
    obstacles
        .iter()
        .all(|o| o.distance_to_point(point) >= clearance)
}
