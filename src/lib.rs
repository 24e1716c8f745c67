//! Bugnav - a bug-algorithm robot in a bounded 2D arena
//!
//! Core modules:
//! - `sim`: Deterministic navigation core (world, kinematics, sensor, state machine)
//! - `renderer`: CPU tessellation of simulation telemetry
//! - `driver`: Fixed-cadence stepping of the navigation core
//! - `config`: Initialization input (robot, obstacles, target, tunables)

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{RobotConfig, SimConfig, Tunables};
pub use driver::Driver;
pub use error::{ConfigError, Result};

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Arena frame is a fixed square with its corner at the origin
    pub const ARENA_SIZE: f64 = 100.0;

    /// Degrees per tick at full angular power
    pub const MAX_ANGULAR_SPEED: f64 = 2.718281828;
    /// Units per tick at full forward power
    pub const MAX_FORWARD_SPEED: f64 = 0.2;
    /// If an object is further than this, the sensor sees infinite distance
    pub const SENSOR_MAX_RANGE: f64 = 6.0;

    /// Robot counts as arrived when closer than this to the target center
    pub const REACH_DISTANCE: f64 = 0.1;
    /// Front distance below which an obstacle blocks the way
    pub const OBSTACLE_DISTANCE: f64 = 5.0;
    /// Heading alignment tolerance
    pub const ALIGN_TOLERANCE_DEG: f64 = 0.2;
    /// Rotation per sample while sweeping for the nearest surface
    pub const SWEEP_STEP_DEG: f64 = 2.0;
}

/// Normalize degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    ((degrees % 360.0) + 360.0) % 360.0
}

/// Shortest signed rotation from `beta` to `alpha`, in (-180, 180]
#[inline]
pub fn signed_angle_delta(alpha: f64, beta: f64) -> f64 {
    let delta = normalize_degrees(alpha - beta);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Offset `origin` by `length` along a heading given in degrees
#[inline]
pub fn point_plus_polar(origin: DVec2, degrees: f64, length: f64) -> DVec2 {
    let theta = degrees.to_radians();
    origin + length * DVec2::new(theta.cos(), theta.sin())
}

/// Heading in degrees [0, 360) of the vector from `from` to `to`
#[inline]
pub fn heading_between(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}
