//! Robot state and the simulation context
//!
//! The pose is mutated only through [`Simulation::drive`], once per tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sensor::{SensorRay, front_distance, sensor_ray};
use super::world::World;
use crate::config::{SimConfig, Tunables};
use crate::error::Result;
use crate::{heading_between, normalize_degrees, point_plus_polar};

/// Position and heading of the robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    /// Heading in degrees, always in [0, 360)
    pub heading: f64,
}

impl Pose {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            heading: normalize_degrees(heading),
        }
    }

    /// Unicycle update: rotate first, then translate along the new heading
    ///
    /// Powers are percentages and are deliberately not clamped here.
    pub fn drive(&mut self, command: DriveCommand, limits: &Tunables) {
        self.heading = normalize_degrees(
            self.heading + command.angular_power / 100.0 * limits.max_angular_speed,
        );
        let distance = command.forward_power / 100.0 * limits.max_forward_speed;
        self.position = point_plus_polar(self.position, self.heading, distance);
    }
}

/// Forward and angular drive power, both percentages in [-100, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    pub forward_power: f64,
    pub angular_power: f64,
}

impl DriveCommand {
    pub const fn new(forward_power: f64, angular_power: f64) -> Self {
        Self {
            forward_power,
            angular_power,
        }
    }

    /// Full power straight ahead
    pub const fn forward() -> Self {
        Self::new(100.0, 0.0)
    }

    /// Turn in place
    pub const fn rotate(angular_power: f64) -> Self {
        Self::new(0.0, angular_power)
    }
}

/// The robot body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub pose: Pose,
    pub radius: f64,
}

/// Read-only snapshot for renderers and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub pose: Pose,
    pub ray: SensorRay,
    /// Distance to the nearest boundary along the ray (infinite if clear)
    pub front_distance: f64,
    pub distance_to_target: f64,
}

/// Simulation context: world, robot and platform limits
///
/// Owned by the driver and lent to the navigator for one step at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    robot: Robot,
    tunables: Tunables,
    /// Drive commands applied so far
    ticks: u64,
}

impl Simulation {
    pub fn new(world: World, robot: Robot, tunables: Tunables) -> Self {
        Self {
            world,
            robot,
            tunables,
            ticks: 0,
        }
    }

    /// Build from a configuration, failing fast if it is invalid
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let world = World::from_config(config)?;
        let robot = Robot {
            pose: Pose::new(config.robot.position, config.robot.heading),
            radius: config.robot.radius,
        };
        Ok(Self::new(world, robot, config.tunables))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn pose(&self) -> Pose {
        self.robot.pose
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Number of drive commands applied since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Apply one drive command (the only pose mutation)
    pub fn drive(&mut self, command: DriveCommand) {
        self.robot.pose.drive(command, &self.tunables);
        self.ticks += 1;
    }

    /// Current sensor cast from the robot's front edge
    pub fn sensor_ray(&self) -> SensorRay {
        sensor_ray(&self.robot, self.tunables.sensor_max_range)
    }

    /// Distance to the nearest boundary straight ahead
    pub fn front_distance(&self) -> f64 {
        front_distance(&self.world, &self.sensor_ray())
    }

    pub fn distance_to_target(&self) -> f64 {
        self.robot.pose.position.distance(self.world.target().position)
    }

    /// Heading from the robot center to the target center
    pub fn heading_to_target(&self) -> f64 {
        heading_between(self.robot.pose.position, self.world.target().position)
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            pose: self.robot.pose,
            ray: self.sensor_ray(),
            front_distance: self.front_distance(),
            distance_to_target: self.distance_to_target(),
        }
    }
}
