//! Forward-facing range sensor
//!
//! Casts a bounded ray from the robot's front edge along its heading and
//! reports the distance to the nearest boundary segment. The ray length is
//! the sensor range, so anything further away simply cannot intersect it
//! and the reading is infinite.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::segment::{Segment, squared_distance};
use super::state::Robot;
use super::world::World;
use crate::point_plus_polar;

/// The cast segment, from the robot edge to the end of vision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRay {
    pub robot_edge: DVec2,
    pub vision_edge: DVec2,
}

impl SensorRay {
    #[inline]
    pub fn as_segment(&self) -> Segment {
        Segment::new(self.robot_edge, self.vision_edge)
    }
}

/// Build the sensor ray for a robot
pub fn sensor_ray(robot: &Robot, max_range: f64) -> SensorRay {
    let heading = robot.pose.heading;
    let robot_edge = point_plus_polar(robot.pose.position, heading, robot.radius);
    let vision_edge = point_plus_polar(robot_edge, heading, max_range);
    SensorRay {
        robot_edge,
        vision_edge,
    }
}

/// Nearest boundary hit along the ray, if any
pub fn nearest_hit(world: &World, ray: &SensorRay) -> Option<DVec2> {
    let cast = ray.as_segment();
    world
        .boundary()
        .iter()
        .filter_map(|segment| cast.intersection(segment))
        .min_by(|a, b| {
            squared_distance(ray.robot_edge, *a).total_cmp(&squared_distance(ray.robot_edge, *b))
        })
}

/// Distance from the robot edge to the nearest hit, infinite if none
pub fn front_distance(world: &World, ray: &SensorRay) -> f64 {
    nearest_hit(world, ray)
        .map(|hit| squared_distance(ray.robot_edge, hit).sqrt())
        .unwrap_or(f64::INFINITY)
}
