//! Scene tessellation from simulation telemetry
//!
//! Reads the simulation through its public accessors only. Nothing here can
//! influence navigation.

use super::shapes::{circle, rect, thick_line};
use super::vertex::{Vertex, colors};
use crate::point_plus_polar;
use crate::sim::Simulation;

/// Line widths and tessellation detail, in arena units
#[derive(Debug, Clone, Copy)]
pub struct SceneStyle {
    pub boundary_width: f32,
    pub ray_width: f32,
    pub circle_segments: u32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            boundary_width: 0.25,
            ray_width: 0.15,
            circle_segments: 24,
        }
    }
}

/// Draw order: obstacles, boundary segments, target, robot, sensor ray
pub fn build_scene(sim: &Simulation, style: &SceneStyle) -> Vec<Vertex> {
    let world = sim.world();
    let mut vertices = Vec::new();

    for obstacle in world.obstacles() {
        vertices.extend(rect(
            obstacle.min().as_vec2(),
            obstacle.max().as_vec2(),
            colors::OBSTACLE,
        ));
    }

    for segment in world.boundary() {
        vertices.extend(thick_line(
            segment.a.as_vec2(),
            segment.b.as_vec2(),
            style.boundary_width,
            colors::BOUNDARY,
        ));
    }

    let target = world.target();
    vertices.extend(circle(
        target.position.as_vec2(),
        target.radius as f32,
        colors::TARGET,
        style.circle_segments,
    ));

    let robot = sim.robot();
    vertices.extend(circle(
        robot.pose.position.as_vec2(),
        robot.radius as f32,
        colors::ROBOT,
        style.circle_segments,
    ));

    // Eye marks the heading
    let eye_radius = robot.radius * 0.3;
    let eye = point_plus_polar(robot.pose.position, robot.pose.heading, robot.radius - eye_radius);
    vertices.extend(circle(
        eye.as_vec2(),
        eye_radius as f32,
        colors::ROBOT_EYE,
        style.circle_segments,
    ));

    let ray = sim.sensor_ray();
    vertices.extend(thick_line(
        ray.robot_edge.as_vec2(),
        ray.vision_edge.as_vec2(),
        style.ray_width,
        colors::SENSOR_RAY,
    ));

    vertices
}
