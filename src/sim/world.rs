//! Static world model: arena frame, obstacles, target
//!
//! Built once before the first step and read-only afterwards. The boundary
//! segment set is derived eagerly here and never recomputed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::config::SimConfig;
use crate::consts::ARENA_SIZE;
use crate::error::Result;

/// An axis-aligned rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    /// Check if two rectangles overlap once each is grown by `margin`
    pub fn overlaps(&self, other: &Obstacle, margin: f64) -> bool {
        let (a_min, a_max) = (self.min() - margin, self.max() + margin);
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Distance from a point to the rectangle (0 inside)
    pub fn distance_to_point(&self, p: DVec2) -> f64 {
        let closest = p.clamp(self.min(), self.max());
        (p - closest).length()
    }

    /// The four edges: bottom, left, top, right
    pub fn edges(&self) -> [Segment; 4] {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        [
            Segment::new(DVec2::new(x, y), DVec2::new(x + w, y)),
            Segment::new(DVec2::new(x, y), DVec2::new(x, y + h)),
            Segment::new(DVec2::new(x, y + h), DVec2::new(x + w, y + h)),
            Segment::new(DVec2::new(x + w, y), DVec2::new(x + w, y + h)),
        ]
    }
}

/// The goal disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: DVec2,
    pub radius: f64,
}

impl Target {
    pub const fn new(position: DVec2, radius: f64) -> Self {
        Self { position, radius }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(DVec2::new(90.0, 80.0), 1.0)
    }
}

/// Arena, obstacles, target and the derived collision surface
#[derive(Debug, Clone)]
pub struct World {
    frame: Obstacle,
    obstacles: Vec<Obstacle>,
    target: Target,
    boundary: Vec<Segment>,
}

impl World {
    /// Build the world and derive its boundary segments
    pub fn new(obstacles: Vec<Obstacle>, target: Target) -> Self {
        let frame = Obstacle::new(0.0, 0.0, ARENA_SIZE, ARENA_SIZE);
        let boundary = obstacles
            .iter()
            .chain(std::iter::once(&frame))
            .flat_map(Obstacle::edges)
            .collect();

        Self {
            frame,
            obstacles,
            target,
            boundary,
        }
    }

    /// Build from a validated configuration
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.obstacles.clone(), config.target))
    }

    /// The outer arena rectangle
    pub fn frame(&self) -> &Obstacle {
        &self.frame
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Every obstacle edge followed by the four frame edges
    pub fn boundary(&self) -> &[Segment] {
        &self.boundary
    }
}
