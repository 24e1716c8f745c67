//! Simulation configuration
//!
//! Read once before the first step. Everything missing from a JSON file
//! falls back to the shipped arena layout.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::sim::{Obstacle, Target};

/// Platform limits of the robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Degrees per tick at full angular power
    pub max_angular_speed: f64,
    /// Units per tick at full forward power
    pub max_forward_speed: f64,
    /// Length of the cast sensor ray
    pub sensor_max_range: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            max_angular_speed: MAX_ANGULAR_SPEED,
            max_forward_speed: MAX_FORWARD_SPEED,
            sensor_max_range: SENSOR_MAX_RANGE,
        }
    }
}

/// Initial robot pose and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub position: DVec2,
    /// Initial heading in degrees
    pub heading: f64,
    pub radius: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            position: DVec2::new(10.0, 10.0),
            heading: 0.0,
            radius: 1.0,
        }
    }
}

/// Complete initialization input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub robot: RobotConfig,
    pub obstacles: Vec<Obstacle>,
    pub target: Target,
    pub tunables: Tunables,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            robot: RobotConfig::default(),
            obstacles: vec![
                Obstacle::new(25.0, 15.0, 8.0, 35.0),
                Obstacle::new(65.0, 35.0, 8.0, 55.0),
            ],
            target: Target::new(DVec2::new(90.0, 80.0), 1.0),
            tunables: Tunables::default(),
        }
    }
}

impl SimConfig {
    /// Same arena as the shipped layout but without any obstacles
    pub fn empty_arena() -> Self {
        Self {
            obstacles: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded configuration from {} ({} obstacles)",
            path.display(),
            config.obstacles.len()
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the navigation core cannot run with
    pub fn validate(&self) -> Result<()> {
        let robot = &self.robot;
        if !robot.position.is_finite() || !robot.heading.is_finite() {
            return Err(invalid("robot pose must be finite"));
        }
        if !robot.radius.is_finite() || robot.radius < 0.0 {
            return Err(invalid(format!("robot radius {} is negative or non-finite", robot.radius)));
        }

        let target = &self.target;
        if !target.position.is_finite() {
            return Err(invalid("target position must be finite"));
        }
        if !target.radius.is_finite() || target.radius < 0.0 {
            return Err(invalid(format!(
                "target radius {} is negative or non-finite",
                target.radius
            )));
        }

        for (i, obstacle) in self.obstacles.iter().enumerate() {
            let coords = [obstacle.x, obstacle.y, obstacle.width, obstacle.height];
            if coords.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("obstacle {i} has non-finite coordinates")));
            }
            if obstacle.width <= 0.0 || obstacle.height <= 0.0 {
                return Err(invalid(format!(
                    "obstacle {i} has non-positive size {}x{}",
                    obstacle.width, obstacle.height
                )));
            }
        }

        let t = &self.tunables;
        for (name, value) in [
            ("max_angular_speed", t.max_angular_speed),
            ("max_forward_speed", t.max_forward_speed),
            ("sensor_max_range", t.sensor_max_range),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_shipped_layout() {
        let config = SimConfig::default();
        assert_eq!(config.robot.position, DVec2::new(10.0, 10.0));
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!(config.target.position, DVec2::new(90.0, 80.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "obstacles": [] }"#).unwrap();
        assert!(config.obstacles.is_empty());
        assert_eq!(config.robot, RobotConfig::default());
        assert_eq!(config.tunables, Tunables::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "robot": { "position": [5.0, 50.0], "heading": 90.0, "radius": 0.5 },
            "obstacles": [ { "x": 40.0, "y": 40.0, "width": 10.0, "height": 20.0 } ],
            "target": { "position": [95.0, 50.0], "radius": 1.0 },
            "tunables": { "max_angular_speed": 5.0 }
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.robot.position, DVec2::new(5.0, 50.0));
        assert_eq!(config.obstacles[0].width, 10.0);
        assert_eq!(config.tunables.max_angular_speed, 5.0);
        assert_eq!(config.tunables.sensor_max_range, SENSOR_MAX_RANGE);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut config = SimConfig::default();
        config.robot.radius = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.target.radius = -0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_degenerate_obstacle_rejected() {
        let mut config = SimConfig::default();
        config.obstacles.push(Obstacle::new(50.0, 50.0, 0.0, 10.0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_tunables_rejected() {
        let mut config = SimConfig::default();
        config.tunables.sensor_max_range = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.tunables.max_angular_speed = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SimConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/nonexistent/bugnav.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
