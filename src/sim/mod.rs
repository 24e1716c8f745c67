//! Deterministic navigation core
//!
//! Everything that decides how the robot moves lives here. This module must
//! stay pure and deterministic:
//! - One drive command per tick
//! - World state is immutable after construction
//! - No rendering, timing or platform dependencies

pub mod control;
pub mod layout;
pub mod segment;
pub mod sensor;
pub mod state;
pub mod tick;
pub mod world;

pub use control::{is_close_to, turn_command, turn_toward};
pub use layout::generate_layout;
pub use segment::{Segment, distance, segment_intersection, squared_distance};
pub use sensor::{SensorRay, front_distance, sensor_ray};
pub use state::{DriveCommand, Pose, Robot, Simulation, Telemetry};
pub use tick::{NavState, NavStats, Navigator, StepStatus, SweepScan, choose_tangent};
pub use world::{Obstacle, Target, World};
