//! Proportional turning controller
//!
//! One call issues one drive command; callers loop until [`is_close_to`]
//! reports alignment.

use super::state::{DriveCommand, Simulation};
use crate::consts::ALIGN_TOLERANCE_DEG;
use crate::{normalize_degrees, signed_angle_delta};

/// Angular drive command that rotates `heading` toward `desired`
///
/// Power is proportional to the remaining error and saturates at the
/// platform's max angular rate. The floor of 1% keeps the robot moving when
/// float error leaves a sliver of delta.
pub fn turn_command(heading: f64, desired: f64, max_angular_speed: f64) -> DriveCommand {
    let delta = signed_angle_delta(desired, heading);
    let power = (delta.abs() / max_angular_speed * 100.0).clamp(1.0, 100.0);

    // delta never drops below -180, the second arm mirrors the first
    let direction = if delta > 0.0 || delta < -180.0 { 1.0 } else { -1.0 };
    DriveCommand::rotate(direction * power)
}

/// Issue one controller step toward `desired`
pub fn turn_toward(sim: &mut Simulation, desired: f64) {
    let command = turn_command(sim.pose().heading, desired, sim.tunables().max_angular_speed);
    sim.drive(command);
}

/// Whether `heading` is within the alignment tolerance of `desired`
pub fn is_close_to(heading: f64, desired: f64) -> bool {
    let delta = normalize_degrees(desired - heading);
    delta < ALIGN_TOLERANCE_DEG || delta > 360.0 - ALIGN_TOLERANCE_DEG
}
