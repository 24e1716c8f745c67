//! Bug-algorithm navigation state machine
//!
//! Advances the robot by exactly one drive command per [`Navigator::step`].
//! The machine alternates between seeking the target in a straight line and
//! circumventing obstacles:
//!
//! 1. `Seek`: stop when the target is reached, start circumventing when an
//!    obstacle is closer than [`OBSTACLE_DISTANCE`], otherwise aim at the
//!    target (`Approach`) and take one forward step.
//! 2. `Sweep`: rotate a full turn in fixed increments, remembering the heading
//!    of the closest reading. That heading is the surface normal.
//! 3. `AlignTangent`: turn to whichever of normal ±90° is closer to the target.
//! 4. `Follow`: drive straight until blocked again.
//! 5. If the target now lies more than 90° off the heading, `Resume` by turning
//!    toward it and leave the obstacle. Otherwise sweep again.
//!
//! Turning states keep their goal heading, so no Seek check runs between
//! turn ticks.

use serde::{Deserialize, Serialize};

use super::control::{is_close_to, turn_toward};
use super::state::{DriveCommand, Simulation};
use crate::consts::*;
use crate::signed_angle_delta;

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// A drive command was issued
    Running,
    /// Terminal, no command was issued
    ReachedTarget,
}

/// Progress of a full-turn scan for the nearest surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepScan {
    /// Samples taken so far
    pub samples: u32,
    /// Closest reading seen
    pub min_distance: f64,
    /// Heading at which the closest reading was taken
    pub argmin_heading: Option<f64>,
}

impl SweepScan {
    /// Number of samples in a full turn
    pub const SAMPLES: u32 = (360.0 / SWEEP_STEP_DEG) as u32;

    pub fn new() -> Self {
        Self {
            samples: 0,
            min_distance: f64::INFINITY,
            argmin_heading: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.samples >= Self::SAMPLES
    }

    /// Record a reading; ties keep the earlier heading
    pub fn record(&mut self, heading: f64, distance: f64) {
        if distance < self.min_distance {
            self.min_distance = distance;
            self.argmin_heading = Some(heading);
        }
        self.samples += 1;
    }
}

impl Default for SweepScan {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigation state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum NavState {
    /// Evaluate arrival and obstacles, then aim at the target
    #[default]
    Seek,
    /// Turning toward the target before a forward step
    Approach { heading: f64 },
    /// Full-turn scan for the obstacle normal
    Sweep(SweepScan),
    /// Turning onto the chosen tangent
    AlignTangent { heading: f64 },
    /// Driving along the tangent until blocked
    Follow,
    /// Turning toward the target before leaving the obstacle
    Resume { heading: f64 },
    /// Target reached (terminal)
    Reached,
}

impl NavState {
    /// Whether the robot is currently working around an obstacle
    pub fn is_circumventing(&self) -> bool {
        matches!(
            self,
            NavState::Sweep(_)
                | NavState::AlignTangent { .. }
                | NavState::Follow
                | NavState::Resume { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Seek => "SEEK",
            NavState::Approach { .. } => "APPROACH",
            NavState::Sweep(_) => "SWEEP",
            NavState::AlignTangent { .. } => "ALIGN_TANGENT",
            NavState::Follow => "FOLLOW",
            NavState::Resume { .. } => "RESUME",
            NavState::Reached => "REACHED",
        }
    }
}

/// Counters for telemetry and regression checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavStats {
    /// Steps that issued a drive command
    pub ticks: u64,
    /// Times an obstacle interrupted Seek
    pub circumvents: u32,
    /// Full-turn sweeps started
    pub sweeps: u32,
}

/// The bug-algorithm state machine
///
/// Holds no world state of its own. The simulation is lent for one step.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
    stats: NavStats,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn stats(&self) -> NavStats {
        self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.state == NavState::Reached
    }

    /// Advance by exactly one drive command, or report arrival
    pub fn step(&mut self, sim: &mut Simulation) -> StepStatus {
        let status = self.advance(sim);
        if status == StepStatus::Running {
            self.stats.ticks += 1;
        }
        status
    }

    /// Run non-driving transitions until one command is issued
    fn advance(&mut self, sim: &mut Simulation) -> StepStatus {
        loop {
            match self.state {
                NavState::Seek => {
                    if sim.distance_to_target() < REACH_DISTANCE {
                        log::info!(
                            "Reached target at ({:.3}, {:.3}) after {} ticks",
                            sim.pose().position.x,
                            sim.pose().position.y,
                            self.stats.ticks
                        );
                        self.state = NavState::Reached;
                        return StepStatus::ReachedTarget;
                    }
                    if sim.front_distance() < OBSTACLE_DISTANCE {
                        self.stats.circumvents += 1;
                        log::info!(
                            "Obstacle ahead at ({:.2}, {:.2}), circumventing (#{})",
                            sim.pose().position.x,
                            sim.pose().position.y,
                            self.stats.circumvents
                        );
                        self.start_sweep();
                        continue;
                    }
                    self.state = NavState::Approach {
                        heading: sim.heading_to_target(),
                    };
                }

                NavState::Approach { heading } => {
                    if !is_close_to(sim.pose().heading, heading) {
                        turn_toward(sim, heading);
                        return StepStatus::Running;
                    }
                    sim.drive(DriveCommand::forward());
                    self.state = NavState::Seek;
                    return StepStatus::Running;
                }

                NavState::Sweep(mut scan) => {
                    if !scan.is_complete() {
                        scan.record(sim.pose().heading, sim.front_distance());
                        sim.drive(DriveCommand::rotate(sweep_power(
                            sim.tunables().max_angular_speed,
                        )));
                        self.state = NavState::Sweep(scan);
                        return StepStatus::Running;
                    }

                    let Some(normal) = scan.argmin_heading else {
                        // Sweeps start only after a finite reading, so this
                        // means the surface slipped out of range mid-turn
                        log::warn!("Sweep found no surface in range, returning to seek");
                        self.state = NavState::Seek;
                        continue;
                    };

                    let tangent = choose_tangent(normal, sim.heading_to_target());
                    log::debug!(
                        "Sweep done: normal {:.1} deg at {:.3}, tangent {:.1} deg",
                        normal,
                        scan.min_distance,
                        tangent
                    );
                    self.state = NavState::AlignTangent { heading: tangent };
                }

                NavState::AlignTangent { heading } => {
                    if !is_close_to(sim.pose().heading, heading) {
                        turn_toward(sim, heading);
                        return StepStatus::Running;
                    }
                    self.state = NavState::Follow;
                }

                NavState::Follow => {
                    if sim.front_distance() > OBSTACLE_DISTANCE {
                        sim.drive(DriveCommand::forward());
                        return StepStatus::Running;
                    }

                    let target_heading = sim.heading_to_target();
                    let delta = signed_angle_delta(target_heading, sim.pose().heading);
                    if delta.abs() > 90.0 {
                        log::info!("Blocked with target {:.1} deg off heading, resuming", delta);
                        self.state = NavState::Resume {
                            heading: target_heading,
                        };
                    } else {
                        log::debug!("Blocked while following, sweeping again");
                        self.start_sweep();
                    }
                }

                NavState::Resume { heading } => {
                    if !is_close_to(sim.pose().heading, heading) {
                        turn_toward(sim, heading);
                        return StepStatus::Running;
                    }
                    if is_heading_away_from_target(sim) {
                        log::debug!("Still heading away from target, circumventing again");
                        self.start_sweep();
                    } else {
                        log::info!("Leaving obstacle, seeking target");
                        self.state = NavState::Seek;
                    }
                }

                NavState::Reached => return StepStatus::ReachedTarget,
            }
        }
    }

    fn start_sweep(&mut self) {
        self.stats.sweeps += 1;
        self.state = NavState::Sweep(SweepScan::new());
    }
}

/// Angular power that rotates one sweep increment per tick
pub fn sweep_power(max_angular_speed: f64) -> f64 {
    (SWEEP_STEP_DEG * 100.0 / max_angular_speed).round()
}

/// Pick the tangent (normal ±90°) with the smaller turn toward the target
///
/// Ties go to the right-hand tangent (normal - 90°).
pub fn choose_tangent(normal: f64, target_heading: f64) -> f64 {
    let left = crate::normalize_degrees(normal + 90.0);
    let right = crate::normalize_degrees(normal - 90.0);

    let cost_left = signed_angle_delta(left, target_heading).abs();
    let cost_right = signed_angle_delta(right, target_heading).abs();

    if cost_left < cost_right { left } else { right }
}

/// Whether the target lies more than 90° off the current heading
pub fn is_heading_away_from_target(sim: &Simulation) -> bool {
    signed_angle_delta(sim.heading_to_target(), sim.pose().heading).abs() > 90.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::world::Obstacle;
    use glam::DVec2;

    fn sim_from(config: &SimConfig) -> Simulation {
        Simulation::from_config(config).unwrap()
    }

    #[test]
    fn test_sweep_power() {
        assert_eq!(sweep_power(MAX_ANGULAR_SPEED), 74.0);
        assert_eq!(SweepScan::SAMPLES, 180);
    }

    #[test]
    fn test_choose_tangent() {
        // Wall straight ahead (normal 0), target up and to the right
        assert_eq!(choose_tangent(0.0, 41.0), 90.0);
        // Target down and to the right
        assert_eq!(choose_tangent(0.0, 340.0), 270.0);
        // Normal pointing up, target to the right
        assert_eq!(choose_tangent(90.0, 68.0), 0.0);
    }

    #[test]
    fn test_sweep_scan_keeps_first_minimum() {
        let mut scan = SweepScan::new();
        scan.record(0.0, f64::INFINITY);
        assert_eq!(scan.argmin_heading, None);
        scan.record(2.0, 3.0);
        scan.record(4.0, 3.0);
        scan.record(6.0, 4.0);
        assert_eq!(scan.argmin_heading, Some(2.0));
        assert_eq!(scan.min_distance, 3.0);
        assert_eq!(scan.samples, 4);
    }

    #[test]
    fn test_seek_aims_then_drives() {
        let mut config = SimConfig::empty_arena();
        config.robot.heading = 90.0;
        config.target.position = DVec2::new(50.0, 10.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator::new();

        // First ticks only turn
        assert_eq!(nav.step(&mut sim), StepStatus::Running);
        assert_eq!(sim.pose().position, DVec2::new(10.0, 10.0));
        assert!(matches!(nav.state(), NavState::Approach { .. }));

        let mut steps = 1;
        while sim.pose().position == DVec2::new(10.0, 10.0) {
            nav.step(&mut sim);
            steps += 1;
            assert!(steps < 100);
        }
        assert!(is_close_to(sim.pose().heading, 0.0));
        assert_eq!(nav.state(), NavState::Seek);
    }

    #[test]
    fn test_reached_is_terminal() {
        let mut config = SimConfig::empty_arena();
        config.target.position = DVec2::new(10.05, 10.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator::new();

        assert_eq!(nav.step(&mut sim), StepStatus::ReachedTarget);
        assert!(nav.is_finished());
        assert_eq!(sim.ticks(), 0);

        assert_eq!(nav.step(&mut sim), StepStatus::ReachedTarget);
        assert_eq!(sim.ticks(), 0);
        assert_eq!(nav.stats().ticks, 0);
    }

    #[test]
    fn test_obstacle_triggers_sweep() {
        let mut config = SimConfig::empty_arena();
        config.target.position = DVec2::new(40.0, 10.0);
        config.obstacles = vec![Obstacle::new(14.0, 5.0, 2.0, 10.0)];
        let mut sim = sim_from(&config);
        let mut nav = Navigator::new();

        assert_eq!(nav.step(&mut sim), StepStatus::Running);
        assert!(matches!(nav.state(), NavState::Sweep(scan) if scan.samples == 1));
        assert_eq!(nav.stats().circumvents, 1);
        // Sweep rotates in place
        assert_eq!(sim.pose().position, DVec2::new(10.0, 10.0));
        assert!((sim.pose().heading - 74.0 / 100.0 * MAX_ANGULAR_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_takes_full_turn() {
        let mut config = SimConfig::empty_arena();
        config.target.position = DVec2::new(40.0, 10.0);
        config.obstacles = vec![Obstacle::new(14.0, 5.0, 2.0, 10.0)];
        let mut sim = sim_from(&config);
        let mut nav = Navigator::new();

        for _ in 0..SweepScan::SAMPLES {
            nav.step(&mut sim);
            assert!(matches!(nav.state(), NavState::Sweep(_)));
        }
        // Next step picks a tangent and starts turning onto it
        nav.step(&mut sim);
        match nav.state() {
            NavState::AlignTangent { heading } => {
                // Wall is straight ahead, target dead ahead behind it: tie goes right
                assert!(is_close_to(heading, 270.0), "tangent {heading}");
            }
            other => panic!("expected AlignTangent, got {:?}", other),
        }
        assert_eq!(sim.pose().position, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_follow_blocked_with_target_behind_resumes() {
        let mut config = SimConfig::empty_arena();
        config.robot.position = DVec2::new(50.0, 94.5);
        config.robot.heading = 90.0;
        config.target.position = DVec2::new(50.0, 20.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator {
            state: NavState::Follow,
            ..Navigator::default()
        };

        nav.step(&mut sim);
        assert!(matches!(
            nav.state(),
            NavState::Resume { heading } if (heading - 270.0).abs() < 1e-9
        ));
        assert_eq!(sim.pose().position, DVec2::new(50.0, 94.5));
    }

    #[test]
    fn test_follow_blocked_with_target_ahead_sweeps() {
        let mut config = SimConfig::empty_arena();
        config.robot.position = DVec2::new(94.5, 50.0);
        config.target.position = DVec2::new(95.0, 60.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator {
            state: NavState::Follow,
            ..Navigator::default()
        };

        nav.step(&mut sim);
        assert!(matches!(nav.state(), NavState::Sweep(scan) if scan.samples == 1));
        assert_eq!(nav.stats().sweeps, 1);
    }

    #[test]
    fn test_follow_treats_exactly_five_as_blocked() {
        let mut config = SimConfig::empty_arena();
        config.obstacles = vec![Obstacle::new(16.0, 5.0, 4.0, 10.0)];
        config.target.position = DVec2::new(40.0, 10.0);
        let mut sim = sim_from(&config);
        assert_eq!(sim.front_distance(), OBSTACLE_DISTANCE);

        let mut nav = Navigator {
            state: NavState::Follow,
            ..Navigator::default()
        };
        nav.step(&mut sim);
        assert!(matches!(nav.state(), NavState::Sweep(_)));
        assert_eq!(sim.pose().position, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_empty_sweep_returns_to_seek() {
        let mut config = SimConfig::empty_arena();
        config.target.position = DVec2::new(40.0, 10.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator {
            state: NavState::Sweep(SweepScan {
                samples: SweepScan::SAMPLES,
                min_distance: f64::INFINITY,
                argmin_heading: None,
            }),
            ..Navigator::default()
        };

        // Nothing ahead either, so Seek aims and steps forward in the same tick
        assert_eq!(nav.step(&mut sim), StepStatus::Running);
        assert_eq!(nav.state(), NavState::Seek);
        assert_eq!(sim.ticks(), 1);
        assert!((sim.pose().position.x - (10.0 + MAX_FORWARD_SPEED)).abs() < 1e-12);
        assert_eq!(nav.stats().sweeps, 0);
    }

    #[test]
    fn test_resume_still_heading_away_sweeps_again() {
        let mut config = SimConfig::empty_arena();
        config.robot.position = DVec2::new(50.0, 50.0);
        config.robot.heading = 0.0;
        config.target.position = DVec2::new(20.0, 50.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator {
            state: NavState::Resume { heading: 0.0 },
            stats: NavStats {
                sweeps: 2,
                ..NavStats::default()
            },
        };

        assert_eq!(nav.step(&mut sim), StepStatus::Running);
        assert!(matches!(nav.state(), NavState::Sweep(scan) if scan.samples == 1));
        assert_eq!(nav.stats().sweeps, 3);
        assert_eq!(nav.stats().circumvents, 0);
        assert_eq!(sim.pose().position, DVec2::new(50.0, 50.0));
    }

    #[test]
    fn test_resume_facing_target_seeks() {
        let mut config = SimConfig::empty_arena();
        config.robot.position = DVec2::new(50.0, 50.0);
        config.robot.heading = 0.0;
        config.target.position = DVec2::new(80.0, 50.0);
        let mut sim = sim_from(&config);
        let mut nav = Navigator {
            state: NavState::Resume { heading: 0.0 },
            ..Navigator::default()
        };

        assert_eq!(nav.step(&mut sim), StepStatus::Running);
        assert_eq!(nav.state(), NavState::Seek);
        assert_eq!(nav.stats().sweeps, 0);
        assert!((sim.pose().position.x - (50.0 + MAX_FORWARD_SPEED)).abs() < 1e-12);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(NavState::Seek.as_str(), "SEEK");
        assert!(NavState::Follow.is_circumventing());
        assert!(!NavState::Approach { heading: 0.0 }.is_circumventing());
    }
}
