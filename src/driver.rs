//! Fixed-cadence driver for the navigation core
//!
//! Owns the simulation context and resumes the navigator once per interval.
//! Stopping the loop is the only way to cancel a run.

use std::time::{Duration, Instant};

use crate::config::SimConfig;
use crate::error::Result;
use crate::sim::{NavStats, Navigator, Simulation, StepStatus, Telemetry};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The navigator reached the target
    Reached { ticks: u64 },
    /// The tick ceiling was hit first
    TickLimit { ticks: u64 },
}

impl RunOutcome {
    pub fn ticks(&self) -> u64 {
        match *self {
            RunOutcome::Reached { ticks } | RunOutcome::TickLimit { ticks } => ticks,
        }
    }

    pub fn reached(&self) -> bool {
        matches!(self, RunOutcome::Reached { .. })
    }
}

/// Simulation plus the navigator that steers it
pub struct Driver {
    sim: Simulation,
    nav: Navigator,
    /// Frames whose step overran the interval
    frame_drops: u64,
}

impl Driver {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            nav: Navigator::new(),
            frame_drops: 0,
        }
    }

    /// Build from a configuration, failing fast if it is invalid
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        Ok(Self::new(Simulation::from_config(config)?))
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn stats(&self) -> NavStats {
        self.nav.stats()
    }

    pub fn telemetry(&self) -> Telemetry {
        self.sim.telemetry()
    }

    pub fn frame_drops(&self) -> u64 {
        self.frame_drops
    }

    /// Advance the navigator by one tick
    pub fn step(&mut self) -> StepStatus {
        self.nav.step(&mut self.sim)
    }

    /// Step as fast as possible until arrival or `max_ticks`
    pub fn run(&mut self, max_ticks: Option<u64>) -> RunOutcome {
        loop {
            if let Some(outcome) = self.check_limit(max_ticks) {
                return outcome;
            }
            if self.step() == StepStatus::ReachedTarget {
                return RunOutcome::Reached {
                    ticks: self.sim.ticks(),
                };
            }
        }
    }

    /// Step once per `interval`, calling `on_frame` after every step
    ///
    /// The remainder of each interval is slept away. A step that takes longer
    /// than the interval is logged as a frame drop.
    pub fn run_periodically<F>(
        &mut self,
        interval: Duration,
        max_ticks: Option<u64>,
        mut on_frame: F,
    ) -> RunOutcome
    where
        F: FnMut(&Simulation, &Navigator),
    {
        loop {
            if let Some(outcome) = self.check_limit(max_ticks) {
                return outcome;
            }

            let start = Instant::now();
            let status = self.step();
            on_frame(&self.sim, &self.nav);

            if status == StepStatus::ReachedTarget {
                return RunOutcome::Reached {
                    ticks: self.sim.ticks(),
                };
            }

            // Zero interval means unthrottled
            if interval.is_zero() {
                continue;
            }
            let elapsed = start.elapsed();
            if let Some(remaining) = interval.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            } else {
                self.frame_drops += 1;
                log::warn!(
                    "Frame drop: step took {:?}, interval is {:?}",
                    elapsed,
                    interval
                );
            }
        }
    }

    fn check_limit(&self, max_ticks: Option<u64>) -> Option<RunOutcome> {
        let ticks = self.sim.ticks();
        match max_ticks {
            Some(limit) if ticks >= limit => {
                log::warn!(
                    "Tick limit {} reached in state {} without arriving",
                    limit,
                    self.nav.state().as_str()
                );
                Some(RunOutcome::TickLimit { ticks })
            }
            _ => None,
        }
    }
}
