use crate::config::SimConfig;
use crate::engine::{CombinationRecord, Simulation};
use crate::entity::EntityView;
use crate::error::ConfigurationError;
use std::ops::ControlFlow;
use std::time::Duration;

/// When a driver stops on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopCondition {
    /// Run until `max_ticks`
    #[default]
    Ticks,
    /// Also stop once no further combination is possible
    Exhausted,
}

/// Fixed-rate tick scheduler.
///
/// Calls `Simulation::step` up to `max_ticks` times, optionally sleeping
/// `interval` between ticks, and hands each snapshot to an observer.
#[derive(Debug, Clone)]
pub struct TickDriver {
    pub interval: Option<Duration>,
    pub max_ticks: u64,
    pub stop: StopCondition,
}

impl TickDriver {
    /// Unpaced driver, as fast as `step` returns
    pub fn new(max_ticks: u64) -> Self {
        Self {
            interval: None,
            max_ticks,
            stop: StopCondition::Ticks,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_stop(mut self, stop: StopCondition) -> Self {
        self.stop = stop;
        self
    }

    /// Drive `sim` until a stop condition is reached or the observer breaks.
    /// Returns the number of ticks executed by this call.
    pub fn run<F>(&self, sim: &mut Simulation, mut observer: F) -> u64
    where
        F: FnMut(&Simulation, &[EntityView]) -> ControlFlow<()>,
    {
        let mut ticks = 0;
        while ticks < self.max_ticks {
            if self.stop == StopCondition::Exhausted && !sim.can_still_combine() {
                log::debug!("no combinations left after {} ticks", ticks);
                break;
            }

            let snapshot = sim.step();
            ticks += 1;

            if observer(&*sim, &snapshot).is_break() {
                break;
            }
            if let Some(interval) = self.interval {
                if ticks < self.max_ticks {
                    std::thread::sleep(interval);
                }
            }
        }
        ticks
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub combinations: Vec<CombinationRecord>,
    pub final_state: Vec<EntityView>,
}

/// Build a simulation from `config` and run it for `ticks` ticks without pacing
pub fn run_simulation(config: SimConfig, ticks: u64) -> Result<RunSummary, ConfigurationError> {
    let mut sim = Simulation::from_config(config)?;
    let mut combinations = Vec::new();

    let executed = TickDriver::new(ticks).run(&mut sim, |sim, _| {
        if let Some(record) = sim.last_combination() {
            if record.tick == sim.tick() {
                combinations.push(*record);
            }
        }
        ControlFlow::Continue(())
    });

    Ok(RunSummary {
        ticks: executed,
        combinations,
        final_state: sim.snapshot(),
    })
}
