use std::time::{Duration, Instant};

use log::info;
use rand::rngs::SmallRng;
use rand::Rng;

use patchymc_energy::Energy;
use patchymc_sim::ObserversSet;
use patchymc_system::Configuration;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::movemaps::MoveError;
use crate::trait_movetype::Movetype;

/// Canonical-ensemble Monte Carlo step loop.
///
/// Movetypes are drawn by cumulative probability; any probability mass left
/// below one is the chance that a step does nothing. The loop stops after the
/// requested number of steps or, if a wall-clock budget is set, as soon as it
/// is exceeded. A move commits atomically, so stopping between steps never
/// leaves partial state behind.
pub struct NvtSimulation {
    movetypes: Vec<Box<dyn Movetype>>,
    cum_probs: Vec<f64>,
    steps: u64,
    logging_freq: u64,
    max_duration: Option<Duration>,
}

impl NvtSimulation {
    /// # Arguments
    /// * `steps` - number of Monte Carlo steps to run
    /// * `logging_freq` - log statistics every that many steps; 0 disables it
    pub fn new(steps: u64, logging_freq: u64) -> NvtSimulation {
        NvtSimulation {
            movetypes: Vec::new(),
            cum_probs: Vec::new(),
            steps,
            logging_freq,
            max_duration: None,
        }
    }

    /// Caps the wall-clock time of [`run()`](NvtSimulation::run)
    pub fn set_max_duration(&mut self, duration: Duration) {
        self.max_duration = Some(duration);
    }

    /// Registers a movetype selected with probability `prob` per step.
    ///
    /// Probabilities accumulate in registration order and may not sum above one.
    pub fn add_movetype(&mut self, movetype: Box<dyn Movetype>, prob: f64) -> Result<(), MoveError> {
        let cum = self.cum_probs.last().copied().unwrap_or(0.0) + prob;
        if cum > 1.0 + 1e-12 {
            return Err(MoveError::ProbabilitiesExceedOne { total: cum });
        }
        self.movetypes.push(movetype);
        self.cum_probs.push(cum);

        Ok(())
    }

    pub fn count_movetypes(&self) -> usize {
        self.movetypes.len()
    }

    pub fn movetype_statistics(&self, which_one: usize) -> AcceptanceStatistics {
        self.movetypes[which_one].statistics()
    }

    pub fn movetype_label(&self, which_one: usize) -> &str {
        self.movetypes[which_one].label()
    }

    /// Runs the step loop.
    ///
    /// Observers are offered the configuration once per step; their lag times
    /// decide which steps actually produce output.
    pub fn run(
        &mut self,
        config: &mut Configuration,
        energy: &Energy,
        rng: &mut SmallRng,
        observers: &mut ObserversSet<Configuration>,
    ) {
        let start = Instant::now();
        let mut recent: Vec<AcceptanceStatistics> =
            vec![AcceptanceStatistics::default(); self.movetypes.len()];

        for step in 1..=self.steps {
            if let Some(budget) = self.max_duration {
                if start.elapsed() >= budget {
                    info!("Wall-clock budget exhausted after {} steps", step - 1);
                    break;
                }
            }

            let u = rng.gen_range(0.0..1.0);
            if let Some(i) = self.cum_probs.iter().position(|&cum| cum > u) {
                self.movetypes[i].attempt(config, energy, rng);
            }

            if self.logging_freq != 0 && step % self.logging_freq == 0 {
                let mut line = format!("Step {:>10}  energy {:>12.4}  acc:", step, energy.total_energy(config));
                for (i, movetype) in self.movetypes.iter().enumerate() {
                    let stats = movetype.statistics();
                    line.push_str(&format!(
                        " {} {:.3}",
                        movetype.label(),
                        stats.recent_success_rate(&recent[i])
                    ));
                    recent[i] = stats;
                }
                info!("{}", line);
            }

            observers.observe(config);
        }

        observers.flush_observers();
        self.log_summary(start.elapsed());
    }

    fn log_summary(&self, elapsed: Duration) {
        info!("Run finished in {:.2?}", elapsed);
        info!("{:<24} {:>12} {:>12} {:>10}", "Movetype", "Attempts", "Accepts", "Rate");
        for movetype in &self.movetypes {
            let stats = movetype.statistics();
            info!(
                "{:<24} {:>12} {:>12} {:>10.4}",
                movetype.label(),
                stats.n_succ + stats.n_failed,
                stats.n_succ,
                stats.success_rate()
            );
        }
    }
}
