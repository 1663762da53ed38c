use rand::rngs::SmallRng;
use rand::Rng;

use patchymc_energy::Energy;
use patchymc_system::Configuration;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::movemaps::Movemap;
use crate::trait_movetype::Movetype;

/// Single-monomer Metropolis movetype.
///
/// One attempt perturbs a uniformly chosen monomer with the plugged-in
/// movemap and accepts with probability `min(1, exp(-beta dE))`; an infinite
/// energy difference is rejected outright.
pub struct MetropolisMovetype {
    movemap: Box<dyn Movemap>,
    beta: f64,
    label: String,
    stats: AcceptanceStatistics,
}

impl MetropolisMovetype {
    /// # Arguments
    /// * `beta` - inverse temperature `1/kT`
    /// * `movemap` - the transformation generator this movetype proposes with
    /// * `label` - name used for this movetype in logs
    pub fn new(beta: f64, movemap: Box<dyn Movemap>, label: &str) -> MetropolisMovetype {
        MetropolisMovetype {
            movemap,
            beta,
            label: label.to_string(),
            stats: Default::default(),
        }
    }

    fn accept_move(&self, de: f64, rng: &mut SmallRng) -> bool {
        if de == f64::INFINITY {
            return false;
        }
        let paccept = (-self.beta * de).exp().min(1.0);
        if paccept == 1.0 {
            return true;
        }

        return paccept > rng.gen_range(0.0..1.0);
    }
}

impl Movetype for MetropolisMovetype {
    fn attempt(&mut self, config: &mut Configuration, energy: &Energy, rng: &mut SmallRng) -> bool {
        let m = config.random_monomer_index(rng);
        self.movemap.generate(m, config, rng);
        self.movemap.apply(m, config);
        let de = energy.monomer_diff(config, m);
        let accepted = self.accept_move(de, rng);
        if accepted {
            self.stats.n_succ += 1;
            config.monomer_mut(m).trial_to_current();
        } else {
            self.stats.n_failed += 1;
            config.monomer_mut(m).current_to_trial();
        }

        return accepted;
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn statistics(&self) -> AcceptanceStatistics {
        self.stats.clone()
    }
}
