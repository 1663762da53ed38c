use rand::rngs::SmallRng;

use patchymc_energy::Energy;
use patchymc_system::Configuration;

use crate::acceptance_statistics::AcceptanceStatistics;

/// A movetype proposes a change to the configuration and accepts or rejects
/// it under detailed balance.
///
/// An attempt mutates only the trial buffers of the monomers it touches and
/// leaves every monomer with trial equal to current when it returns,
/// whichever way the decision went.
pub trait Movetype {
    /// Attempts one move; returns whether it was accepted
    fn attempt(&mut self, config: &mut Configuration, energy: &Energy, rng: &mut SmallRng) -> bool;

    /// Short name of this movetype used in logs
    fn label(&self) -> &str;

    /// Acceptance counters accumulated so far
    fn statistics(&self) -> AcceptanceStatistics;
}
