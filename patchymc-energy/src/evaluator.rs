use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use patchymc_system::{Configuration, CoorSet, Particle};

use crate::potentials::{HarmonicWell, PairPotential, Patchy, ShiftedLJ};

/// Errors raised while building the [`Energy`](Energy) evaluator
#[derive(Debug, Error)]
pub enum EnergyError {
    #[error("unknown potential form tag: {form}")]
    UnknownPotentialForm { form: String },

    #[error("interaction references potential index {index} but only {count} potentials are defined")]
    BadPotentialIndex { index: usize, count: usize },

    #[error("no {table} potential registered for particle type pair ({type1}, {type2})")]
    MissingPairPotential { type1: i32, type2: i32, table: &'static str },

    #[error("invalid starting configuration: total energy is {energy}")]
    InvalidStartingConfiguration { energy: f64 },
}

/// One potential record of an energy input
#[derive(Clone, Debug, Deserialize)]
pub struct PotentialData {
    pub index: usize,
    pub form: String,
    #[serde(default)]
    pub parameters: PotentialParams,
}

/// Raw parameter record of a potential; each form reads the fields it needs
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PotentialParams {
    #[serde(default)]
    pub sigh: f64,
    #[serde(default)]
    pub eps: f64,
    #[serde(default)]
    pub sigl: f64,
    #[serde(default)]
    pub rcut: f64,
    #[serde(default)]
    pub siga1: f64,
    #[serde(default)]
    pub siga2: f64,
    #[serde(default)]
    pub sigt: f64,
}

/// One interaction record: a set of particle type pairs assigned to a potential
#[derive(Clone, Debug, Deserialize)]
pub struct InteractionData {
    pub pairs: Vec<[i32; 2]>,
    pub potential: usize,
}

fn build_potential(data: &PotentialData) -> Result<PairPotential, EnergyError> {
    let p = &data.parameters;
    let pot = match data.form.as_str() {
        "Zero" => PairPotential::Zero,
        "HardSphere" => PairPotential::HardSphere { sigh: p.sigh },
        "SquareWell" => PairPotential::SquareWell { eps: p.eps, rcut: p.rcut },
        "HarmonicWell" => PairPotential::HarmonicWell(HarmonicWell::new(p.eps, p.rcut)),
        "AngularHarmonicWell" => PairPotential::AngularHarmonicWell {
            hwell: HarmonicWell::new(p.eps, p.rcut),
            siga: p.siga1,
        },
        "ShiftedLJ" => PairPotential::ShiftedLJ(ShiftedLJ::new(p.eps, p.sigl, p.rcut)),
        "Patchy" => {
            PairPotential::Patchy(Patchy::new(p.eps, p.sigl, p.rcut, p.siga1, p.siga2))
        }
        "OrientedPatchy" => PairPotential::OrientedPatchy {
            patchy: Patchy::new(p.eps, p.sigl, p.rcut, p.siga1, p.siga2),
            sigt: p.sigt,
        },
        "DoubleOrientedPatchy" => PairPotential::DoubleOrientedPatchy {
            patchy: Patchy::new(p.eps, p.sigl, p.rcut, p.siga1, p.siga2),
            sigt: p.sigt,
        },
        _ => return Err(EnergyError::UnknownPotentialForm { form: data.form.clone() }),
    };

    Ok(pot)
}

/// Evaluates the energy of a configuration from pair potentials.
///
/// The evaluator owns the potentials and two lookup tables keyed by particle
/// type pair: one applies between monomers that currently share a conformer,
/// the other between monomers that do not. Every registered pair is entered
/// under both orderings so lookups are symmetric. Monomer pairs whose centres
/// are further apart than their bounding radii plus the largest cutoff are
/// culled without touching their particles.
pub struct Energy {
    potentials: Vec<PairPotential>,
    same_pair_to_pot: HashMap<(i32, i32), usize>,
    different_pair_to_pot: HashMap<(i32, i32), usize>,
    max_cutoff: f64,
}

impl Energy {
    /// Builds the evaluator and validates the starting configuration.
    ///
    /// Both interaction tables must cover every particle type pair occurring
    /// in `config`; a missing pair is an error, never a silent zero. The total
    /// energy of the starting configuration is computed eagerly and an
    /// infinite or undefined value is rejected.
    ///
    /// # Arguments
    /// * `config` - the starting configuration
    /// * `potentials` - potential records from the energy input
    /// * `same_conformers` - interaction records applying between same-conformer monomers
    /// * `different_conformers` - interaction records applying between different-conformer monomers
    pub fn new(
        config: &Configuration,
        potentials: &[PotentialData],
        same_conformers: &[InteractionData],
        different_conformers: &[InteractionData],
    ) -> Result<Energy, EnergyError> {
        let mut pots: Vec<PairPotential> = Vec::with_capacity(potentials.len());
        for p_data in potentials {
            pots.push(build_potential(p_data)?);
        }
        let max_cutoff = pots.iter().map(|p| p.cutoff()).fold(0.0, f64::max);

        let mut energy = Energy {
            potentials: pots,
            same_pair_to_pot: HashMap::new(),
            different_pair_to_pot: HashMap::new(),
            max_cutoff,
        };
        energy.register_interactions(same_conformers, true)?;
        energy.register_interactions(different_conformers, false)?;
        energy.check_coverage(config)?;

        let total = energy.total_energy(config);
        debug!("Starting configuration energy: {}", total);
        if total == f64::INFINITY || total.is_nan() {
            return Err(EnergyError::InvalidStartingConfiguration { energy: total });
        }

        Ok(energy)
    }

    fn register_interactions(
        &mut self,
        interactions: &[InteractionData],
        same_conformers: bool,
    ) -> Result<(), EnergyError> {
        for i_data in interactions {
            if i_data.potential >= self.potentials.len() {
                return Err(EnergyError::BadPotentialIndex {
                    index: i_data.potential,
                    count: self.potentials.len(),
                });
            }
            let table = if same_conformers {
                &mut self.same_pair_to_pot
            } else {
                &mut self.different_pair_to_pot
            };
            for pair in &i_data.pairs {
                table.insert((pair[0], pair[1]), i_data.potential);
                table.insert((pair[1], pair[0]), i_data.potential);
            }
        }

        Ok(())
    }

    /// Checks that every type pair that can occur in `config` is registered in both tables
    fn check_coverage(&self, config: &Configuration) -> Result<(), EnergyError> {
        let mut types: HashSet<i32> = HashSet::new();
        for monomer in config.monomers() {
            for particle in monomer.particles() {
                types.insert(particle.type_id());
            }
        }
        for &t1 in &types {
            for &t2 in &types {
                if !self.same_pair_to_pot.contains_key(&(t1, t2)) {
                    return Err(EnergyError::MissingPairPotential {
                        type1: t1,
                        type2: t2,
                        table: "same-conformer",
                    });
                }
                if !self.different_pair_to_pot.contains_key(&(t1, t2)) {
                    return Err(EnergyError::MissingPairPotential {
                        type1: t1,
                        type2: t2,
                        table: "different-conformer",
                    });
                }
            }
        }

        Ok(())
    }

    /// The largest cutoff among the registered potentials
    pub fn max_cutoff(&self) -> f64 {
        self.max_cutoff
    }

    /// The potential acting between two particles given their monomer conformers
    fn potential_for(&self, p1: &Particle, conformer1: i32, p2: &Particle, conformer2: i32) -> &PairPotential {
        let key = (p1.type_id(), p2.type_id());
        let pot_i = if conformer1 == conformer2 {
            self.same_pair_to_pot[&key]
        } else {
            self.different_pair_to_pot[&key]
        };

        return &self.potentials[pot_i];
    }

    /// Total energy of the configuration in the current state
    pub fn total_energy(&self, config: &Configuration) -> f64 {
        let n = config.num_monomers();
        let mut total = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                total += self.monomer_pair_energy(config, i, CoorSet::Current, j, CoorSet::Current);
            }
        }

        return total;
    }

    /// Energy between two monomers, each in its own coordinate set.
    ///
    /// Any hard-core overlap between a particle pair short-circuits to infinity.
    pub fn monomer_pair_energy(
        &self,
        config: &Configuration,
        m1: usize,
        coorset1: CoorSet,
        m2: usize,
        coorset2: CoorSet,
    ) -> f64 {
        debug_assert!(m1 != m2, "monomer pair energy queried against itself");
        let monomer1 = config.monomer(m1);
        let monomer2 = config.monomer(m2);
        let conformer1 = monomer1.conformer(coorset1);
        let conformer2 = monomer2.conformer(coorset2);
        let mut pair_ene = 0.0;
        for p1 in monomer1.particles() {
            for p2 in monomer2.particles() {
                let part_ene =
                    self.particle_pair_energy(config, p1, conformer1, coorset1, p2, conformer2, coorset2);
                if part_ene == f64::INFINITY {
                    return f64::INFINITY;
                }
                pair_ene += part_ene;
            }
        }

        return pair_ene;
    }

    fn particle_pair_energy(
        &self,
        config: &Configuration,
        p1: &Particle,
        conformer1: i32,
        coorset1: CoorSet,
        p2: &Particle,
        conformer2: i32,
        coorset2: CoorSet,
    ) -> f64 {
        let diff = config.interparticle_vector(p2, coorset2, p1, coorset1);
        let rdist = diff.length();
        let pot = self.potential_for(p1, conformer1, p2, conformer2);

        return pot.energy(rdist, &diff, p1.ore(coorset1), p2.ore(coorset2));
    }

    /// Whether the bounding spheres of two monomers come within the largest cutoff
    pub fn monomers_in_range(
        &self,
        config: &Configuration,
        m1: usize,
        coorset1: CoorSet,
        m2: usize,
        coorset2: CoorSet,
    ) -> bool {
        let max_interaction_d =
            config.monomer(m1).radius() + config.monomer(m2).radius() + self.max_cutoff;
        let d = config.monomer_dist(m1, coorset1, m2, coorset2);

        return d <= max_interaction_d;
    }

    /// Whether any particle pair of the two monomers satisfies its potential's
    /// interaction predicate. Checks the bounding spheres first.
    pub fn monomers_interacting(
        &self,
        config: &Configuration,
        m1: usize,
        coorset1: CoorSet,
        m2: usize,
        coorset2: CoorSet,
    ) -> bool {
        if !self.monomers_in_range(config, m1, coorset1, m2, coorset2) {
            return false;
        }
        let monomer1 = config.monomer(m1);
        let monomer2 = config.monomer(m2);
        let conformer1 = monomer1.conformer(coorset1);
        let conformer2 = monomer2.conformer(coorset2);
        for p1 in monomer1.particles() {
            for p2 in monomer2.particles() {
                let dist = config.particle_dist(p1, coorset1, p2, coorset2);
                let pot = self.potential_for(p1, conformer1, p2, conformer2);
                if pot.interacting(dist) {
                    return true;
                }
            }
        }

        return false;
    }

    /// Collects the indices of all monomers interacting with `m1`.
    ///
    /// `m1` is examined in `coorset1`; the others always in their current state.
    pub fn interacting_monomers(
        &self,
        config: &Configuration,
        m1: usize,
        coorset1: CoorSet,
    ) -> Vec<usize> {
        let mut interacting: Vec<usize> = Vec::new();
        for m2 in 0..config.num_monomers() {
            if m2 == m1 {
                continue;
            }
            if self.monomers_interacting(config, m1, coorset1, m2, CoorSet::Current) {
                interacting.push(m2);
            }
        }

        return interacting;
    }

    /// Energy difference caused by moving monomer `m`: the sum over all other
    /// monomers of trial-state minus current-state pair energies
    pub fn monomer_diff(&self, config: &Configuration, m: usize) -> f64 {
        let mut de = 0.0;
        for j in 0..config.num_monomers() {
            if j == m {
                continue;
            }
            let ene1 = self.monomer_pair_energy(config, m, CoorSet::Current, j, CoorSet::Current);
            let ene2 = self.monomer_pair_energy(config, m, CoorSet::Trial, j, CoorSet::Current);
            de += ene2 - ene1;
        }

        return de;
    }
}
