use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::Rng;

use patchymc_energy::Energy;
use patchymc_system::{Configuration, CoorSet};

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::movemaps::Movemap;
use crate::trait_movetype::Movetype;

/// Virtual-Move Monte Carlo cluster movetype (Whitelam-Geissler).
///
/// A seed monomer is perturbed by the movemap and its interaction partners
/// are recruited into a cluster through the symmetric prelink/link test. A
/// link that passes the forward test but fails the reverse one is frustrated;
/// any frustrated link left at the end of the traversal rejects the whole
/// move. Each recruited monomer gets the seed's transformation applied to its
/// trial state at most once per attempt.
pub struct VmmcMovetype {
    movemap: Box<dyn Movemap>,
    beta: f64,
    label: String,
    stats: AcceptanceStatistics,

    // Scratch state, cleared between attempts
    cluster: Vec<usize>,
    interacting_mis: HashSet<usize>,
    proposed_pairs: HashSet<(usize, usize)>,
    pair_mis: Vec<(usize, usize)>,
    frustrated_links: u32,
    frustrated_mis: Vec<usize>,
}

impl VmmcMovetype {
    /// # Arguments
    /// * `beta` - inverse temperature `1/kT`
    /// * `movemap` - the transformation shared by the whole cluster
    /// * `label` - name used for this movetype in logs
    pub fn new(beta: f64, movemap: Box<dyn Movemap>, label: &str) -> VmmcMovetype {
        VmmcMovetype {
            movemap,
            beta,
            label: label.to_string(),
            stats: Default::default(),
            cluster: Vec::new(),
            interacting_mis: HashSet::new(),
            proposed_pairs: HashSet::new(),
            pair_mis: Vec::new(),
            frustrated_links: 0,
            frustrated_mis: Vec::new(),
        }
    }

    /// Queues every untried pair between `m1` and its interaction partners.
    ///
    /// Partners are collected in both the current and the trial state of `m1`.
    /// A monomer encountered for the first time has the movemap applied, so
    /// that it carries a single candidate trial configuration for the rest of
    /// the attempt.
    fn add_interacting_pairs(&mut self, m1: usize, config: &mut Configuration, energy: &Energy) {
        let mut partners = energy.interacting_monomers(config, m1, CoorSet::Current);
        partners.extend(energy.interacting_monomers(config, m1, CoorSet::Trial));

        for m2 in partners {
            if self.cluster.contains(&m2) {
                continue;
            }
            let pair = (m1, m2);
            if !self.proposed_pairs.insert(pair) {
                continue;
            }
            if self.interacting_mis.insert(m2) {
                self.movemap.apply(m2, config);
            }
            self.pair_mis.push(pair);
        }
    }

    /// Removes and returns a uniformly random pair from the work list
    fn pop_random_pair(&mut self, rng: &mut SmallRng) -> (usize, usize) {
        let pair_i = rng.gen_range(0..self.pair_mis.len());

        return self.pair_mis.swap_remove(pair_i);
    }

    /// Forward or reverse prelink probability `max(0, 1 - exp(-beta dE))`.
    ///
    /// `ene1` is never infinite: the current state of the chain is finite by
    /// construction. An infinite perturbed energy gives probability one.
    fn prelink_prob(&self, ene1: f64, ene2: f64) -> f64 {
        if ene2 == f64::INFINITY {
            return 1.0;
        }

        return (1.0 - (-self.beta * (ene2 - ene1)).exp()).max(0.0);
    }

    fn accept_prelink(&self, prelink_p: f64, rng: &mut SmallRng) -> bool {
        if prelink_p == 0.0 {
            return false;
        }

        return prelink_p > rng.gen_range(0.0..1.0);
    }

    fn accept_link(&self, prelink_for_p: f64, prelink_rev_p: f64, rng: &mut SmallRng) -> bool {
        let p_accept = (prelink_rev_p / prelink_for_p).min(1.0);
        if p_accept == 1.0 {
            return true;
        }

        return p_accept > rng.gen_range(0.0..1.0);
    }

    fn reset_internal(&mut self) {
        self.cluster.clear();
        self.interacting_mis.clear();
        self.proposed_pairs.clear();
        self.pair_mis.clear();
        self.frustrated_links = 0;
        self.frustrated_mis.clear();
    }
}

impl Movetype for VmmcMovetype {
    fn attempt(&mut self, config: &mut Configuration, energy: &Energy, rng: &mut SmallRng) -> bool {
        let seed = config.random_monomer_index(rng);
        self.cluster.push(seed);
        self.interacting_mis.insert(seed);
        self.movemap.generate(seed, config, rng);
        self.movemap.apply(seed, config);
        self.add_interacting_pairs(seed, config, energy);

        while !self.pair_mis.is_empty() {
            let (m1, m2) = self.pop_random_pair(rng);
            if self.cluster.contains(&m2) {
                continue;
            }
            let ene_1 = energy.monomer_pair_energy(config, m1, CoorSet::Current, m2, CoorSet::Current);
            let ene_2 = energy.monomer_pair_energy(config, m1, CoorSet::Trial, m2, CoorSet::Current);
            let prelink_for_p = self.prelink_prob(ene_1, ene_2);
            if !self.accept_prelink(prelink_for_p, rng) {
                continue;
            }
            let ene_3 = energy.monomer_pair_energy(config, m1, CoorSet::Current, m2, CoorSet::Trial);
            let prelink_rev_p = self.prelink_prob(ene_1, ene_3);
            if !self.accept_link(prelink_for_p, prelink_rev_p, rng) {
                self.frustrated_links += 1;
                self.frustrated_mis.push(m2);
                continue;
            }
            if let Some(pos) = self.frustrated_mis.iter().position(|&mi| mi == m2) {
                self.frustrated_links -= 1;
                self.frustrated_mis.remove(pos);
            }
            self.cluster.push(m2);
            self.add_interacting_pairs(m2, config, energy);
        }

        let accepted = self.frustrated_links == 0;
        if accepted {
            self.stats.n_succ += 1;
            for &mi in &self.cluster {
                config.monomer_mut(mi).trial_to_current();
            }
        } else {
            self.stats.n_failed += 1;
        }
        // Every monomer that was ever moved gets its trial state restored,
        // whether the cluster was committed or not
        for &mi in &self.interacting_mis {
            config.monomer_mut(mi).current_to_trial();
        }
        self.reset_internal();

        return accepted;
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn statistics(&self) -> AcceptanceStatistics {
        self.stats.clone()
    }
}
