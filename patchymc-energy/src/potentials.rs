use patchymc_numerical::Vec3;
use patchymc_system::Orientation;

/// The angular modulation factor `exp(-theta^2 / (2 sigma^2))`
pub fn gaussian(theta: f64, sig: f64) -> f64 {
    (-theta * theta / (2.0 * sig * sig)).exp()
}

/// Angle between two patch-orient vectors projected off the interparticle axis.
///
/// Each vector is projected onto the plane perpendicular to `p_diff` (using
/// the axis direction appropriate for its particle) and the angle between the
/// projections is returned. The cosine is clamped to `[-1, 1]` before `acos`.
pub fn dihedral(ore1: &Vec3, ore2: &Vec3, p_diff: &Vec3) -> f64 {
    let unit_ij = *p_diff / p_diff.length();
    let unit_ji = -unit_ij;
    let rej1 = *ore1 - ore1.dot(&unit_ij) * unit_ij;
    let rej2 = *ore2 - ore2.dot(&unit_ji) * unit_ji;
    let mut rat = rej1.dot(&rej2) / (rej1.length() * rej2.length());
    rat = rat.clamp(-1.0, 1.0);

    return rat.acos();
}

/// Shifted Lennard-Jones parameters with the constants precomputed once
#[derive(Clone, Debug)]
pub struct ShiftedLJ {
    pub eps: f64,
    pub sigl: f64,
    pub rcut: f64,
    four_eps: f64,
    shift: f64,
}

impl ShiftedLJ {
    pub fn new(eps: f64, sigl: f64, rcut: f64) -> ShiftedLJ {
        let four_eps = 4.0 * eps;
        let sig_r_ratio = sigl / rcut;
        let shift = four_eps * (sig_r_ratio.powi(12) - sig_r_ratio.powi(6));

        ShiftedLJ { eps, sigl, rcut, four_eps, shift }
    }

    pub fn energy(&self, rdist: f64) -> f64 {
        if rdist >= self.rcut {
            return 0.0;
        }
        let sig_r_ratio = self.sigl / rdist;

        return self.four_eps * (sig_r_ratio.powi(12) - sig_r_ratio.powi(6)) - self.shift;
    }
}

/// Harmonic well parameters, `a r^2 - eps` inside the cutoff
#[derive(Clone, Debug)]
pub struct HarmonicWell {
    pub eps: f64,
    pub rcut: f64,
    a: f64,
}

impl HarmonicWell {
    pub fn new(eps: f64, rcut: f64) -> HarmonicWell {
        HarmonicWell { eps, rcut, a: eps / (rcut * rcut) }
    }

    pub fn energy(&self, rdist: f64) -> f64 {
        if rdist < self.rcut {
            return self.a * rdist * rdist - self.eps;
        }

        return 0.0;
    }
}

/// Patchy parameters: a shifted LJ radial part modulated by two patch-normal angles
#[derive(Clone, Debug)]
pub struct Patchy {
    pub lj: ShiftedLJ,
    pub siga1: f64,
    pub siga2: f64,
}

impl Patchy {
    pub fn new(eps: f64, sigl: f64, rcut: f64, siga1: f64, siga2: f64) -> Patchy {
        Patchy { lj: ShiftedLJ::new(eps, sigl, rcut), siga1, siga2 }
    }

    pub fn energy(&self, rdist: f64, p_diff: &Vec3, ore1: &Orientation, ore2: &Orientation) -> f64 {
        let mut ene = self.lj.energy(rdist);
        // Below the LJ diameter, or with no radial contribution at all, the
        // angular factors must not be evaluated
        if rdist < self.lj.sigl || ene == 0.0 {
            return ene;
        }
        let unit_ij = *p_diff / rdist;
        let unit_ji = -unit_ij;
        let dot1 = unit_ij.dot(&ore1.patch_norm).clamp(-1.0, 1.0);
        let dot2 = unit_ji.dot(&ore2.patch_norm).clamp(-1.0, 1.0);
        ene *= gaussian(dot1.acos(), self.siga1);
        ene *= gaussian(dot2.acos(), self.siga2);

        return ene;
    }
}

/// A pair potential between two particles.
///
/// Every variant exposes the scalar energy for a given separation (plus the
/// interparticle vector and both orientations for the angularly modulated
/// forms) and an interaction predicate `r < r_cut`.
#[derive(Clone, Debug)]
pub enum PairPotential {
    Zero,
    HardSphere { sigh: f64 },
    SquareWell { eps: f64, rcut: f64 },
    HarmonicWell(HarmonicWell),
    AngularHarmonicWell { hwell: HarmonicWell, siga: f64 },
    ShiftedLJ(ShiftedLJ),
    Patchy(Patchy),
    OrientedPatchy { patchy: Patchy, sigt: f64 },
    DoubleOrientedPatchy { patchy: Patchy, sigt: f64 },
}

impl PairPotential {
    /// Cutoff distance beyond which this potential is exactly zero.
    ///
    /// For the hard sphere this is the hard radius itself.
    pub fn cutoff(&self) -> f64 {
        match self {
            PairPotential::Zero => 0.0,
            PairPotential::HardSphere { sigh } => *sigh,
            PairPotential::SquareWell { rcut, .. } => *rcut,
            PairPotential::HarmonicWell(hwell) => hwell.rcut,
            PairPotential::AngularHarmonicWell { hwell, .. } => hwell.rcut,
            PairPotential::ShiftedLJ(lj) => lj.rcut,
            PairPotential::Patchy(patchy) => patchy.lj.rcut,
            PairPotential::OrientedPatchy { patchy, .. } => patchy.lj.rcut,
            PairPotential::DoubleOrientedPatchy { patchy, .. } => patchy.lj.rcut,
        }
    }

    /// Whether two particles at distance `rdist` interact through this potential
    pub fn interacting(&self, rdist: f64) -> bool {
        match self {
            PairPotential::Zero => false,
            _ => rdist < self.cutoff(),
        }
    }

    /// Pair energy for the scalar distance `rdist`.
    ///
    /// # Arguments
    /// * `rdist` - scalar distance between the particles
    /// * `p_diff` - minimum-image vector between the particle positions, pointing
    ///    from the first particle towards the second
    /// * `ore1`, `ore2` - patch vectors of the two particles
    pub fn energy(&self, rdist: f64, p_diff: &Vec3, ore1: &Orientation, ore2: &Orientation) -> f64 {
        match self {
            PairPotential::Zero => 0.0,
            PairPotential::HardSphere { sigh } => {
                if rdist < *sigh {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            PairPotential::SquareWell { eps, rcut } => {
                if rdist < *rcut {
                    *eps
                } else {
                    0.0
                }
            }
            PairPotential::HarmonicWell(hwell) => hwell.energy(rdist),
            PairPotential::AngularHarmonicWell { hwell, siga } => {
                let ene = hwell.energy(rdist);
                if ene == 0.0 {
                    return ene;
                }
                let dot = ore1.patch_norm.dot(&ore2.patch_norm).clamp(-1.0, 1.0);

                return ene * gaussian(dot.acos(), *siga);
            }
            PairPotential::ShiftedLJ(lj) => lj.energy(rdist),
            PairPotential::Patchy(patchy) => patchy.energy(rdist, p_diff, ore1, ore2),
            PairPotential::OrientedPatchy { patchy, sigt } => {
                let ene = patchy.energy(rdist, p_diff, ore1, ore2);
                if rdist < patchy.lj.sigl || ene == 0.0 {
                    return ene;
                }
                let theta = dihedral(&ore1.patch_orient, &ore2.patch_orient, p_diff);

                return ene * gaussian(theta, *sigt);
            }
            PairPotential::DoubleOrientedPatchy { patchy, sigt } => {
                let mut ene = patchy.energy(rdist, p_diff, ore1, ore2);
                if rdist < patchy.lj.sigl || ene == 0.0 {
                    return ene;
                }
                ene *= gaussian(dihedral(&ore1.patch_orient, &ore2.patch_orient, p_diff), *sigt);
                ene *= gaussian(dihedral(&ore1.patch_orient2, &ore2.patch_orient2, p_diff), *sigt);

                return ene;
            }
        }
    }
}
