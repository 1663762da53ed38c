use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::Rng;
use thiserror::Error;

use patchymc_numerical::{random_unit_versor, Matrix3x3, Vec3};
use patchymc_system::{Configuration, CoorSet, ParticleForm};

/// Errors raised while setting up movetypes and movemaps
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("conformer flips address particles 0..3 but monomer {monomer} has only {count} particles")]
    FlipNeedsFourParticles { monomer: usize, count: usize },

    #[error("monomer {monomer} carries no patch vectors required by the conformer flip")]
    FlipNeedsPatchVectors { monomer: usize },

    #[error("movetype selection probabilities sum to {total}, which exceeds 1")]
    ProbabilitiesExceedOne { total: f64 },
}

/// A random displacement of width `max_disp` centred on zero
pub fn random_displacement(max_disp: f64, rng: &mut SmallRng) -> f64 {
    max_disp * (rng.gen_range(0.0..1.0) - 0.5)
}

/// A movemap samples a transformation from one monomer and can then apply
/// that same transformation to any monomer.
///
/// [`generate()`](Movemap::generate) draws fresh parameters from the monomer
/// passed to it; [`apply()`](Movemap::apply) replays the stored transformation
/// on the trial state of the given monomer. VMMC relies on this split: the
/// seed's transformation is applied unchanged to every recruited monomer.
pub trait Movemap {
    /// Samples a new transformation, parameterised by the given monomer
    fn generate(&mut self, monomer: usize, config: &Configuration, rng: &mut SmallRng);

    /// Applies the stored transformation to the trial state of the given monomer
    fn apply(&self, monomer: usize, config: &mut Configuration);
}

/// Rigid translation by a uniform random displacement vector
pub struct TranslationMovemap {
    max_disp_tc: f64,
    disp: Vec3,
}

impl TranslationMovemap {
    pub fn new(max_disp_tc: f64) -> TranslationMovemap {
        TranslationMovemap { max_disp_tc, disp: Vec3::default() }
    }
}

impl Movemap for TranslationMovemap {
    fn generate(&mut self, _monomer: usize, _config: &Configuration, rng: &mut SmallRng) {
        self.disp = Vec3::new(
            random_displacement(self.max_disp_tc, rng),
            random_displacement(self.max_disp_tc, rng),
            random_displacement(self.max_disp_tc, rng),
        );
    }

    fn apply(&self, monomer: usize, config: &mut Configuration) {
        config.translate_monomer(monomer, &self.disp);
    }
}

/// Rigid rotation about a random axis through a point near the monomer centre
pub struct RotationMovemap {
    max_disp_rc: f64,
    max_disp_a: f64,
    rot_c: Vec3,
    rot_mat: Matrix3x3,
}

impl RotationMovemap {
    pub fn new(max_disp_rc: f64, max_disp_a: f64) -> RotationMovemap {
        RotationMovemap {
            max_disp_rc,
            max_disp_a,
            rot_c: Vec3::default(),
            rot_mat: Matrix3x3::identity(),
        }
    }
}

impl Movemap for RotationMovemap {
    fn generate(&mut self, monomer: usize, config: &Configuration, rng: &mut SmallRng) {
        let rand_v = random_unit_versor(rng);
        let scalar = random_displacement(self.max_disp_rc, rng);
        let center = config.monomer(monomer).center(CoorSet::Current, config.space());
        self.rot_c = center + scalar * rand_v;
        let axis = random_unit_versor(rng);
        let theta = random_displacement(self.max_disp_a, rng);
        self.rot_mat = Matrix3x3::rotation_about_axis(&axis, theta);
    }

    fn apply(&self, monomer: usize, config: &mut Configuration) {
        config.rotate_monomer(monomer, &self.rot_c, &self.rot_mat);
    }
}

/// Reflection through one of four planes anchored at the monomer's head
/// particles, paired with a conformer flip.
///
/// The four planes are chosen with equal probability: the `patch_orient` of
/// particle 0, the `patch_norm` of particle 2, and each of those two rotated
/// by 90 degrees about the 0-1 or 2-3 interparticle axis respectively.
pub struct ConformerFlipMovemap {
    point_in_plane: Vec3,
    ref_mat: Matrix3x3,
}

impl ConformerFlipMovemap {
    /// Creates the movemap after checking the topology supports it.
    ///
    /// Every monomer must have at least four particles, with patch vectors on
    /// particles 0 and 2.
    pub fn new(config: &Configuration) -> Result<ConformerFlipMovemap, MoveError> {
        for monomer in config.monomers() {
            if monomer.num_particles() < 4 {
                return Err(MoveError::FlipNeedsFourParticles {
                    monomer: monomer.index(),
                    count: monomer.num_particles(),
                });
            }
            let p0_form = monomer.particles()[0].form();
            let p2_form = monomer.particles()[2].form();
            if !matches!(p0_form, ParticleForm::OrientedPatchy | ParticleForm::DoubleOrientedPatchy)
                || p2_form == ParticleForm::Simple
            {
                return Err(MoveError::FlipNeedsPatchVectors { monomer: monomer.index() });
            }
        }

        Ok(ConformerFlipMovemap {
            point_in_plane: Vec3::default(),
            ref_mat: Matrix3x3::identity(),
        })
    }
}

impl Movemap for ConformerFlipMovemap {
    fn generate(&mut self, monomer: usize, config: &Configuration, rng: &mut SmallRng) {
        let particles = config.monomer(monomer).particles();
        let r = rng.gen_range(0.0..1.0);
        let plane_normal;
        if r < 0.25 {
            let p = &particles[0];
            plane_normal = p.ore(CoorSet::Current).patch_orient;
            self.point_in_plane = *p.pos(CoorSet::Current);
        } else if r < 0.5 {
            let p = &particles[2];
            plane_normal = p.ore(CoorSet::Current).patch_norm;
            self.point_in_plane = *p.pos(CoorSet::Current);
        } else if r < 0.75 {
            let p1 = &particles[0];
            let p2 = &particles[1];
            let axis = config
                .interparticle_vector(p1, CoorSet::Current, p2, CoorSet::Current)
                .versor();
            let quarter_turn = Matrix3x3::rotation_about_axis(&axis, PI / 2.0);
            plane_normal = quarter_turn.mul_vec(&p1.ore(CoorSet::Current).patch_orient);
            self.point_in_plane = *p1.pos(CoorSet::Current);
        } else {
            let p1 = &particles[2];
            let p2 = &particles[3];
            let axis = config
                .interparticle_vector(p1, CoorSet::Current, p2, CoorSet::Current)
                .versor();
            let quarter_turn = Matrix3x3::rotation_about_axis(&axis, PI / 2.0);
            plane_normal = quarter_turn.mul_vec(&p1.ore(CoorSet::Current).patch_norm);
            self.point_in_plane = *p1.pos(CoorSet::Current);
        }
        self.ref_mat = Matrix3x3::reflection_in_plane(&plane_normal);
    }

    fn apply(&self, monomer: usize, config: &mut Configuration) {
        config.rotate_monomer(monomer, &self.point_in_plane, &self.ref_mat);
        config.monomer_mut(monomer).flip_conformation();
    }
}
