use patchymc_numerical::{Matrix3x3, Vec3};

use crate::particle::{CoorSet, Particle};
use crate::space::CuboidPbc;

/// A rigid body made of an ordered set of particles.
///
/// The monomer is the unit of motion: all Monte Carlo transformations act on
/// whole monomers. Besides its particles a monomer carries a conformer label
/// in `{+1, -1}` (double-buffered like the coordinates) and a bounding radius
/// cached at construction.
#[derive(Clone, Debug)]
pub struct Monomer {
    index: usize,
    conformer: i32,
    trial_conformer: i32,
    particles: Vec<Particle>,
    radius: f64,
}

impl Monomer {
    /// Assembles a monomer and caches its bounding radius.
    ///
    /// The radius is the largest distance of any particle from the geometric
    /// centre, measured in the current state.
    pub fn new(index: usize, conformer: i32, particles: Vec<Particle>, space: &CuboidPbc) -> Monomer {
        let mut monomer = Monomer {
            index,
            conformer,
            trial_conformer: conformer,
            particles,
            radius: 0.0,
        };
        let center = monomer.center(CoorSet::Current, space);
        let mut max_d: f64 = 0.0;
        for p in &monomer.particles {
            let d = space.dist(p.pos(CoorSet::Current), &center);
            if d > max_d {
                max_d = d;
            }
        }
        monomer.radius = max_d;

        return monomer;
    }

    /// Index of this monomer, unique across the configuration
    pub fn index(&self) -> usize {
        self.index
    }

    /// Conformer label in the requested coordinate set
    pub fn conformer(&self, coorset: CoorSet) -> i32 {
        match coorset {
            CoorSet::Current => self.conformer,
            CoorSet::Trial => self.trial_conformer,
        }
    }

    /// Bounding radius cached at construction
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Geometric centre of the monomer in the requested coordinate set.
    ///
    /// Particles are walked in order and each position is unwrapped against
    /// the previous one, so the centre comes out right even when the monomer
    /// straddles a periodic boundary. The mean is wrapped back into the box.
    pub fn center(&self, coorset: CoorSet, space: &CuboidPbc) -> Vec3 {
        let mut prev = *self.particles[0].pos(coorset);
        let mut center = prev;
        for p in &self.particles[1..] {
            let image = space.unwrap(&prev, p.pos(coorset));
            center += image;
            prev = image;
        }
        center = center / self.particles.len() as f64;

        return space.wrap(&center);
    }

    /// Applies a translation to the trial state of every particle
    pub fn translate(&mut self, disp: &Vec3, space: &CuboidPbc) {
        for p in self.particles.iter_mut() {
            p.translate(disp, space);
        }
    }

    /// Rotates the trial state of every particle by `rot_mat` about `rot_c`.
    ///
    /// The monomer is unwrapped towards the rotation centre first so that the
    /// rotation is applied to a contiguous image of the body.
    pub fn rotate(&mut self, rot_c: &Vec3, rot_mat: &Matrix3x3, space: &CuboidPbc) {
        self.unwrap_towards(rot_c, space);
        for p in self.particles.iter_mut() {
            p.rotate(rot_c, rot_mat, space);
        }
    }

    /// Moves the trial image of the whole monomer next to `reference`.
    ///
    /// If the trial centre is on the far side of a boundary relative to
    /// `reference`, every particle's trial position is shifted by a whole box
    /// length so that the body is contiguous around the reference point.
    pub fn unwrap_towards(&mut self, reference: &Vec3, space: &CuboidPbc) {
        let center = self.center(CoorSet::Trial, space);
        let unwrapped = space.unwrap(reference, &center);
        let shift = unwrapped - center;
        if shift.length_squared() > 0.0 {
            for p in self.particles.iter_mut() {
                p.shift_trial(&shift);
            }
        }
    }

    /// Flips the trial conformer label.
    ///
    /// Callers pair this with a reflection that realises the geometric flip.
    pub fn flip_conformation(&mut self) {
        self.trial_conformer = -self.conformer;
    }

    /// Commits the trial state of the conformer and of every particle
    pub fn trial_to_current(&mut self) {
        self.conformer = self.trial_conformer;
        for p in self.particles.iter_mut() {
            p.trial_to_current();
        }
    }

    /// Reverts the trial state of the conformer and of every particle
    pub fn current_to_trial(&mut self) {
        self.trial_conformer = self.conformer;
        for p in self.particles.iter_mut() {
            p.current_to_trial();
        }
    }
}
