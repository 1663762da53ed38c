use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use patchymc_numerical::{Matrix3x3, Vec3};

use crate::monomer::Monomer;
use crate::particle::{CoorSet, Orientation, Particle, ParticleForm};
use crate::space::CuboidPbc;

/// Errors raised while assembling a [`Configuration`](Configuration)
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("unknown particle form tag: {form}")]
    UnknownParticleForm { form: String },

    #[error("monomer {monomer} has conformer {conformer}; expected +1 or -1")]
    BadConformer { monomer: usize, conformer: i32 },

    #[error("monomer {monomer} has no particles")]
    EmptyMonomer { monomer: usize },
}

/// One particle record of a topology input
#[derive(Clone, Debug, Deserialize)]
pub struct ParticleData {
    pub index: usize,
    #[serde(default)]
    pub domain: String,
    pub form: String,
    #[serde(rename = "type")]
    pub type_id: i32,
    pub pos: [f64; 3],
    #[serde(default)]
    pub patch_norm: Option<[f64; 3]>,
    #[serde(default)]
    pub patch_orient: Option<[f64; 3]>,
    #[serde(default)]
    pub patch_orient2: Option<[f64; 3]>,
}

/// One monomer record of a topology input
#[derive(Clone, Debug, Deserialize)]
pub struct MonomerData {
    pub index: usize,
    pub conformer: i32,
    pub particles: Vec<ParticleData>,
}

fn vec3_from(a: [f64; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

/// The complete state of the simulated system.
///
/// Owns every monomer and the periodic box; all minimum-image queries between
/// particles or monomers go through here. Monomer indices run `0..N-1` and
/// match positions in the owned vector.
#[derive(Clone, Debug)]
pub struct Configuration {
    space: CuboidPbc,
    monomers: Vec<Monomer>,
    box_len: f64,
    radius: f64,
}

impl Configuration {
    /// Builds a configuration from monomer records.
    ///
    /// # Arguments
    /// * `monomer_data` - monomer records, ordered by index
    /// * `box_len` - edge length of the cubic periodic box
    /// * `radius` - the common bead radius, used only for output
    pub fn new(
        monomer_data: Vec<MonomerData>,
        box_len: f64,
        radius: f64,
    ) -> Result<Configuration, SystemError> {
        let space = CuboidPbc::new(box_len);
        let mut monomers: Vec<Monomer> = Vec::with_capacity(monomer_data.len());
        for m_data in monomer_data {
            if m_data.conformer != 1 && m_data.conformer != -1 {
                return Err(SystemError::BadConformer {
                    monomer: m_data.index,
                    conformer: m_data.conformer,
                });
            }
            if m_data.particles.is_empty() {
                return Err(SystemError::EmptyMonomer { monomer: m_data.index });
            }
            let mut particles: Vec<Particle> = Vec::with_capacity(m_data.particles.len());
            for p_data in &m_data.particles {
                let form = ParticleForm::from_tag(&p_data.form).ok_or_else(|| {
                    SystemError::UnknownParticleForm { form: p_data.form.clone() }
                })?;
                let mut ore = Orientation::default();
                if let Some(v) = p_data.patch_norm {
                    ore.patch_norm = vec3_from(v);
                }
                if let Some(v) = p_data.patch_orient {
                    ore.patch_orient = vec3_from(v);
                }
                if let Some(v) = p_data.patch_orient2 {
                    ore.patch_orient2 = vec3_from(v);
                }
                particles.push(Particle::new(
                    p_data.index,
                    p_data.type_id,
                    form,
                    space.wrap(&vec3_from(p_data.pos)),
                    ore,
                ));
            }
            monomers.push(Monomer::new(m_data.index, m_data.conformer, particles, &space));
        }

        Ok(Configuration { space, monomers, box_len, radius })
    }

    /// The periodic box shared by all monomers
    pub fn space(&self) -> &CuboidPbc {
        &self.space
    }

    /// Edge length of the simulation box
    pub fn box_len(&self) -> f64 {
        self.box_len
    }

    /// The common bead radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn num_monomers(&self) -> usize {
        self.monomers.len()
    }

    /// Total number of particles over all monomers
    pub fn num_particles(&self) -> usize {
        self.monomers.iter().map(|m| m.num_particles()).sum()
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    pub fn monomer(&self, index: usize) -> &Monomer {
        &self.monomers[index]
    }

    pub fn monomer_mut(&mut self, index: usize) -> &mut Monomer {
        &mut self.monomers[index]
    }

    /// Draws a monomer index uniformly at random
    pub fn random_monomer_index<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.monomers.len())
    }

    /// Applies a trial translation to one monomer
    pub fn translate_monomer(&mut self, index: usize, disp: &Vec3) {
        self.monomers[index].translate(disp, &self.space);
    }

    /// Applies a trial rotation about `rot_c` to one monomer
    pub fn rotate_monomer(&mut self, index: usize, rot_c: &Vec3, rot_mat: &Matrix3x3) {
        self.monomers[index].rotate(rot_c, rot_mat, &self.space);
    }

    /// Minimum-image vector from `p2` to `p1`
    pub fn interparticle_vector(
        &self,
        p1: &Particle,
        coorset1: CoorSet,
        p2: &Particle,
        coorset2: CoorSet,
    ) -> Vec3 {
        self.space.diff(p1.pos(coorset1), p2.pos(coorset2))
    }

    /// Minimum-image distance between two particles
    pub fn particle_dist(
        &self,
        p1: &Particle,
        coorset1: CoorSet,
        p2: &Particle,
        coorset2: CoorSet,
    ) -> f64 {
        self.space.dist(p1.pos(coorset1), p2.pos(coorset2))
    }

    /// Minimum-image distance between the centres of two monomers
    pub fn monomer_dist(
        &self,
        m1: usize,
        coorset1: CoorSet,
        m2: usize,
        coorset2: CoorSet,
    ) -> f64 {
        let c1 = self.monomers[m1].center(coorset1, &self.space);
        let c2 = self.monomers[m2].center(coorset2, &self.space);

        return self.space.dist(&c1, &c2);
    }
}
