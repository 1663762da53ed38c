use patchymc_numerical::{Matrix3x3, Vec3};

use crate::space::CuboidPbc;

/// Selects one of the two coordinate buffers held by every particle and monomer.
///
/// `Current` is the committed state of the Markov chain; `Trial` is the
/// in-progress proposal. A move mutates only the trial buffer and either
/// commits it or throws it away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoorSet {
    Current,
    Trial,
}

/// Patch direction vectors attached to a particle.
///
/// Up to three unit vectors; the ones a given particle form does not use
/// stay at zero and are never read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub patch_norm: Vec3,
    pub patch_orient: Vec3,
    pub patch_orient2: Vec3,
}

/// The closed set of particle variants.
///
/// The form decides which patch vectors a particle owns and therefore which
/// of them follow the particle under rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleForm {
    Simple,
    Patchy,
    OrientedPatchy,
    DoubleOrientedPatchy,
}

impl ParticleForm {
    /// Parses the form tag used in topology files
    pub fn from_tag(tag: &str) -> Option<ParticleForm> {
        match tag {
            "SimpleParticle" => Some(ParticleForm::Simple),
            "PatchyParticle" => Some(ParticleForm::Patchy),
            "OrientedPatchyParticle" => Some(ParticleForm::OrientedPatchy),
            "DoubleOrientedPatchyParticle" => Some(ParticleForm::DoubleOrientedPatchy),
            _ => None,
        }
    }

    /// The form tag used in topology files
    pub fn tag(&self) -> &'static str {
        match self {
            ParticleForm::Simple => "SimpleParticle",
            ParticleForm::Patchy => "PatchyParticle",
            ParticleForm::OrientedPatchy => "OrientedPatchyParticle",
            ParticleForm::DoubleOrientedPatchy => "DoubleOrientedPatchyParticle",
        }
    }
}

/// A single interaction centre of a monomer.
///
/// Holds a current and a trial copy of both position and orientation.
/// Transformations write only the trial buffers; the trial position is
/// wrapped back into the box after every transformation.
#[derive(Clone, Debug)]
pub struct Particle {
    index: usize,
    type_id: i32,
    form: ParticleForm,
    pos: Vec3,
    trial_pos: Vec3,
    ore: Orientation,
    trial_ore: Orientation,
}

impl Particle {
    pub fn new(index: usize, type_id: i32, form: ParticleForm, pos: Vec3, ore: Orientation) -> Particle {
        Particle {
            index,
            type_id,
            form,
            pos,
            trial_pos: pos,
            ore,
            trial_ore: ore,
        }
    }

    /// Index of this particle within its monomer
    pub fn index(&self) -> usize {
        self.index
    }

    /// Integer type keying the pair potential tables
    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn form(&self) -> ParticleForm {
        self.form
    }

    /// Position in the requested coordinate set
    pub fn pos(&self, coorset: CoorSet) -> &Vec3 {
        match coorset {
            CoorSet::Current => &self.pos,
            CoorSet::Trial => &self.trial_pos,
        }
    }

    /// Orientation in the requested coordinate set
    pub fn ore(&self, coorset: CoorSet) -> &Orientation {
        match coorset {
            CoorSet::Current => &self.ore,
            CoorSet::Trial => &self.trial_ore,
        }
    }

    /// Shifts the trial position by `disp` relative to the current position
    pub fn translate(&mut self, disp: &Vec3, space: &CuboidPbc) {
        self.trial_pos = space.wrap(&(self.pos + *disp));
    }

    /// Shifts the trial position by `disp` relative to the trial position.
    ///
    /// Used when unwrapping a monomer across a periodic boundary; the result
    /// deliberately stays unwrapped.
    pub fn shift_trial(&mut self, disp: &Vec3) {
        self.trial_pos += *disp;
    }

    /// Rotates the trial state by `rot_mat` about the point `rot_c`.
    ///
    /// The trial position is rotated in place; every patch vector this
    /// particle's form owns is read from the current orientation and the
    /// rotated copy written to the trial orientation, so an abandoned
    /// proposal needs no orientation restore.
    pub fn rotate(&mut self, rot_c: &Vec3, rot_mat: &Matrix3x3, space: &CuboidPbc) {
        let moved = rot_mat.mul_vec(&(self.trial_pos - *rot_c)) + *rot_c;
        self.trial_pos = space.wrap(&moved);
        match self.form {
            ParticleForm::Simple => {}
            ParticleForm::Patchy => {
                self.trial_ore.patch_norm = rot_mat.mul_vec(&self.ore.patch_norm);
            }
            ParticleForm::OrientedPatchy => {
                self.trial_ore.patch_norm = rot_mat.mul_vec(&self.ore.patch_norm);
                self.trial_ore.patch_orient = rot_mat.mul_vec(&self.ore.patch_orient);
            }
            ParticleForm::DoubleOrientedPatchy => {
                self.trial_ore.patch_norm = rot_mat.mul_vec(&self.ore.patch_norm);
                self.trial_ore.patch_orient = rot_mat.mul_vec(&self.ore.patch_orient);
                self.trial_ore.patch_orient2 = rot_mat.mul_vec(&self.ore.patch_orient2);
            }
        }
    }

    /// Commits the trial state
    pub fn trial_to_current(&mut self) {
        self.pos = self.trial_pos;
        self.ore = self.trial_ore;
    }

    /// Reverts the trial state to the committed one
    pub fn current_to_trial(&mut self) {
        self.trial_pos = self.pos;
        self.trial_ore = self.ore;
    }
}
