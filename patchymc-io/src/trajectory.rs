use std::io::Write;

use patchymc_sim::Observer;
use patchymc_system::{Configuration, CoorSet};

use crate::utils::out_writer;

fn write_structure(out: &mut Box<dyn Write>, conf: &Configuration) {
    let mut serial = 0;
    for monomer in conf.monomers() {
        for particle in monomer.particles() {
            out.write(
                format!(
                    "atom {} type {} resid {} radius {}\n",
                    serial,
                    particle.type_id(),
                    monomer.index(),
                    conf.radius()
                )
                .as_bytes(),
            )
            .ok();
            serial += 1;
        }
    }
    let l = conf.box_len();
    out.write(format!("\npbc {} {} {}\n\n", l, l, l).as_bytes()).ok();
}

fn write_timestep(out: &mut Box<dyn Write>, conf: &Configuration) {
    out.write("t\n".as_bytes()).ok();
    for monomer in conf.monomers() {
        for particle in monomer.particles() {
            let pos = particle.pos(CoorSet::Current);
            out.write(format!("{} {} {}\n", pos.x, pos.y, pos.z).as_bytes()).ok();
        }
    }
    out.write("\n".as_bytes()).ok();
}

/// Observes conformations of a [`Configuration`](Configuration).
///
/// Writes a VTF trajectory: the structure block once, then every
/// [`observe()`](Observer::observe) call appends one timestep frame with the
/// current particle positions.
pub struct VtfTrajectory {
    pub fname: String,
    i_frame: usize,
}

impl VtfTrajectory {
    /// Creates a new observer writing frames to the file `fname`
    pub fn new(fname: &str) -> VtfTrajectory {
        VtfTrajectory { fname: fname.to_string(), i_frame: 0 }
    }
}

impl Observer for VtfTrajectory {
    type S = Configuration;

    fn observe(&mut self, object: &Self::S) {
        let mut out = out_writer(&self.fname, self.i_frame > 0);
        if self.i_frame == 0 {
            write_structure(&mut out, object);
        }
        write_timestep(&mut out, object);
        self.i_frame += 1;
    }

    fn flush(&mut self) {}
}

/// Writes the VSF structure block once, on the first observation
pub struct VsfStructure {
    pub fname: String,
    written: bool,
}

impl VsfStructure {
    pub fn new(fname: &str) -> VsfStructure {
        VsfStructure { fname: fname.to_string(), written: false }
    }
}

impl Observer for VsfStructure {
    type S = Configuration;

    fn observe(&mut self, object: &Self::S) {
        if self.written {
            return;
        }
        let mut out = out_writer(&self.fname, false);
        write_structure(&mut out, object);
        self.written = true;
    }

    fn flush(&mut self) {}
}

/// Appends one VCF coordinate frame per observation
pub struct VcfTrajectory {
    pub fname: String,
    i_frame: usize,
}

impl VcfTrajectory {
    pub fn new(fname: &str) -> VcfTrajectory {
        VcfTrajectory { fname: fname.to_string(), i_frame: 0 }
    }
}

impl Observer for VcfTrajectory {
    type S = Configuration;

    fn observe(&mut self, object: &Self::S) {
        let mut out = out_writer(&self.fname, self.i_frame > 0);
        write_timestep(&mut out, object);
        self.i_frame += 1;
    }

    fn flush(&mut self) {}
}

/// Appends one line per observation with the patch vectors of every particle.
///
/// Each particle contributes nine numbers: `patch_norm`, `patch_orient` and
/// `patch_orient2`, whether or not its form uses them.
pub struct PatchTrajectory {
    pub fname: String,
    i_frame: usize,
}

impl PatchTrajectory {
    pub fn new(fname: &str) -> PatchTrajectory {
        PatchTrajectory { fname: fname.to_string(), i_frame: 0 }
    }
}

impl Observer for PatchTrajectory {
    type S = Configuration;

    fn observe(&mut self, object: &Self::S) {
        let mut out = out_writer(&self.fname, self.i_frame > 0);
        for monomer in object.monomers() {
            for particle in monomer.particles() {
                let ore = particle.ore(CoorSet::Current);
                for v in [&ore.patch_norm, &ore.patch_orient, &ore.patch_orient2] {
                    out.write(format!("{} {} {} ", v.x, v.y, v.z).as_bytes()).ok();
                }
            }
        }
        out.write("\n".as_bytes()).ok();
        self.i_frame += 1;
    }

    fn flush(&mut self) {}
}
