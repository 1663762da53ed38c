use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use patchymc_energy::{InteractionData, PotentialData};
use patchymc_system::MonomerData;

/// Errors raised while reading input files
#[derive(Debug, Error)]
pub enum InputError {
    #[error("can't open {path}: {source}")]
    Open { path: String, source: std::io::Error },

    #[error("can't parse {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
}

/// The contents of a topology file: the box, the bead radius and all monomers
#[derive(Clone, Debug)]
pub struct Topology {
    pub box_len: f64,
    pub radius: f64,
    pub monomers: Vec<MonomerData>,
}

#[derive(Deserialize)]
struct TopologyFile {
    cgmonomer: TopologySection,
}

#[derive(Deserialize)]
struct TopologySection {
    box_len: f64,
    radius: f64,
    config: Vec<MonomerData>,
}

/// The contents of an energy file: potentials plus the two conformer tables
#[derive(Clone, Debug)]
pub struct EnergyTables {
    pub potentials: Vec<PotentialData>,
    pub same_conformers: Vec<InteractionData>,
    pub different_conformers: Vec<InteractionData>,
}

#[derive(Deserialize)]
struct EnergyFile {
    cgmonomer: EnergySection,
}

#[derive(Deserialize)]
struct EnergySection {
    energy: RawEnergyTables,
}

#[derive(Deserialize)]
struct RawEnergyTables {
    potentials: Vec<PotentialData>,
    #[serde(default)]
    same_conformers_interactions: Vec<InteractionData>,
    #[serde(default)]
    different_conformers_interactions: Vec<InteractionData>,
    /// Legacy single table applying regardless of conformers
    #[serde(default)]
    interactions: Vec<InteractionData>,
}

fn open_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Reads a JSON topology file.
///
/// The file holds the box edge length, the common bead radius and one record
/// per monomer with its starting conformer and particles.
pub fn read_topology<P: AsRef<Path>>(path: P) -> Result<Topology, InputError> {
    let parsed: TopologyFile = open_json(path.as_ref())?;
    let section = parsed.cgmonomer;
    info!(
        "Read {} monomers from {}",
        section.config.len(),
        path.as_ref().display()
    );

    Ok(Topology {
        box_len: section.box_len,
        radius: section.radius,
        monomers: section.config,
    })
}

/// Reads a JSON energy file.
///
/// Interactions may be given separately for same-conformer and
/// different-conformer monomer pairs; records in the legacy `interactions`
/// table are registered in both.
pub fn read_energy<P: AsRef<Path>>(path: P) -> Result<EnergyTables, InputError> {
    let parsed: EnergyFile = open_json(path.as_ref())?;
    let raw = parsed.cgmonomer.energy;
    let mut same = raw.same_conformers_interactions;
    let mut different = raw.different_conformers_interactions;
    for i_data in raw.interactions {
        same.push(i_data.clone());
        different.push(i_data);
    }
    info!(
        "Read {} potentials from {}",
        raw.potentials.len(),
        path.as_ref().display()
    );

    Ok(EnergyTables {
        potentials: raw.potentials,
        same_conformers: same,
        different_conformers: different,
    })
}
