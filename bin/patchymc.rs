use std::env;
use std::error::Error;
use std::time::Duration;

use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use patchymc_energy::Energy;
use patchymc_io::{read_energy, read_topology, PatchTrajectory, VtfTrajectory};
use patchymc_montecarlo::{
    ConformerFlipMovemap, MetropolisMovetype, NvtSimulation, RotationMovemap, TranslationMovemap,
    VmmcMovetype,
};
use patchymc_sim::ObserversSet;
use patchymc_system::Configuration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Patchy-particle Monte Carlo simulation in the NVT ensemble
/// say patchymc -h to see options
struct Args {
    /// system topology in JSON format
    #[clap(short = 'c', long, required = true)]
    config_filename: String,
    /// pair potentials and interaction tables in JSON format
    #[clap(short = 'e', long, required = true)]
    energy_filename: String,
    /// temperature in units of the Boltzmann constant
    #[clap(long, default_value_t = 300.0)]
    temp: f64,
    /// number of Monte Carlo steps
    #[clap(short = 'n', long, default_value_t = 1_000_000)]
    steps: u64,
    /// wall-clock budget in seconds; 0 runs without a budget
    #[clap(long, default_value_t = 0)]
    max_duration: u64,
    /// maximum displacement for translations
    #[clap(long, default_value_t = 1.0)]
    max_disp_tc: f64,
    /// maximum displacement for selecting the centre of rotation
    #[clap(long, default_value_t = 1.0)]
    max_disp_rc: f64,
    /// maximum displacement for selecting the rotation angle
    #[clap(long, default_value_t = 1.0)]
    max_disp_a: f64,
    /// selection probability of single-monomer translations
    #[clap(long, default_value_t = 0.0)]
    translation_met: f64,
    /// selection probability of single-monomer rotations
    #[clap(long, default_value_t = 0.0)]
    rotation_met: f64,
    /// selection probability of VMMC cluster translations
    #[clap(long, default_value_t = 0.0)]
    translation_vmmc: f64,
    /// selection probability of VMMC cluster rotations
    #[clap(long, default_value_t = 0.0)]
    rotation_vmmc: f64,
    /// selection probability of conformer flips
    #[clap(long, default_value_t = 0.0)]
    ntd_flip: f64,
    /// base name for the output files
    #[clap(short = 'o', long, default_value = "run")]
    output_filebase: String,
    /// log move statistics every that many steps; 0 disables it
    #[clap(long, default_value_t = 0)]
    logging_freq: u64,
    /// write a trajectory frame every that many steps; 0 disables output
    #[clap(long, default_value_t = 0)]
    config_output_freq: u32,
    /// PRNG seed; drawn from entropy when not given
    #[clap(long)]
    seed: Option<u64>,
    /// be more verbose and log program actions on the screen
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    // ---------- the system and its energy function
    let topology = read_topology(&args.config_filename)?;
    let mut config = Configuration::new(topology.monomers, topology.box_len, topology.radius)?;
    let tables = read_energy(&args.energy_filename)?;
    let energy = Energy::new(
        &config,
        &tables.potentials,
        &tables.same_conformers,
        &tables.different_conformers,
    )?;
    info!(
        "System of {} monomers ({} particles) in a box of length {}",
        config.num_monomers(),
        config.num_particles(),
        config.box_len()
    );
    info!("Starting energy: {}", energy.total_energy(&config));

    // ---------- movetypes, selected by cumulative probability
    let beta = 1.0 / args.temp;
    let mut sim = NvtSimulation::new(args.steps, args.logging_freq);
    if args.translation_met > 0.0 {
        sim.add_movetype(
            Box::new(MetropolisMovetype::new(
                beta,
                Box::new(TranslationMovemap::new(args.max_disp_tc)),
                "translation",
            )),
            args.translation_met,
        )?;
    }
    if args.rotation_met > 0.0 {
        sim.add_movetype(
            Box::new(MetropolisMovetype::new(
                beta,
                Box::new(RotationMovemap::new(args.max_disp_rc, args.max_disp_a)),
                "rotation",
            )),
            args.rotation_met,
        )?;
    }
    if args.translation_vmmc > 0.0 {
        sim.add_movetype(
            Box::new(VmmcMovetype::new(
                beta,
                Box::new(TranslationMovemap::new(args.max_disp_tc)),
                "translation-vmmc",
            )),
            args.translation_vmmc,
        )?;
    }
    if args.rotation_vmmc > 0.0 {
        sim.add_movetype(
            Box::new(VmmcMovetype::new(
                beta,
                Box::new(RotationMovemap::new(args.max_disp_rc, args.max_disp_a)),
                "rotation-vmmc",
            )),
            args.rotation_vmmc,
        )?;
    }
    if args.ntd_flip > 0.0 {
        sim.add_movetype(
            Box::new(MetropolisMovetype::new(
                beta,
                Box::new(ConformerFlipMovemap::new(&config)?),
                "ntdflip",
            )),
            args.ntd_flip,
        )?;
    }
    if args.max_duration > 0 {
        sim.set_max_duration(Duration::from_secs(args.max_duration));
    }

    // ---------- trajectory output
    let mut observers: ObserversSet<Configuration> = ObserversSet::new();
    if args.config_output_freq > 0 {
        let vtf_name = format!("{}.vtf", args.output_filebase);
        let patch_name = format!("{}.patch", args.output_filebase);
        observers.add_observer(Box::new(VtfTrajectory::new(&vtf_name)), args.config_output_freq);
        observers.add_observer(Box::new(PatchTrajectory::new(&patch_name)), args.config_output_freq);
    }

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    sim.run(&mut config, &energy, &mut rng, &mut observers);
    info!("Final energy: {}", energy.total_energy(&config));

    Ok(())
}
