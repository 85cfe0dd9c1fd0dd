//! Command-line front-end for the `saxs` distance-histogram engine
use clap::{Parser, Subcommand, ValueEnum};
use saxs_histogram::{MonolithicHistogramManager, PartialHistogramManager, ScatteringProfile};
use saxs_molecule::{Atom, Body, FormFactor, Molecule, SymmetryOperation};
use saxs_settings::{EngineConfig, HistogramVariant, QAxis};

/// Compute a small-angle X-ray scattering profile for a synthetic structure
#[derive(Parser, Debug)]
#[command(name = "saxs", version, about = "Distance-histogram SAXS engine")]
struct Args {
    #[command(subcommand)]
    structure: Structure,

    /// Distance-bin width, in Angstrom
    #[arg(long, default_value_t = 0.1)]
    bin_width: f64,

    /// Maximum resolvable distance, in Angstrom
    #[arg(long, default_value_t = 50.0)]
    d_max: f64,

    /// Number of points on the logarithmic q-axis
    #[arg(long, default_value_t = 100)]
    q_points: usize,

    /// Lowest q value, inverse Angstrom
    #[arg(long, default_value_t = 1e-2)]
    q_min: f64,

    /// Highest q value, inverse Angstrom
    #[arg(long, default_value_t = 1.0)]
    q_max: f64,

    /// Histogram manager variant
    #[arg(long, value_enum, default_value = "partial-mt")]
    variant: Variant,

    /// Worker threads for the pairwise-distance pool (default: available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Increase logging verbosity (-v, -vv, ...)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Structure {
    /// Eight unit-weight carbon atoms at the corners of a 2x2x2 Angstrom cube
    Cube,
    /// The same cube plus a ninth atom at its center
    CubeCenter,
    /// A single atom replicated once by a P2 symmetry operation
    SymmetricPair,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Variant {
    Monolithic,
    MonolithicMt,
    Partial,
    PartialMt,
}

impl From<Variant> for HistogramVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Monolithic => HistogramVariant::Monolithic,
            Variant::MonolithicMt => HistogramVariant::MonolithicMT,
            Variant::Partial => HistogramVariant::Partial,
            Variant::PartialMt => HistogramVariant::PartialMT,
        }
    }
}

fn build_molecule(structure: Structure) -> Molecule {
    match structure {
        Structure::Cube => Molecule::new(vec![Body::new(cube_atoms())]),
        Structure::CubeCenter => {
            let mut atoms = cube_atoms();
            atoms.push(Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C));
            Molecule::new(vec![Body::new(atoms)])
        }
        Structure::SymmetricPair => {
            let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1);
            let body = Body::new(vec![Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C)]).with_symmetry(vec![op]);
            Molecule::new(vec![body])
        }
    }
}

fn cube_atoms() -> Vec<Atom> {
    let mut atoms = Vec::with_capacity(8);
    for &x in &[-1.0, 1.0] {
        for &y in &[-1.0, 1.0] {
            for &z in &[-1.0, 1.0] {
                atoms.push(Atom::new([x, y, z], 1.0, FormFactor::C));
            }
        }
    }
    atoms
}

fn print_profile(profile: &ScatteringProfile) {
    for (q, i) in profile.iter() {
        println!("{q:.6e}\t{i:.6e}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 1)
        .init()?;

    let config = EngineConfig {
        bin_width: args.bin_width,
        d_max: args.d_max,
        q_axis: QAxis::logspace(args.q_min, args.q_max, args.q_points),
        histogram_variant: args.variant.into(),
        threads: args.threads.unwrap_or_else(|| EngineConfig::default().threads),
        ..Default::default()
    };

    rayon::ThreadPoolBuilder::new().num_threads(config.threads).build_global()?;
    log::debug!("sized rayon global pool to {} threads", config.threads);

    let molecule = build_molecule(args.structure);
    log::info!(
        "computing {} variant over {} atoms",
        format!("{:?}", config.histogram_variant),
        molecule.atom_count()
    );

    let profile = if config.histogram_variant.is_partial() {
        let mut manager = PartialHistogramManager::new(molecule, config);
        manager.intensity()?
    } else {
        let mut manager = MonolithicHistogramManager::new(molecule, config);
        manager.intensity()?
    };

    print_profile(&profile);
    Ok(())
}
