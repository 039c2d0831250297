use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use lbm::{BgkDynamics, Lattice3D};
use run_record::{RunRecord, Stopwatch};

#[derive(Parser)]
#[command(version, about = "lattice-Boltzmann smoke test", long_about = None)]
struct LbmSmokeCli {
    /// Lattice size in x.
    #[arg(long, default_value_t = 100)]
    nx: usize,

    /// Lattice size in y.
    #[arg(long, default_value_t = 100)]
    ny: usize,

    /// Lattice size in z.
    #[arg(long, default_value_t = 100)]
    nz: usize,

    /// BGK relaxation parameter.
    #[arg(long, default_value_t = 1.0)]
    omega: f64,

    /// Number of collide-and-stream steps.
    #[arg(short, long, default_value_t = 100)]
    iterations: usize,

    /// Append a JSON-lines run record to this path.
    #[arg(long)]
    record: Option<PathBuf>,
}

impl LbmSmokeCli {
    fn describe(&self) {
        println!("lattice: {} x {} x {} (D3Q19)", self.nx, self.ny, self.nz);
        println!("omega: {}", self.omega);
        println!("iterations: {}", self.iterations);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = LbmSmokeCli::parse();
    cli.describe();

    let mut record = RunRecord::new();
    record.with_output("nx", cli.nx.to_string());
    record.with_output("ny", cli.ny.to_string());
    record.with_output("nz", cli.nz.to_string());
    record.with_output("omega", cli.omega.to_string());
    record.with_output("iterations", cli.iterations.to_string());

    // Building and initializing commits all lattice memory up front, so any
    // allocation failure surfaces here rather than mid-run.
    let build = Stopwatch::start("build_and_initialize");
    let mut lattice = Lattice3D::new(cli.nx, cli.ny, cli.nz, BgkDynamics::new(cli.omega));
    lattice.initialize();
    let build = build.stop();
    info!(cells = lattice.num_cells(), secs = build.secs(), "lattice initialized");

    let steps = Stopwatch::start("collide_and_stream");
    for step in 0..cli.iterations {
        lattice.collide_and_stream();
        debug!(step, "step complete");
    }
    let steps = steps.stop();

    let mass = lattice.total_mass();
    println!("total mass: {mass}");
    println!("{build}");
    println!("{steps}");
    if cli.iterations > 0 {
        println!(
            "seconds per step: {}",
            steps.secs() / cli.iterations as f64
        );
    }

    record.with_output("total_mass", mass.to_string());
    record.with_output("initialize_seconds", build.secs().to_string());
    record.with_output("step_seconds", steps.secs().to_string());
    if let Some(path) = &cli.record {
        record.write(path);
    }
}
