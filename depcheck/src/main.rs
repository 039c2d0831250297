mod probes;

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use run_record::RunRecord;

#[derive(Parser)]
#[command(version, about = "dependency check for the smoke-test suite", long_about = None)]
struct DepcheckCli {
    /// Append a JSON-lines run record to this path.
    #[arg(long)]
    record: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = DepcheckCli::parse();
    let mut record = RunRecord::new();
    let mut all_ok = true;

    for (label, probe) in probes::ALL {
        debug!(label, "running probe");
        match probe() {
            Ok(detail) => {
                println!("{label}: ok ({detail})");
                record.with_output(label, "ok".to_string());
            }
            Err(err) => {
                all_ok = false;
                println!("{label}: FAILED ({err})");
                record.with_output(label, format!("failed: {err}"));
            }
        }
    }

    if all_ok {
        println!("all dependency checks passed");
    } else {
        println!("dependency checks failed");
    }

    record.with_output("exit_code", i32::from(!all_ok).to_string());
    if let Some(path) = &cli.record {
        record.write(path);
    }
    if !all_ok {
        std::process::exit(1);
    }
}
