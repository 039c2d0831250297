use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use run_record::{RunRecord, Stopwatch};
use transform_reduce::{double_in_place, fill, parallel_sum, sanity_exit_code, DEFAULT_LEN};

#[derive(Parser)]
#[command(version, about = "parallel transform/reduce smoke test", long_about = None)]
struct TransformReduceCli {
    /// Number of f32 elements to allocate.
    #[arg(short, long, default_value_t = DEFAULT_LEN)]
    len: usize,

    /// Append a JSON-lines run record to this path.
    #[arg(long)]
    record: Option<PathBuf>,
}

impl TransformReduceCli {
    fn describe(&self) {
        println!("elements: {}", self.len);
        println!("threads: {}", rayon::current_num_threads());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = TransformReduceCli::parse();
    cli.describe();

    let mut record = RunRecord::new();
    record.with_output("elements", cli.len.to_string());
    record.with_output("threads", rayon::current_num_threads().to_string());

    let alloc = Stopwatch::start("allocate");
    let mut data = fill(cli.len);
    let alloc = alloc.stop();
    info!(elements = cli.len, secs = alloc.secs(), "buffer allocated");

    let transform = Stopwatch::start("transform");
    double_in_place(&mut data);
    let transform = transform.stop();

    let reduce = Stopwatch::start("reduce");
    let sum = parallel_sum(&data);
    let reduce = reduce.stop();

    println!("sum: {sum}");
    println!("{alloc}");
    println!("{transform}");
    println!("{reduce}");

    record.with_output("sum", sum.to_string());
    record.with_output("allocate_seconds", alloc.secs().to_string());
    record.with_output("transform_seconds", transform.secs().to_string());
    record.with_output("reduce_seconds", reduce.secs().to_string());

    let code = sanity_exit_code(sum);
    record.with_output("exit_code", code.to_string());
    if let Some(path) = &cli.record {
        record.write(path);
    }
    if code != 0 {
        std::process::exit(code);
    }
}
