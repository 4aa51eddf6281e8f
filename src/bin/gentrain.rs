//! Synthetic trainset generation CLI.
//!
//! Generates synthetic search traces and writes ranked pair examples in
//! sparse labeled format, one example per line.
//!
//! Usage:
//!   cargo run --release --bin gentrain -- [OPTIONS]
//!
//! Options:
//!   --traces N      Number of traces to generate (default: 10)
//!   --pairs N       Ranked pairs per trace (default: 64)
//!   --vars N        Variables per trace (default: 50)
//!   --max-depth D   Maximum search depth (default: 40)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use noderank::trace::{self, TraceConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = TraceConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--traces" => {
                i += 1;
                config.num_traces = args[i].parse().expect("invalid --traces value");
            }
            "--pairs" => {
                i += 1;
                config.pairs_per_trace = args[i].parse().expect("invalid --pairs value");
            }
            "--vars" => {
                i += 1;
                config.n_variables = args[i].parse().expect("invalid --vars value");
            }
            "--max-depth" => {
                i += 1;
                config.max_depth = args[i].parse().expect("invalid --max-depth value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    if !quiet {
        eprintln!(
            "Generating {} traces, {} pairs each, {} vars, max depth {}, {} threads",
            config.num_traces,
            config.pairs_per_trace,
            config.n_variables,
            config.max_depth,
            config.threads
        );
    }

    let start = Instant::now();
    let records = trace::run_generation(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} traces in {:.2}s",
            records.len(),
            elapsed.as_secs_f64()
        );
        trace::print_summary(&records);
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            write_records(&records, &mut writer).expect("failed to write output");
            if !quiet {
                let lines: usize = records.iter().map(|r| r.n_lines).sum();
                eprintln!("Wrote {} lines to {}", lines, path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_records(&records, &mut writer).expect("failed to write output");
        }
    }
}

fn write_records<W: Write>(
    records: &[trace::TraceRecord],
    out: &mut W,
) -> io::Result<()> {
    for record in records {
        out.write_all(&record.data)?;
    }
    out.flush()
}

fn print_usage() {
    eprintln!("Usage: gentrain [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --traces N       Number of traces to generate (default: 10)");
    eprintln!("  --pairs N        Ranked pairs per trace (default: 64)");
    eprintln!("  --vars N         Variables per trace (default: 50)");
    eprintln!("  --max-depth D    Maximum search depth (default: 40)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
