//! Synthetic search-trace generation for training data.
//!
//! Builds seeded random solver snapshots and writes ranked pair examples
//! for them, producing a training file without a running solver. Used to
//! smoke-test the featurization-to-training pipeline end to end and to
//! feed benchmarks. Each trace is an independent search context with its
//! own variable table; node pairs are drawn at random depths, ranked by
//! the best-bound rule, featurized, and serialized.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::dataset::ExampleWriter;
use crate::feat::{calculate, FeatureVector, FEATURE_COUNT};
use crate::solver::{
    BoundChange, BoundChangeKind, BoundType, BranchDirection, Column, NodeKind, SearchContext,
    SearchNode, Variable,
};

/// Configuration for synthetic trace generation.
#[derive(Clone)]
pub struct TraceConfig {
    /// Number of independent traces to generate.
    pub num_traces: usize,
    /// Ranked node pairs per trace (each pair yields two lines).
    pub pairs_per_trace: usize,
    /// Variables in each trace's table.
    pub n_variables: usize,
    /// Maximum search depth; nodes are drawn from 1..=max_depth.
    pub max_depth: u32,
    /// Number of parallel threads for concurrent traces.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-trace progress output.
    pub quiet: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            num_traces: 10,
            pairs_per_trace: 64,
            n_variables: 50,
            max_depth: 40,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// One generated trace: its id and the serialized training lines.
#[derive(Clone)]
pub struct TraceRecord {
    /// Sequential trace id.
    pub trace_id: usize,
    /// Serialized training lines for this trace.
    pub data: Vec<u8>,
    /// Number of lines in `data`.
    pub n_lines: usize,
}

fn random_variable(rng: &mut SmallRng) -> Variable {
    let lp_sol = rng.gen_range(-10.0..10.0);
    Variable {
        column: Column {
            obj: rng.gen_range(-5.0..5.0),
            n_nonzeros: rng.gen_range(0..30),
        },
        lp_sol,
        pseudo_sol: lp_sol + rng.gen_range(-1.0..1.0),
        root_sol: rng.gen_range(-10.0..10.0),
        pseudocost_up: rng.gen_range(0.0..4.0),
        pseudocost_down: rng.gen_range(0.0..4.0),
        avg_inferences_up: rng.gen_range(0.0..20.0),
        avg_inferences_down: rng.gen_range(0.0..20.0),
        preferred_direction: match rng.gen_range(0..3) {
            0 => BranchDirection::Downwards,
            1 => BranchDirection::Upwards,
            _ => BranchDirection::Auto,
        },
    }
}

fn random_context(config: &TraceConfig, rng: &mut SmallRng) -> SearchContext {
    let variables = (0..config.n_variables).map(|_| random_variable(rng)).collect();
    let mut ctx = SearchContext::new(variables);
    ctx.root_lower_bound = rng.gen_range(-100.0..100.0);
    ctx.global_lower_bound = ctx.root_lower_bound + rng.gen_range(0.0..50.0);
    ctx.cutoff_bound = ctx.global_lower_bound + rng.gen_range(1.0..200.0);
    ctx.n_sols_found = rng.gen_range(0..5);
    ctx.focus_has_lp = rng.gen_bool(0.8);
    ctx
}

fn random_node(config: &TraceConfig, ctx: &SearchContext, rng: &mut SmallRng) -> SearchNode {
    let kind = match rng.gen_range(0..4) {
        0 => NodeKind::Sibling,
        1 => NodeKind::Child,
        2 => NodeKind::Leaf,
        _ => NodeKind::Focus,
    };
    let var = rng.gen_range(0..ctx.n_variables());
    let bound_type = if rng.gen_bool(0.5) {
        BoundType::Lower
    } else {
        BoundType::Upper
    };
    let mut bound_changes = vec![BoundChange {
        var,
        new_bound: rng.gen_range(-10.0..10.0),
        bound_type,
        kind: BoundChangeKind::Branching,
    }];
    for _ in 0..rng.gen_range(0..3) {
        bound_changes.push(BoundChange {
            var: rng.gen_range(0..ctx.n_variables()),
            new_bound: rng.gen_range(-10.0..10.0),
            bound_type: BoundType::Lower,
            kind: if rng.gen_bool(0.5) {
                BoundChangeKind::ConsInference
            } else {
                BoundChangeKind::PropInference
            },
        });
    }

    let lower_bound = ctx.global_lower_bound + rng.gen_range(0.0..50.0);
    SearchNode {
        depth: rng.gen_range(1..=config.max_depth),
        kind,
        lower_bound,
        estimate: lower_bound + rng.gen_range(-10.0..10.0),
        bound_changes,
    }
}

/// Generates a single trace and returns its record.
pub fn generate_trace(config: &TraceConfig, trace_id: usize, rng: &mut SmallRng) -> TraceRecord {
    let ctx = random_context(config, rng);
    let mut better = FeatureVector::new(FEATURE_COUNT);
    let mut worse = FeatureVector::new(FEATURE_COUNT);
    better.set_max_depth(config.max_depth);
    worse.set_max_depth(config.max_depth);

    let mut writer = ExampleWriter::new(Vec::new());
    for _ in 0..config.pairs_per_trace {
        let a = random_node(config, &ctx, rng);
        let b = random_node(config, &ctx, rng);

        // Best-bound oracle: the node with the smaller lower bound wins.
        let (chosen, other) = if a.lower_bound <= b.lower_bound {
            (&a, &b)
        } else {
            (&b, &a)
        };
        calculate(chosen, &ctx, &mut better);
        calculate(other, &ctx, &mut worse);
        writer
            .preference(&better, &worse)
            .expect("in-memory write cannot fail");
    }

    let n_lines = writer.lines_written();
    TraceRecord {
        trace_id,
        data: writer.into_inner(),
        n_lines,
    }
}

/// Returns the per-trace RNG. Traces are seeded independently so output
/// is identical for a fixed seed regardless of thread count.
fn trace_rng(seed: u64, trace_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(trace_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Generates all configured traces, returning them ordered by trace id.
pub fn run_generation(config: &TraceConfig) -> Vec<TraceRecord> {
    let mut records = Vec::with_capacity(config.num_traces);
    run_generation_with_callback(config, |record| {
        records.push(record);
    });
    records.sort_by_key(|r| r.trace_id);
    records
}

/// Generates all configured traces, calling `on_trace` with each
/// completed record. With multiple threads, records arrive in completion
/// order.
pub fn run_generation_with_callback<F>(config: &TraceConfig, on_trace: F)
where
    F: FnMut(TraceRecord) + Send,
{
    if config.threads > 1 {
        run_generation_parallel(config, on_trace);
    } else {
        run_generation_sequential(config, on_trace);
    }
}

fn run_generation_sequential<F>(config: &TraceConfig, mut on_trace: F)
where
    F: FnMut(TraceRecord),
{
    for i in 0..config.num_traces {
        let mut rng = trace_rng(config.seed, i);
        let record = generate_trace(config, i, &mut rng);
        if !config.quiet {
            eprintln!(
                "Trace {}/{}: {} lines",
                i + 1,
                config.num_traces,
                record.n_lines
            );
        }
        on_trace(record);
    }
}

/// Parallel generation: traces run concurrently on a rayon pool, with a
/// channel delivering completed records to the callback.
fn run_generation_parallel<F>(config: &TraceConfig, mut on_trace: F)
where
    F: FnMut(TraceRecord) + Send,
{
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<TraceRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_traces)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = trace_rng(config_clone.seed, i);
                    let record = generate_trace(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        eprintln!(
                            "Trace {}/{}: {} lines",
                            n, config_clone.num_traces, record.n_lines
                        );
                    }
                    let _ = tx.send(record);
                });
        });
    });

    for record in rx {
        on_trace(record);
    }

    handle.join().expect("trace worker thread panicked");
}

/// Generates all traces and writes their lines to `out` in trace-id
/// order. Returns the total number of lines written.
pub fn write_trainset<W: Write>(config: &TraceConfig, out: &mut W) -> std::io::Result<usize> {
    let records = run_generation(config);
    let mut total = 0;
    for record in &records {
        out.write_all(&record.data)?;
        total += record.n_lines;
    }
    out.flush()?;
    Ok(total)
}

/// Prints a summary of generated traces to stderr.
pub fn print_summary(records: &[TraceRecord]) {
    let total_lines: usize = records.iter().map(|r| r.n_lines).sum();
    let total_bytes: usize = records.iter().map(|r| r.data.len()).sum();
    eprintln!("=== Trace Generation Summary ===");
    eprintln!("Traces: {}", records.len());
    eprintln!("Lines: {}", total_lines);
    eprintln!(
        "Avg bytes/line: {:.1}",
        total_bytes as f64 / total_lines.max(1) as f64
    );
}
