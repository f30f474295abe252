use std::process;
use std::time::Instant;

use clap::Parser;

use sccgraph::scc::{parallel, serial, to_scc_id};
use sccgraph::{Graph, SccError};

#[derive(Parser)]
#[command(about = "Strongly connected components of a sparse directed graph")]
struct Cli {
    /// MatrixMarket coordinate file describing the graph's adjacency
    mtx_file: String,

    /// Run only the single-threaded engine
    #[arg(short, long)]
    serial: bool,

    /// Run only the parallel engine
    #[arg(short, long)]
    parallel: bool,

    /// Worker threads for the parallel engine
    #[arg(short = 'n', long, default_value_t = parallel::DEFAULT_THREADS)]
    threads: usize,
}

fn load_graph(path: &str) -> Result<Graph, SccError> {
    Graph::from_mtx_file(path)
}

/// Reports `e` on stderr and exits with clap's conventional code for
/// argument errors (2) or this crate's code for everything else (1) — the
/// one place that turns any `SccError` into a process exit, so every
/// fallible entry point (argument validation, graph loading) reports and
/// exits the same way.
fn fail(e: SccError) -> ! {
    eprintln!("error: {}", e);
    process::exit(if matches!(e, SccError::Argument(_)) { 2 } else { 1 });
}

fn main() {
    let cli = Cli::parse();

    if cli.threads == 0 {
        fail(SccError::Argument("--threads must be at least 1".to_string()));
    }

    let graph = load_graph(&cli.mtx_file).unwrap_or_else(|e| fail(e));

    println!("Graph:        {} ({} vertices, {} edges)", cli.mtx_file, graph.n(), graph.m());

    // Neither flag given: run both engines and cross-check their output.
    let run_serial = cli.serial || !cli.parallel;
    let run_parallel = cli.parallel || !cli.serial;

    let mut serial_result = None;
    let mut parallel_result = None;

    if run_serial {
        let t0 = Instant::now();
        let sccs = serial::compute_sccs(&graph);
        let elapsed = t0.elapsed();
        println!("Serial:       {} components in {:.3}s", sccs.len(), elapsed.as_secs_f64());
        serial_result = Some(sccs);
    }

    if run_parallel {
        let t0 = Instant::now();
        let sccs = parallel::compute_sccs(&graph, cli.threads);
        let elapsed = t0.elapsed();
        println!(
            "Parallel:     {} components in {:.3}s ({} threads)",
            sccs.len(),
            elapsed.as_secs_f64(),
            cli.threads
        );
        parallel_result = Some(sccs);
    }

    // Compare via (k, scc_id) rather than the raw partitions: that pair is
    // the output contract both engines must agree on, and `to_scc_id`
    // doubles as a sanity check that each engine actually returned a
    // partition of every vertex.
    if let (Some(a), Some(b)) = (serial_result, parallel_result) {
        let (a_ids, a_k) = to_scc_id(&a, graph.n());
        let (b_ids, b_k) = to_scc_id(&b, graph.n());
        if a_k != b_k || a_ids != b_ids {
            let mismatched = a_ids.iter().zip(&b_ids).filter(|(x, y)| x != y).count();
            eprintln!(
                "error: serial and parallel engines disagree: {} vs {} components, {} vertices mismatched",
                a_k, b_k, mismatched
            );
            process::exit(1);
        }
        println!("Cross-check:  serial and parallel engines agree");
    }
}
