use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use graph_link_predictor::bench::{self, BenchmarkReport};
use graph_link_predictor::config::Config;
use graph_link_predictor::data::{self, renumber::RenumberTable, GraphFormat};
use graph_link_predictor::graph::{sparse, GraphView};
use graph_link_predictor::storage;

/// In-memory structure the queries run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Compressed sparse rows
    Compressed,
    /// petgraph adjacency list
    Petgraph,
}

#[derive(Parser, Debug)]
#[clap(
    name = "graph-link-predictor",
    about = "Parallel Adamic-Adar link prediction benchmark for large directed graphs"
)]
struct Cli {
    /// Path to the input graph
    #[clap(long)]
    input: PathBuf,

    /// Input format
    #[clap(long, value_enum, default_value = "auto")]
    format: GraphFormat,

    /// Graph structure used for scoring
    #[clap(long, value_enum, default_value = "compressed")]
    backend: Backend,

    /// Minimum out-degree for a vertex to be queried
    #[clap(long, default_value = "100")]
    min_degree: usize,

    /// How many times to repeat the experiment
    #[clap(long, default_value = "10")]
    repeat: usize,

    /// Optional `external internal` renumbering file
    #[clap(long)]
    renumber: Option<PathBuf>,

    /// Write the loaded graph as a binary snapshot
    #[clap(long)]
    save_snapshot: Option<PathBuf>,

    /// Directory for the JSON report
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn run<G: GraphView>(
    graph: &G,
    config: &Config,
    renumber: &RenumberTable,
    output_dir: Option<&PathBuf>,
) -> Result<BenchmarkReport> {
    let report = bench::run_benchmark(graph, config, renumber)?;
    if let Some(dir) = output_dir {
        storage::save_report(&report, graph, dir)?;
    }
    Ok(report)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.min_degree, args.repeat, args.threads);
    config.validate()?;

    log::info!("Using {} worker threads", config.workers);
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build_global()?;

    log::info!("Input: {}", args.input.display());
    log::info!("Will query vertices of minimum degree: {}", config.min_degree);

    // 1. Load renumbering and graph
    let renumber = match &args.renumber {
        Some(path) => RenumberTable::load(path)?,
        None => RenumberTable::default(),
    };

    let graph = data::load_graph(&args.input, args.format)?;
    log::info!(
        "Graph has {} vertices and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    if let Some(path) = &args.save_snapshot {
        graph.save_snapshot(path)?;
    }

    // 2. Run the benchmark
    let report = match args.backend {
        Backend::Compressed => run(&graph, &config, &renumber, args.output_dir.as_ref())?,
        Backend::Petgraph => {
            let digraph = sparse::to_petgraph(&graph);
            drop(graph);
            run(&digraph, &config, &renumber, args.output_dir.as_ref())?
        }
    };

    log::info!(
        "Completed {} runs, mean latency {:.3} ms",
        report.runs.len(),
        report.latency.mean_ms
    );

    Ok(())
}
