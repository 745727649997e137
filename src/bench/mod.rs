//! Repeated, timed execution of the prediction pipeline

use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::Config;
use crate::data::renumber::RenumberTable;
use crate::graph::GraphView;
use crate::predict::{merge, partition, planner, scorer, ScoredPair};

/// Outcome of one pipeline execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Zero-based run index
    pub run: usize,

    /// Wall-clock duration in milliseconds
    pub elapsed_ms: f64,

    /// Vertices meeting the degree threshold
    pub candidate_count: usize,

    /// Pairs scored
    pub query_count: usize,

    /// Global top-k, best first, with external ids when renumbered
    pub results: Vec<ScoredPair>,
}

/// Latency statistics over all runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl LatencySummary {
    fn from_runs(runs: &[RunReport]) -> Self {
        let latencies: Vec<f64> = runs.iter().map(|r| r.elapsed_ms).collect();
        let std_dev_ms = if latencies.len() > 1 {
            Statistics::std_dev(latencies.iter())
        } else {
            0.0
        };

        Self {
            mean_ms: Statistics::mean(latencies.iter()),
            std_dev_ms,
            min_ms: Statistics::min(latencies.iter()),
            max_ms: Statistics::max(latencies.iter()),
        }
    }
}

/// All runs of one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub config: Config,
    pub runs: Vec<RunReport>,
    pub latency: LatencySummary,
}

/// Plan, partition, score in parallel, merge and renumber once
pub fn single_run<G: GraphView>(
    run: usize,
    graph: &G,
    config: &Config,
    renumber: &RenumberTable,
) -> Result<RunReport> {
    log::info!("Run {}", run);
    let start = Instant::now();

    let planner::QueryPlan { candidates, queries } = planner::plan(graph, config.min_degree);

    let partitions = partition::partition(&queries, config.workers);
    log::info!("Splitting {} queries into {} partitions", queries.len(), partitions.len());

    // Results stay in partition order; the collect is the only join point
    let locals: Vec<Vec<ScoredPair>> = partitions
        .par_iter()
        .enumerate()
        .map(|(worker, slice)| {
            let worker_start = Instant::now();
            let local = scorer::score_partition(graph, slice, config.top_k);
            log::debug!(
                "Worker {} scored {} queries in {:.0?}",
                worker,
                slice.len(),
                worker_start.elapsed()
            );
            local
        })
        .collect();

    let merged = merge::merge_top_k(locals, config.top_k);
    let results = renumber.apply(&merged)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::info!("Joined all results in {:.3} ms", elapsed_ms);
    for (rank, pair) in results.iter().enumerate() {
        log::info!("  #{} {}", rank + 1, pair);
    }

    Ok(RunReport {
        run,
        elapsed_ms,
        candidate_count: candidates.len(),
        query_count: queries.len(),
        results,
    })
}

/// Execute `config.repeat` runs and summarize their latency
pub fn run_benchmark<G: GraphView>(
    graph: &G,
    config: &Config,
    renumber: &RenumberTable,
) -> Result<BenchmarkReport> {
    config.validate()?;
    log::info!(
        "Benchmarking {} runs with min degree {} on {} workers",
        config.repeat,
        config.min_degree,
        config.workers
    );

    let runs = (0..config.repeat)
        .map(|run| single_run(run, graph, config, renumber))
        .collect::<Result<Vec<_>>>()?;

    let latency = LatencySummary::from_runs(&runs);
    log::info!("Average time taken: {:.3} (ms)", latency.mean_ms);

    Ok(BenchmarkReport {
        config: config.clone(),
        runs,
        latency,
    })
}
