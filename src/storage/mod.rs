//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};

use crate::bench::BenchmarkReport;
use crate::graph::{GraphView, Vertex};

/// Save the benchmark report to `<output_dir>/report.json`
pub fn save_report<G: GraphView>(
    report: &BenchmarkReport,
    graph: &G,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving {} runs to {}", report.runs.len(), output_dir.display());

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join("report.json");
    let mut file = File::create(&path)?;

    let edge_count: usize = (0..graph.vertex_count())
        .map(|v| graph.out_degree(v as Vertex))
        .sum();
    let avg_out_degree = if graph.vertex_count() == 0 {
        0.0
    } else {
        edge_count as f64 / graph.vertex_count() as f64
    };

    let document = json!({
        "graph_stats": {
            "node_count": graph.vertex_count(),
            "edge_count": edge_count,
            "avg_out_degree": avg_out_degree,
        },
        "config": report.config,
        "latency_ms": report.latency,
        "runs": report.runs,
    });

    file.write_all(to_string_pretty(&document)?.as_bytes())?;
    log::info!("Report written to {}", path.display());

    Ok(())
}
