//! Parquet file handling for edge tables

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;

use crate::data::add_checked_edge;
use crate::error::PredictError;
use crate::graph::{CompressedGraph, GraphBuilder};

/// Column holding edge sources
pub const SOURCE_COLUMN: &str = "source";
/// Column holding edge targets
pub const TARGET_COLUMN: &str = "target";

/// Load a parquet edge table with integer `source` and `target` columns
pub fn load_edge_table(path: &Path) -> Result<CompressedGraph> {
    log::info!("Reading parquet file: {}", path.display());

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([col(SOURCE_COLUMN), col(TARGET_COLUMN)])
        .collect()?;

    log::info!("Loaded {} edge rows", df.height());
    log::debug!("File schema: {:?}", df.schema());

    // Negative or oversized ids become nulls and are rejected below
    let sources = df.column(SOURCE_COLUMN)?.cast(&DataType::UInt32)?;
    let targets = df.column(TARGET_COLUMN)?.cast(&DataType::UInt32)?;
    let sources = sources.u32()?;
    let targets = targets.u32()?;

    let mut builder = GraphBuilder::with_capacity(df.height());
    for (row, (src, dst)) in sources.into_iter().zip(targets.into_iter()).enumerate() {
        match (src, dst) {
            (Some(src), Some(dst)) => add_checked_edge(&mut builder, src, dst, row + 1)?,
            _ => {
                return Err(PredictError::MalformedEdge {
                    line: row + 1,
                    content: format!("{:?} -> {:?}", src, dst),
                }
                .into())
            }
        }
    }

    let graph = builder.build();
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    Ok(graph)
}
