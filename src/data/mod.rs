//! Input loading: edge lists, parquet edge tables, snapshots and renumbering

pub mod edge_list;
pub mod parquet;
pub mod renumber;

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use crate::error::PredictError;
use crate::graph::builder::MAX_VERTICES;
use crate::graph::{CompressedGraph, GraphBuilder, Vertex};

/// On-disk representation of the input graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Pick by file extension
    Auto,
    /// Whitespace-separated `source target` lines
    EdgeList,
    /// Gzip-compressed edge list
    Gzip,
    /// Parquet table with `source` and `target` columns
    Parquet,
    /// Bincode snapshot of a compressed graph
    Snapshot,
}

impl GraphFormat {
    /// Resolve `Auto` from the file extension
    pub fn resolve(self, path: &Path) -> GraphFormat {
        if self != GraphFormat::Auto {
            return self;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("parquet") => GraphFormat::Parquet,
            Some("bin") | Some("snapshot") => GraphFormat::Snapshot,
            Some("gz") => GraphFormat::Gzip,
            _ => GraphFormat::EdgeList,
        }
    }
}

/// Load a graph in the given format
pub fn load_graph<P: AsRef<Path>>(path: P, format: GraphFormat) -> Result<CompressedGraph> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PredictError::MissingInput(path.to_path_buf()).into());
    }

    match format.resolve(path) {
        GraphFormat::Parquet => parquet::load_edge_table(path),
        GraphFormat::Snapshot => CompressedGraph::load_snapshot(path),
        GraphFormat::Gzip => edge_list::load_gzip_edge_list(path),
        GraphFormat::EdgeList | GraphFormat::Auto => edge_list::load_edge_list(path),
    }
}

/// Parse the first two whitespace-separated unsigned integers of a line.
///
/// Trailing fields, such as edge weights, are ignored.
pub(crate) fn parse_id_pair<T: std::str::FromStr>(line: &str) -> Option<(T, T)> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?.parse().ok()?;
    let second = fields.next()?.parse().ok()?;
    Some((first, second))
}

/// Add an input edge, rejecting ids beyond [`MAX_VERTICES`].
///
/// `line` is the 1-based line or row the edge came from.
pub(crate) fn add_checked_edge(
    builder: &mut GraphBuilder,
    src: Vertex,
    dst: Vertex,
    line: usize,
) -> Result<(), PredictError> {
    let id = src.max(dst);
    if id as usize >= MAX_VERTICES {
        return Err(PredictError::VertexLimit {
            line,
            id: u64::from(id),
            limit: MAX_VERTICES,
        });
    }
    builder.add_edge(src, dst);
    Ok(())
}

/// Lines that carry no data
pub(crate) fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}
