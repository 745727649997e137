//! Plain-text and gzip-compressed edge list loading

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use memmap2::Mmap;

use crate::data::{add_checked_edge, is_skipped, parse_id_pair};
use crate::error::PredictError;
use crate::graph::{CompressedGraph, GraphBuilder, Vertex};

/// Leading bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Load an edge list file, one `source target` pair per line.
///
/// Gzip input is detected by its magic bytes and decompressed on the fly.
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<CompressedGraph> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    if file.metadata()?.len() == 0 {
        log::warn!("Edge list {} is empty", path.display());
        return Ok(GraphBuilder::default().build());
    }

    // The input is treated as read-only for the lifetime of the map.
    let mmap = unsafe { Mmap::map(&file)? };
    if mmap.starts_with(&GZIP_MAGIC) {
        drop(mmap);
        return load_gzip_edge_list(path);
    }

    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

    let graph = parse_edge_list(text)?;
    log_loaded(&graph);
    Ok(graph)
}

/// Load a gzip-compressed edge list, streaming it through the decoder
pub fn load_gzip_edge_list<P: AsRef<Path>>(path: P) -> Result<CompressedGraph> {
    let path = path.as_ref();
    log::info!("Reading gzip edge list: {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(GzDecoder::new(BufReader::new(file)));

    let graph = read_edge_lines(reader)
        .with_context(|| format!("decompressing {}", path.display()))?;
    log_loaded(&graph);
    Ok(graph)
}

/// Parse edge list text; `#` comments and blank lines are skipped
pub fn parse_edge_list(text: &str) -> Result<CompressedGraph, PredictError> {
    let mut builder = GraphBuilder::default();
    for (idx, raw) in text.lines().enumerate() {
        add_line(&mut builder, idx + 1, raw)?;
    }
    Ok(builder.build())
}

/// Read edge list lines from any buffered reader
pub fn read_edge_lines<R: BufRead>(reader: R) -> Result<CompressedGraph> {
    let mut builder = GraphBuilder::default();
    for (idx, raw) in reader.lines().enumerate() {
        let raw = raw?;
        add_line(&mut builder, idx + 1, &raw)?;
    }
    Ok(builder.build())
}

fn add_line(builder: &mut GraphBuilder, line_no: usize, raw: &str) -> Result<(), PredictError> {
    let line = raw.trim();
    if is_skipped(line) {
        return Ok(());
    }

    let (src, dst) = parse_id_pair::<Vertex>(line).ok_or_else(|| PredictError::MalformedEdge {
        line: line_no,
        content: raw.to_string(),
    })?;
    add_checked_edge(builder, src, dst, line_no)
}

fn log_loaded(graph: &CompressedGraph) {
    log::info!(
        "Loaded graph with {} nodes and {} edges ({} bytes)",
        graph.node_count,
        graph.edge_count(),
        graph.memory_usage()
    );
}
