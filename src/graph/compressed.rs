//! Memory-efficient graph representation

use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphView, Vertex};

/// Compressed sparse row representation of a directed graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u64>,

    /// Edge array: concatenated, sorted lists of target nodes
    pub edges: Vec<Vertex>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
        }
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: usize) -> &[Vertex] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: usize, dst: Vertex) -> bool {
        self.outgoing_edges(src).binary_search(&dst).is_ok()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u64>();
        let edges = self.edges.capacity() * mem::size_of::<Vertex>();

        base + offsets + edges
    }

    /// Write the graph as a bincode snapshot
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        log::info!("Writing graph snapshot to {}", path.display());

        let file = File::create(path)
            .with_context(|| format!("creating snapshot {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;

        Ok(())
    }

    /// Read a graph previously written by [`CompressedGraph::save_snapshot`]
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Reading graph snapshot from {}", path.display());

        let file = File::open(path)
            .with_context(|| format!("opening snapshot {}", path.display()))?;
        // The snapshot is never written while mapped.
        let mmap = unsafe { Mmap::map(&file)? };
        let graph: CompressedGraph = bincode::deserialize(&mmap[..])
            .with_context(|| format!("decoding snapshot {}", path.display()))?;

        anyhow::ensure!(
            graph.offsets.len() == graph.node_count + 1
                && graph.offsets.last().copied() == Some(graph.edges.len() as u64),
            "snapshot {} has inconsistent offsets",
            path.display()
        );

        Ok(graph)
    }
}

impl GraphView for CompressedGraph {
    type Neighbors<'a> = std::iter::Copied<std::slice::Iter<'a, Vertex>>;

    fn vertex_count(&self) -> usize {
        self.node_count
    }

    fn out_degree(&self, v: Vertex) -> usize {
        let node = v as usize;
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    fn out_neighbors(&self, v: Vertex) -> Self::Neighbors<'_> {
        self.outgoing_edges(v as usize).iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn sample() -> CompressedGraph {
        GraphBuilder::from_edges([(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]).build()
    }

    #[test]
    fn exposes_degrees_and_neighbors() {
        let graph = sample();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.out_degree(0), 2);
        assert_eq!(graph.out_degree(3), 0);
        assert_eq!(graph.out_neighbors(1).collect::<Vec<_>>(), vec![2, 3]);
        assert!(graph.has_edge(2, 3));
        assert!(!graph.has_edge(3, 2));
    }

    #[test]
    fn snapshot_round_trip() {
        let graph = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");

        graph.save_snapshot(&path).unwrap();
        let loaded = CompressedGraph::load_snapshot(&path).unwrap();

        assert_eq!(loaded, graph);
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");
        std::fs::write(&path, b"not a graph").unwrap();

        assert!(CompressedGraph::load_snapshot(&path).is_err());
    }
}
