//! Graph construction module

use crate::graph::{CompressedGraph, Vertex};

/// Largest vertex count accepted from input files.
///
/// Every id below the largest one seen gets an adjacency list, so a single
/// stray id near `u32::MAX` would otherwise exhaust memory.
pub const MAX_VERTICES: usize = 1 << 28;

/// Builder for incrementally constructing a CompressedGraph from dense ids
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<Vertex>>,

    /// Edges added so far, duplicates included
    added_edges: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            adjacency_lists: Vec::with_capacity(capacity),
            added_edges: 0,
        }
    }

    /// Build a graph directly from `(source, target)` pairs
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut builder = Self::default();
        for (src, dst) in edges {
            builder.add_edge(src, dst);
        }
        builder
    }

    /// Make sure ids `0..=node` exist, even without edges
    pub fn ensure_node(&mut self, node: Vertex) {
        let needed = node as usize + 1;
        if self.adjacency_lists.len() < needed {
            self.adjacency_lists.resize_with(needed, Vec::new);
        }
    }

    /// Add an edge from one node to another
    pub fn add_edge(&mut self, src: Vertex, dst: Vertex) {
        self.ensure_node(src.max(dst));
        self.adjacency_lists[src as usize].push(dst);
        self.added_edges += 1;
    }

    /// Number of nodes seen so far
    pub fn node_count(&self) -> usize {
        self.adjacency_lists.len()
    }

    /// Build the compressed graph, sorting and deduplicating every list
    pub fn build(mut self) -> CompressedGraph {
        let node_count = self.adjacency_lists.len();
        let mut graph = CompressedGraph::with_capacity(node_count, self.added_edges);

        graph.offsets.push(0);
        let mut offset = 0u64;
        for list in &mut self.adjacency_lists {
            // Sort for binary search efficiency
            list.sort_unstable();
            list.dedup();
            offset += list.len() as u64;
            graph.edges.extend_from_slice(list);
            graph.offsets.push(offset);
        }

        let duplicates = self.added_edges - graph.edges.len();
        if duplicates > 0 {
            log::debug!("Dropped {} duplicate edges", duplicates);
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphView;

    #[test]
    fn builds_sorted_deduplicated_lists() {
        let graph = GraphBuilder::from_edges([(2, 0), (0, 3), (0, 1), (0, 3)]).build();

        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.offsets, vec![0, 2, 2, 3, 3]);
        assert_eq!(graph.outgoing_edges(0), &[1, 3]);
        assert_eq!(graph.out_degree(2), 1);
    }

    #[test]
    fn isolated_nodes_are_kept() {
        let mut builder = GraphBuilder::with_capacity(8);
        builder.add_edge(0, 1);
        builder.ensure_node(5);
        assert_eq!(builder.node_count(), 6);

        let graph = builder.build();
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.out_degree(5), 0);
    }

    #[test]
    fn empty_builder_gives_empty_graph() {
        let graph = GraphBuilder::default().build();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.offsets, vec![0]);
    }
}
