//! Graph view over an in-memory petgraph `DiGraph`

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::graph::{CompressedGraph, GraphView, Vertex};

fn vertex_of(node: NodeIndex) -> Vertex {
    node.index() as Vertex
}

impl<N: Sync, E: Sync> GraphView for DiGraph<N, E> {
    type Neighbors<'a> = std::iter::Map<petgraph::graph::Neighbors<'a, E>, fn(NodeIndex) -> Vertex>
    where
        Self: 'a;

    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn out_degree(&self, v: Vertex) -> usize {
        self.neighbors_directed(NodeIndex::new(v as usize), Direction::Outgoing)
            .count()
    }

    fn out_neighbors(&self, v: Vertex) -> Self::Neighbors<'_> {
        self.neighbors_directed(NodeIndex::new(v as usize), Direction::Outgoing)
            .map(vertex_of as fn(NodeIndex) -> Vertex)
    }
}

/// Copy a compressed graph into a petgraph `DiGraph` with identical ids
pub fn to_petgraph(graph: &CompressedGraph) -> DiGraph<(), ()> {
    let mut digraph = DiGraph::with_capacity(graph.node_count, graph.edge_count());
    for _ in 0..graph.node_count {
        digraph.add_node(());
    }
    for src in 0..graph.node_count {
        for &dst in graph.outgoing_edges(src) {
            digraph.add_edge(NodeIndex::new(src), NodeIndex::new(dst as usize), ());
        }
    }
    log::debug!(
        "Built petgraph view with {} nodes and {} edges",
        digraph.node_count(),
        digraph.edge_count()
    );
    digraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn petgraph_view_matches_compressed_view() {
        let graph = GraphBuilder::from_edges([(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 0)])
            .build();
        let digraph = to_petgraph(&graph);

        assert_eq!(GraphView::vertex_count(&digraph), graph.vertex_count());
        for v in 0..graph.node_count as Vertex {
            assert_eq!(GraphView::out_degree(&digraph, v), graph.out_degree(v));
            let mut neighbors: Vec<_> = GraphView::out_neighbors(&digraph, v).collect();
            neighbors.sort_unstable();
            assert_eq!(neighbors, graph.out_neighbors(v).collect::<Vec<_>>());
        }
    }
}
