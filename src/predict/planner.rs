//! Candidate selection and query generation

use std::collections::HashSet;

use crate::graph::{GraphView, Vertex};
use crate::predict::Query;

/// Candidates and the queries generated between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    /// Vertices meeting the degree threshold, ascending
    pub candidates: Vec<Vertex>,

    /// Ordered by ascending source, then ascending target
    pub queries: Vec<Query>,
}

/// Vertices whose out-degree is at least `min_degree`, in ascending id order
pub fn candidates<G: GraphView>(graph: &G, min_degree: usize) -> Vec<Vertex> {
    // A view never holds ids beyond the vertex id type
    (0..graph.vertex_count())
        .map_while(|v| Vertex::try_from(v).ok())
        .filter(|&v| graph.out_degree(v) >= min_degree)
        .collect()
}

/// Select candidates and emit every ordered pair of distinct candidates
/// that is not already an edge.
pub fn plan<G: GraphView>(graph: &G, min_degree: usize) -> QueryPlan {
    let candidates = candidates(graph, min_degree);
    log::info!(
        "Found {} vertices with out-degree >= {}",
        candidates.len(),
        min_degree
    );

    let queries = queries_among(graph, &candidates);
    log::info!("Computed {} queries", queries.len());

    QueryPlan { candidates, queries }
}

fn queries_among<G: GraphView>(graph: &G, candidates: &[Vertex]) -> Vec<Query> {
    let mut queries = Vec::new();
    if candidates.len() < 2 {
        return queries;
    }

    for &source in candidates {
        // Index neighbors for constant-time membership tests
        let neighbors: HashSet<Vertex> = graph.out_neighbors(source).collect();

        queries.extend(
            candidates
                .iter()
                .filter(|&&target| target != source && !neighbors.contains(&target))
                .map(|&target| Query::new(source, target)),
        );
    }

    queries
}
