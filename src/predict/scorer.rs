//! Adamic-Adar scoring with a bounded per-worker ranking

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::graph::{GraphView, Vertex};
use crate::predict::{Query, ScoredPair, Similarity};

/// Adamic-Adar index over out-neighborhoods.
///
/// Holds the neighbor set of the most recent source so that consecutive
/// queries sharing a source reuse it.
pub struct AdamicAdar<'g, G: GraphView> {
    graph: &'g G,
    source: Option<Vertex>,
    source_neighbors: HashSet<Vertex>,
}

impl<'g, G: GraphView> AdamicAdar<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            source: None,
            source_neighbors: HashSet::new(),
        }
    }

    /// Sum of `1 / ln(out_degree(z))` over common out-neighbors `z`.
    ///
    /// Neighbors with out-degree of at most one have a non-positive
    /// logarithm and contribute nothing.
    pub fn predict(&mut self, query: Query) -> Similarity {
        if self.source != Some(query.source) {
            self.source_neighbors.clear();
            self.source_neighbors
                .extend(self.graph.out_neighbors(query.source));
            self.source = Some(query.source);
        }

        let graph = self.graph;
        let neighbors = &self.source_neighbors;
        let score: f64 = graph
            .out_neighbors(query.target)
            .filter(|z| neighbors.contains(z))
            .filter_map(|z| {
                let degree = graph.out_degree(z);
                (degree > 1).then(|| 1.0 / (degree as f64).ln())
            })
            .sum();

        if score > 0.0 {
            Similarity::Defined(score)
        } else {
            Similarity::Undefined
        }
    }
}

/// Heap entry ordered so that a better-ranked pair compares greater
#[derive(Debug, Clone, Copy)]
struct Ranked(ScoredPair);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.rank_cmp(&self.0)
    }
}

/// Keeps the `k` best pairs seen so far in O(k) memory
pub struct TopK {
    k: usize,
    // Min-heap on rank: the root is the weakest retained pair
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, pair: ScoredPair) {
        if self.k == 0 {
            return;
        }
        let entry = Ranked(pair);
        if self.heap.len() == self.k {
            match self.heap.peek() {
                Some(Reverse(weakest)) if entry <= *weakest => return,
                _ => {}
            }
            self.heap.pop();
        }
        self.heap.push(Reverse(entry));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Retained pairs, best first
    pub fn into_sorted_vec(self) -> Vec<ScoredPair> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(pair))| pair)
            .collect()
    }
}

/// Score one partition and return its local top-`k`, best first
pub fn score_partition<G: GraphView>(graph: &G, queries: &[Query], k: usize) -> Vec<ScoredPair> {
    let mut index = AdamicAdar::new(graph);
    let mut top = TopK::new(k);
    let mut undefined = 0usize;

    for &query in queries {
        match index.predict(query) {
            Similarity::Defined(score) => top.push(ScoredPair::new(query, score)),
            Similarity::Undefined => undefined += 1,
        }
    }

    log::debug!(
        "Scored {} queries, {} without a defined index",
        queries.len(),
        undefined
    );

    top.into_sorted_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn pair(source: u64, target: u64, score: f64) -> ScoredPair {
        ScoredPair { source, target, score }
    }

    #[test]
    fn adamic_adar_sums_inverse_log_degrees() {
        // 0 and 1 share neighbors 2 (degree 2), 3 (degree 3) and 4 (degree 1)
        let graph = GraphBuilder::from_edges([
            (0, 2), (0, 3), (0, 4),
            (1, 2), (1, 3), (1, 4),
            (2, 0), (2, 1),
            (3, 0), (3, 1), (3, 4),
            (4, 0),
        ])
        .build();

        let mut index = AdamicAdar::new(&graph);
        let expected = 1.0 / 2f64.ln() + 1.0 / 3f64.ln();
        match index.predict(Query::new(0, 1)) {
            Similarity::Defined(score) => assert!((score - expected).abs() < 1e-12),
            Similarity::Undefined => panic!("expected a defined score"),
        }
    }

    #[test]
    fn only_low_degree_common_neighbors_is_undefined() {
        // The only common neighbor 2 has out-degree 1
        let graph = GraphBuilder::from_edges([(0, 2), (1, 2), (2, 3)]).build();
        let mut index = AdamicAdar::new(&graph);

        assert_eq!(index.predict(Query::new(0, 1)), Similarity::Undefined);
        assert_eq!(index.predict(Query::new(0, 3)), Similarity::Undefined);
    }

    #[test]
    fn cached_source_is_refreshed_on_change() {
        let graph = GraphBuilder::from_edges([
            (0, 2), (1, 3), (4, 2), (5, 3),
            (2, 0), (2, 1), (3, 0), (3, 1),
        ])
        .build();
        let mut index = AdamicAdar::new(&graph);

        assert!(matches!(index.predict(Query::new(0, 4)), Similarity::Defined(_)));
        assert_eq!(index.predict(Query::new(0, 5)), Similarity::Undefined);
        assert!(matches!(index.predict(Query::new(1, 5)), Similarity::Defined(_)));
        assert_eq!(index.predict(Query::new(1, 4)), Similarity::Undefined);
    }

    #[test]
    fn top_k_keeps_best_in_order() {
        let mut top = TopK::new(3);
        for (i, score) in [0.5, 2.0, 1.0, 3.0, 0.1, 2.0].into_iter().enumerate() {
            top.push(pair(i as u64, 0, score));
        }
        assert_eq!(top.len(), 3);

        let kept = top.into_sorted_vec();
        let ids: Vec<u64> = kept.iter().map(|p| p.source).collect();
        assert_eq!(ids, vec![3, 1, 5]);
    }

    #[test]
    fn top_k_tie_prefers_lower_ids() {
        let mut top = TopK::new(2);
        top.push(pair(7, 1, 1.0));
        top.push(pair(3, 9, 1.0));
        top.push(pair(3, 2, 1.0));

        let kept = top.into_sorted_vec();
        assert_eq!(kept, vec![pair(3, 2, 1.0), pair(3, 9, 1.0)]);
    }

    #[test]
    fn zero_k_keeps_nothing() {
        let mut top = TopK::new(0);
        top.push(pair(1, 2, 1.0));
        assert!(top.is_empty());
    }

    #[test]
    fn partition_output_is_bounded_and_strictly_descending() {
        let edges: Vec<(Vertex, Vertex)> = (0..30u32)
            .flat_map(|s| (0..30u32).filter(move |t| (s + 2 * t) % 3 == 0 && s != *t).map(move |t| (s, t)))
            .collect();
        let graph = GraphBuilder::from_edges(edges).build();
        let queries = crate::predict::planner::plan(&graph, 0).queries;

        let result = score_partition(&graph, &queries, 10);
        assert!(result.len() <= 10);
        for window in result.windows(2) {
            assert_eq!(window[0].rank_cmp(&window[1]), Ordering::Less);
        }
        assert!(result.iter().all(|p| p.score > 0.0));
    }

    #[test]
    fn empty_partition_scores_nothing() {
        let graph = GraphBuilder::from_edges([(0, 1)]).build();
        assert!(score_partition(&graph, &[], 10).is_empty());
    }
}
