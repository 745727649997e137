//! Link prediction pipeline: query planning, partitioning, scoring and merging

pub mod planner;
pub mod partition;
pub mod scorer;
pub mod merge;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Vertex;

/// Number of predictions reported per run
pub const TOP_K: usize = 10;

/// A candidate missing edge `source -> target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub source: Vertex,
    pub target: Vertex,
}

impl Query {
    pub fn new(source: Vertex, target: Vertex) -> Self {
        Self { source, target }
    }
}

/// Outcome of scoring a single pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity {
    /// Positive index value
    Defined(f64),
    /// No common neighbor contributed to the index
    Undefined,
}

/// A scored prediction.
///
/// Ids are internal vertex ids until renumbering replaces them with
/// external ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub source: u64,
    pub target: u64,
    pub score: f64,
}

impl ScoredPair {
    pub fn new(query: Query, score: f64) -> Self {
        Self {
            source: u64::from(query.source),
            target: u64::from(query.target),
            score,
        }
    }

    /// Ranking order: higher score first, ties broken by ascending source
    /// and then ascending target.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl fmt::Display for ScoredPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:.6})", self.source, self.target, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order_breaks_ties_by_ids() {
        let mut pairs = vec![
            ScoredPair { source: 2, target: 1, score: 1.0 },
            ScoredPair { source: 1, target: 5, score: 1.0 },
            ScoredPair { source: 1, target: 4, score: 1.0 },
            ScoredPair { source: 9, target: 9, score: 3.0 },
        ];
        pairs.sort_by(ScoredPair::rank_cmp);

        let ids: Vec<_> = pairs.iter().map(|p| (p.source, p.target)).collect();
        assert_eq!(ids, vec![(9, 9), (1, 4), (1, 5), (2, 1)]);
    }
}
