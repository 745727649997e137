//! Combining per-worker rankings into the global ranking

use itertools::Itertools;

use crate::predict::ScoredPair;

/// Merge local top-`k` lists into the global top-`k`, best first.
///
/// Correct as long as every local list is the complete top-`k` of its
/// partition.
pub fn merge_top_k<I>(locals: I, k: usize) -> Vec<ScoredPair>
where
    I: IntoIterator<Item = Vec<ScoredPair>>,
{
    locals
        .into_iter()
        .flatten()
        .sorted_by(ScoredPair::rank_cmp)
        .take(k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: u64, target: u64, score: f64) -> ScoredPair {
        ScoredPair { source, target, score }
    }

    #[test]
    fn merges_and_truncates() {
        let locals = vec![
            vec![pair(0, 1, 5.0), pair(0, 2, 1.0)],
            vec![],
            vec![pair(3, 1, 4.0), pair(3, 2, 3.0), pair(3, 4, 0.5)],
        ];

        let merged = merge_top_k(locals, 3);
        assert_eq!(merged, vec![pair(0, 1, 5.0), pair(3, 1, 4.0), pair(3, 2, 3.0)]);
    }

    #[test]
    fn equal_scores_across_workers_use_id_order() {
        let locals = vec![vec![pair(5, 0, 2.0)], vec![pair(1, 7, 2.0)], vec![pair(1, 3, 2.0)]];

        let merged = merge_top_k(locals, 2);
        assert_eq!(merged, vec![pair(1, 3, 2.0), pair(1, 7, 2.0)]);
    }

    #[test]
    fn empty_inputs_merge_to_empty() {
        assert!(merge_top_k(Vec::<Vec<ScoredPair>>::new(), 10).is_empty());
        assert!(merge_top_k(vec![vec![], vec![]], 10).is_empty());
    }
}
