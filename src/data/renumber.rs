//! Mapping dense internal vertex ids back to external ids

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{is_skipped, parse_id_pair};
use crate::error::PredictError;
use crate::predict::ScoredPair;

/// Internal id to external id table.
///
/// An empty table means ids need no translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberTable {
    external: HashMap<u64, u64>,
}

impl RenumberTable {
    /// Load a renumbering file of `external internal` lines
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PredictError::MissingInput(path.to_path_buf()).into());
        }
        log::info!("Reading renumbering file: {}", path.display());

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let table = Self::parse(&text)?;

        log::info!("Loaded {} renumbering entries", table.len());
        Ok(table)
    }

    /// Parse renumbering text; `#` comments and blank lines are skipped
    pub fn parse(text: &str) -> Result<Self, PredictError> {
        let mut external = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if is_skipped(line) {
                continue;
            }

            let (ext, internal) =
                parse_id_pair::<u64>(line).ok_or_else(|| PredictError::MalformedRenumber {
                    line: idx + 1,
                    content: raw.to_string(),
                })?;
            if external.insert(internal, ext).is_some() {
                return Err(PredictError::DuplicateRenumber {
                    internal,
                    line: idx + 1,
                });
            }
        }

        Ok(Self { external })
    }

    /// Build a table from `(internal, external)` pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        Self {
            external: pairs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty()
    }

    /// External id of an internal vertex
    pub fn lookup(&self, internal: u64) -> Result<u64, PredictError> {
        self.external
            .get(&internal)
            .copied()
            .ok_or(PredictError::RenumberMiss(internal))
    }

    /// Table mapping external ids back to internal ids
    pub fn inverse(&self) -> Self {
        Self {
            external: self.external.iter().map(|(&k, &v)| (v, k)).collect(),
        }
    }

    /// Replace ids in a ranking; scores and order are untouched.
    ///
    /// Fails on the first id missing from a non-empty table.
    pub fn apply(&self, pairs: &[ScoredPair]) -> Result<Vec<ScoredPair>, PredictError> {
        if self.is_empty() {
            return Ok(pairs.to_vec());
        }

        pairs
            .iter()
            .map(|pair| -> Result<ScoredPair, PredictError> {
                Ok(ScoredPair {
                    source: self.lookup(pair.source)?,
                    target: self.lookup(pair.target)?,
                    score: pair.score,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: u64, target: u64, score: f64) -> ScoredPair {
        ScoredPair { source, target, score }
    }

    #[test]
    fn parses_external_internal_lines() {
        let table = RenumberTable::parse("# external internal\n1001 0\n2002\t1\n\n3003 2\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup(1).unwrap(), 2002);
    }

    #[test]
    fn malformed_and_duplicate_lines_fail() {
        assert!(matches!(
            RenumberTable::parse("1 0\nfoo\n"),
            Err(PredictError::MalformedRenumber { line: 2, .. })
        ));
        assert!(matches!(
            RenumberTable::parse("1 0\n2 0\n"),
            Err(PredictError::DuplicateRenumber { internal: 0, line: 2 })
        ));
    }

    #[test]
    fn empty_table_is_identity() {
        let ranking = vec![pair(4, 5, 1.5)];
        assert_eq!(RenumberTable::default().apply(&ranking).unwrap(), ranking);
    }

    #[test]
    fn miss_is_fatal() {
        let table = RenumberTable::from_pairs([(0, 10), (1, 11)]);
        let err = table.apply(&[pair(0, 1, 2.0), pair(0, 7, 1.0)]).unwrap_err();
        assert!(matches!(err, PredictError::RenumberMiss(7)));
    }

    #[test]
    fn bijection_then_inverse_is_identity() {
        let table = RenumberTable::from_pairs((0..20).map(|i| (i, 1_000_000 + (i * 7919) % 20)));
        let ranking = vec![pair(3, 4, 2.5), pair(19, 0, 1.25), pair(7, 7, 0.5)];

        let external = table.apply(&ranking).unwrap();
        assert_ne!(external, ranking);
        assert_eq!(external[0].score, 2.5);

        let back = table.inverse().apply(&external).unwrap();
        assert_eq!(back, ranking);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renumber.txt");
        std::fs::write(&path, "# comment\n500 0\n600 1\n").unwrap();

        let table = RenumberTable::load(&path).unwrap();
        assert_eq!(table.lookup(0).unwrap(), 500);
        assert!(RenumberTable::load(dir.path().join("missing.txt")).is_err());
    }
}
