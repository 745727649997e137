//! Configuration management for the link predictor

use crate::error::PredictError;
use crate::predict::TOP_K;
use serde::{Deserialize, Serialize};

/// Parameters shared by every benchmark run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum out-degree for a vertex to become a query candidate
    pub min_degree: usize,

    /// Number of times the whole pipeline is repeated
    pub repeat: usize,

    /// Size of the reported ranking
    pub top_k: usize,

    /// Number of query partitions scored in parallel
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_degree: 100,
            repeat: 10,
            top_k: TOP_K,
            workers: num_cpus::get(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values.
    ///
    /// A worker count of zero means "use every available core".
    pub fn new(min_degree: usize, repeat: usize, workers: usize) -> Self {
        let workers = if workers > 0 { workers } else { num_cpus::get() };
        Self {
            min_degree,
            repeat,
            top_k: TOP_K,
            workers,
        }
    }

    /// Reject settings the benchmark cannot run with
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.repeat == 0 {
            return Err(PredictError::InvalidConfig(
                "repeat count must be at least 1".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(PredictError::InvalidConfig(
                "top-k must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(PredictError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
