//! Error types for the link predictor

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions raised while loading inputs or running the pipeline.
///
/// Pairs whose similarity is undefined are not errors; see
/// [`crate::predict::Similarity`].
#[derive(Debug, Error)]
pub enum PredictError {
    /// Configuration rejected before any run starts
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required input file does not exist
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Edge list line that is not two unsigned integers
    #[error("malformed edge at line {line}: {content:?}")]
    MalformedEdge { line: usize, content: String },

    /// Vertex id too large to allocate adjacency for
    #[error("vertex id {id} at line {line} exceeds the limit of {limit} vertices")]
    VertexLimit { line: usize, id: u64, limit: usize },

    /// Renumbering line that is not two unsigned integers
    #[error("malformed renumbering entry at line {line}: {content:?}")]
    MalformedRenumber { line: usize, content: String },

    /// The same internal id is mapped twice
    #[error("internal id {internal} mapped more than once (line {line})")]
    DuplicateRenumber { internal: u64, line: usize },

    /// Internal id absent from a non-empty renumbering table
    #[error("no external id for internal vertex {0}")]
    RenumberMiss(u64),
}
