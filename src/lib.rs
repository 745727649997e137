//! Core library functions for the graph link predictor

pub mod bench;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod predict;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use error::PredictError;
