//! Error types for the benchmark pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Model load error for '{variant}': {reason}")]
    ModelLoad { variant: String, reason: String },

    #[error("Evaluation error for '{variant}': {reason}")]
    Evaluation { variant: String, reason: String },

    #[error("No variant produced usable results")]
    EmptyTable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Per-variant failures are contained at the collector boundary and
    /// skipped; everything else terminates the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            BenchError::ModelLoad { .. } | BenchError::Evaluation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
