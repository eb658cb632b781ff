//! drishti-core: benchmark engine for comparing object-detection model variants
//!
//! Holds the pure parts of the pipeline: the per-variant result record, the
//! insertion-ordered result table, the recommendation rule, and the report
//! renderer. Model loading and evaluation live behind trait seams in
//! drishti-models; orchestration lives in drishti-bench.

pub mod config;
pub mod error;
pub mod record;
pub mod recommend;
pub mod report;
pub mod table;
pub mod types;

pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use record::{BenchmarkRecord, LatencyBreakdown};
pub use recommend::{recommend, Recommendation, RecommendReason};
pub use table::ResultTable;
pub use types::{Device, RunMetadata};
