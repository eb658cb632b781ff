//! drishti-bench: benchmark orchestration
//!
//! Wires the collaborators from drishti-models into the engine from
//! drishti-core: collect metrics per variant, skip failures, recommend,
//! render, persist. The binary in main.rs is a thin clap front end.

pub mod collector;
pub mod runner;

pub use collector::MetricCollector;
pub use runner::BenchmarkRunner;
