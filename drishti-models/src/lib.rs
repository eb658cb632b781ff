//! drishti-models: model and evaluation collaborators for the benchmark engine
//!
//! Provides the two external seams the engine depends on: a `ModelProvider`
//! that resolves variant ids to loaded weight artifacts (downloading them on
//! first use), and an `Evaluator` that produces accuracy and timing figures
//! for a loaded model on a dataset.

pub mod evaluator;
pub mod provider;
pub mod registry;
pub mod safetensors;
pub mod weights;

pub use evaluator::{EvalResult, EvalSpeed, Evaluator, RecordedEvaluator};
pub use provider::{HubModelProvider, LoadedModel, ModelProvider};
pub use registry::VariantSpec;
pub use weights::{WeightStore, WeightStoreConfig};
