//! Evaluation seam and the recorded-results implementation

use crate::provider::LoadedModel;
use async_trait::async_trait;
use drishti_core::{BenchError, Device, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Per-image timing contributors reported by an evaluation pass, in
/// milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalSpeed {
    pub preprocess_ms: f64,
    pub inference_ms: f64,
    pub postprocess_ms: f64,
}

/// Raw figures from one evaluation pass over the held-out set. This shape
/// never travels past the metric collector, which wraps it into a
/// `BenchmarkRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    pub map_50_95: f64,
    pub map_50: f64,
    pub speed: EvalSpeed,
}

/// Runs a loaded model against a dataset and reports accuracy and timing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(
        &self,
        model: &LoadedModel,
        dataset: &str,
        device: Device,
    ) -> Result<EvalResult>;
}

/// Evaluator that replays results recorded from a previous evaluation run,
/// keyed by variant id. Lets the whole pipeline run offline; live
/// evaluation backends plug in through the same trait.
#[derive(Debug)]
pub struct RecordedEvaluator {
    results: HashMap<String, EvalResult>,
}

impl RecordedEvaluator {
    pub fn new(results: HashMap<String, EvalResult>) -> Self {
        Self { results }
    }

    /// Load recorded results from a JSON file mapping variant id to result
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let results: HashMap<String, EvalResult> = serde_json::from_str(&raw)
            .map_err(|e| BenchError::Config(format!("Bad recorded results in {:?}: {}", path, e)))?;
        Ok(Self::new(results))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[async_trait]
impl Evaluator for RecordedEvaluator {
    async fn evaluate(
        &self,
        model: &LoadedModel,
        dataset: &str,
        _device: Device,
    ) -> Result<EvalResult> {
        self.results
            .get(&model.variant_id)
            .cloned()
            .ok_or_else(|| BenchError::Evaluation {
                variant: model.variant_id.clone(),
                reason: format!("No recorded result for this variant (dataset '{}')", dataset),
            })
    }
}
