//! Metric collector: one variant in, one record (or a skippable error) out

use drishti_core::{BenchError, BenchmarkRecord, Device, LatencyBreakdown, Result};
use drishti_models::{EvalResult, Evaluator, LoadedModel, ModelProvider};
use tracing::debug;

/// Runs one variant through load and evaluation and normalizes the outcome
/// into a `BenchmarkRecord`. Failures come back as values; the caller owns
/// the skip-and-continue policy.
pub struct MetricCollector<'a> {
    provider: &'a dyn ModelProvider,
    evaluator: &'a dyn Evaluator,
}

impl<'a> MetricCollector<'a> {
    pub fn new(provider: &'a dyn ModelProvider, evaluator: &'a dyn Evaluator) -> Self {
        Self {
            provider,
            evaluator,
        }
    }

    /// Load, evaluate, and wrap one variant. The loaded model goes out of
    /// scope before this returns, on success and failure alike, so the next
    /// variant never overlaps with its resources.
    pub async fn collect(
        &self,
        variant_id: &str,
        dataset: &str,
        device: Device,
    ) -> Result<BenchmarkRecord> {
        debug!("Collecting metrics for {}", variant_id);
        let model = self.provider.load(variant_id).await?;
        let eval = self.evaluator.evaluate(&model, dataset, device).await?;
        wrap_result(&model, eval)
    }
}

/// Wrap the evaluator's raw result into the fixed record shape. The raw
/// shape never travels past this boundary.
fn wrap_result(model: &LoadedModel, eval: EvalResult) -> Result<BenchmarkRecord> {
    let invalid = |reason: String| BenchError::Evaluation {
        variant: model.variant_id.clone(),
        reason,
    };

    for (name, value) in [("mAP 50-95", eval.map_50_95), ("mAP 50", eval.map_50)] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(invalid(format!("{} out of range: {}", name, value)));
        }
    }

    let speed = eval.speed;
    for (name, value) in [
        ("preprocess_ms", speed.preprocess_ms),
        ("inference_ms", speed.inference_ms),
        ("postprocess_ms", speed.postprocess_ms),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("{} out of range: {}", name, value)));
        }
    }
    let latency = LatencyBreakdown {
        preprocess_ms: speed.preprocess_ms,
        inference_ms: speed.inference_ms,
        postprocess_ms: speed.postprocess_ms,
    };
    if latency.total_ms() <= 0.0 {
        return Err(invalid("total latency must be positive".to_string()));
    }

    Ok(BenchmarkRecord {
        model_id: model.variant_id.clone(),
        size_mb: model.size_mb,
        params_millions: model.params_millions,
        map_50_95: eval.map_50_95,
        map_50: eval.map_50,
        latency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drishti_models::EvalSpeed;

    struct StubProvider;

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn load(&self, variant_id: &str) -> Result<LoadedModel> {
            if variant_id == "missing" {
                return Err(BenchError::ModelLoad {
                    variant: variant_id.to_string(),
                    reason: "artifact not found".to_string(),
                });
            }
            Ok(LoadedModel {
                variant_id: variant_id.to_string(),
                weights_path: None,
                params_millions: 3.15,
                size_mb: Some(12.8),
            })
        }
    }

    struct StubEvaluator {
        result: EvalResult,
    }

    #[async_trait]
    impl Evaluator for StubEvaluator {
        async fn evaluate(
            &self,
            _model: &LoadedModel,
            _dataset: &str,
            _device: Device,
        ) -> Result<EvalResult> {
            Ok(self.result.clone())
        }
    }

    fn eval(map: f64, pre: f64, inf: f64, post: f64) -> EvalResult {
        EvalResult {
            map_50_95: map,
            map_50: map,
            speed: EvalSpeed {
                preprocess_ms: pre,
                inference_ms: inf,
                postprocess_ms: post,
            },
        }
    }

    #[tokio::test]
    async fn test_collect_builds_record_from_both_collaborators() {
        let provider = StubProvider;
        let evaluator = StubEvaluator {
            result: eval(0.4, 1.0, 8.0, 1.0),
        };
        let collector = MetricCollector::new(&provider, &evaluator);

        let record = collector
            .collect("yolov8n", "coco128.yaml", Device::Cpu)
            .await
            .unwrap();
        assert_eq!(record.model_id, "yolov8n");
        assert_eq!(record.size_mb, Some(12.8));
        assert!((record.params_millions - 3.15).abs() < 1e-9);
        assert!((record.fps() - 100.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_collect_propagates_load_failure_as_skippable() {
        let provider = StubProvider;
        let evaluator = StubEvaluator {
            result: eval(0.4, 1.0, 8.0, 1.0),
        };
        let collector = MetricCollector::new(&provider, &evaluator);

        let err = collector
            .collect("missing", "coco128.yaml", Device::Cpu)
            .await
            .unwrap_err();
        assert!(err.is_skippable());
    }

    #[tokio::test]
    async fn test_out_of_range_accuracy_is_rejected() {
        let provider = StubProvider;
        let evaluator = StubEvaluator {
            result: eval(1.4, 1.0, 8.0, 1.0),
        };
        let collector = MetricCollector::new(&provider, &evaluator);

        match collector.collect("yolov8n", "d", Device::Cpu).await {
            Err(BenchError::Evaluation { reason, .. }) => assert!(reason.contains("mAP 50-95")),
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_total_latency_is_rejected() {
        let provider = StubProvider;
        let evaluator = StubEvaluator {
            result: eval(0.4, 0.0, 0.0, 0.0),
        };
        let collector = MetricCollector::new(&provider, &evaluator);

        assert!(collector.collect("yolov8n", "d", Device::Cpu).await.is_err());
    }

    #[tokio::test]
    async fn test_negative_latency_term_is_rejected() {
        let provider = StubProvider;
        let evaluator = StubEvaluator {
            result: eval(0.4, -1.0, 8.0, 1.0),
        };
        let collector = MetricCollector::new(&provider, &evaluator);

        match collector.collect("yolov8n", "d", Device::Cpu).await {
            Err(BenchError::Evaluation { reason, .. }) => {
                assert!(reason.contains("preprocess_ms"))
            }
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }
}
