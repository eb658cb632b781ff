//! Sequential benchmark runner

use crate::collector::MetricCollector;
use drishti_core::config::FALLBACK_DATASET;
use drishti_core::{
    recommend, report, BenchConfig, BenchError, Result, ResultTable, RunMetadata,
};
use drishti_models::{Evaluator, ModelProvider};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const REPORT_FILE_NAME: &str = "benchmark_report.md";

/// Runs the configured variants one at a time, in order, then renders and
/// persists the report. Evaluations never overlap; each variant's model is
/// gone before the next load begins.
pub struct BenchmarkRunner {
    config: BenchConfig,
    provider: Arc<dyn ModelProvider>,
    evaluator: Arc<dyn Evaluator>,
}

impl BenchmarkRunner {
    pub fn new(
        config: BenchConfig,
        provider: Arc<dyn ModelProvider>,
        evaluator: Arc<dyn Evaluator>,
    ) -> Result<Self> {
        config.validate().map_err(BenchError::Config)?;
        Ok(Self {
            config,
            provider,
            evaluator,
        })
    }

    /// Run the whole benchmark; returns the path of the written report.
    /// Per-variant failures are logged and skipped; only "no usable results
    /// at all" escalates, as `BenchError::EmptyTable`.
    pub async fn run(&self) -> Result<PathBuf> {
        let dataset_id = self.resolve_dataset();
        let device = self.config.device;
        info!("Starting benchmark on dataset: {}", dataset_id);
        info!("Compute device: {}", device.label());

        let collector = MetricCollector::new(self.provider.as_ref(), self.evaluator.as_ref());
        let mut table = ResultTable::new();

        for variant in &self.config.variants {
            info!("Testing variant: {}", variant);
            match collector.collect(variant, &dataset_id, device).await {
                Ok(record) => {
                    info!(
                        "{}: mAP50-95={:.3}, FPS={:.1}",
                        record.model_id,
                        record.map_50_95,
                        record.fps()
                    );
                    table.append(record);
                }
                Err(e) if e.is_skippable() => {
                    error!("Skipping variant {}: {}", variant, e);
                }
                Err(e) => return Err(e),
            }
        }

        let recommendation = recommend(&table)?;
        let meta = RunMetadata { dataset_id, device };
        let document = report::render(&table, &recommendation, &meta);

        fs::create_dir_all(&self.config.results_dir)?;
        let report_path = self.config.results_dir.join(REPORT_FILE_NAME);
        fs::write(&report_path, &document)?;
        info!("Report written to {:?}", report_path);

        // Console echo; the log stream already carries the per-variant lines
        println!("{}", document);

        Ok(report_path)
    }

    fn resolve_dataset(&self) -> String {
        if self.config.dataset.exists() {
            return self.config.dataset.display().to_string();
        }
        warn!(
            "Dataset descriptor not found: {:?}; falling back to '{}' for demonstration",
            self.config.dataset, FALLBACK_DATASET
        );
        FALLBACK_DATASET.to_string()
    }
}
