//! Configuration for a benchmark run

use crate::types::Device;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Bundled demonstration dataset used when the configured descriptor is
/// absent (a warning, not an error)
pub const FALLBACK_DATASET: &str = "coco128.yaml";

/// Benchmark run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Variants to test, in testing order
    pub variants: Vec<String>,
    /// Path to the dataset descriptor (yaml); only checked for existence
    pub dataset: PathBuf,
    /// Directory the rendered report is written into (created if absent)
    pub results_dir: PathBuf,
    /// Compute device for the whole run
    pub device: Device,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            variants: vec![
                "yolov8n".to_string(),
                "yolov8s".to_string(),
                "yolov8m".to_string(),
            ],
            dataset: PathBuf::from("data/custom_dataset/dataset.yaml"),
            results_dir: PathBuf::from("results/benchmark"),
            device: Device::Cpu,
        }
    }
}

impl BenchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.variants.is_empty() {
            return Err("At least one variant must be configured".to_string());
        }

        if self.variants.len() > 64 {
            return Err("Too many variants (max 64)".to_string());
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if variant.is_empty() {
                return Err("Variant id must not be empty".to_string());
            }
            if !seen.insert(variant.as_str()) {
                return Err(format!("Duplicate variant id: {}", variant));
            }
        }

        if self.results_dir.as_os_str().is_empty() {
            return Err("Results directory must not be empty".to_string());
        }

        Ok(())
    }
}
