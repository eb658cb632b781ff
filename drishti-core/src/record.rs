//! Per-variant benchmark record

use serde::{Deserialize, Serialize};

/// Per-image latency contributors from a single evaluation pass, in
/// milliseconds. All three terms must come from the same pass; FPS is only
/// ever derived from the full breakdown, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyBreakdown {
    pub preprocess_ms: f64,
    pub inference_ms: f64,
    pub postprocess_ms: f64,
}

impl LatencyBreakdown {
    pub fn total_ms(&self) -> f64 {
        self.preprocess_ms + self.inference_ms + self.postprocess_ms
    }

    /// Frames evaluable per second over the full per-image latency
    pub fn fps(&self) -> f64 {
        1000.0 / self.total_ms()
    }
}

/// One row of the result table. A record exists only for variants that
/// completed evaluation without error; failed variants are skipped, never
/// recorded with placeholder metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub model_id: String,
    /// On-disk weight footprint in MB; `None` when the artifact is not a
    /// local regular file, so "unmeasured" never reads as "tiny"
    pub size_mb: Option<f64>,
    /// Parameter count in millions, computed once per loaded variant
    pub params_millions: f64,
    /// mAP averaged over IoU thresholds 0.50-0.95
    pub map_50_95: f64,
    /// mAP at IoU 0.50
    pub map_50: f64,
    pub latency: LatencyBreakdown,
}

impl BenchmarkRecord {
    pub fn inference_ms(&self) -> f64 {
        self.latency.inference_ms
    }

    pub fn fps(&self) -> f64 {
        self.latency.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(pre: f64, inf: f64, post: f64) -> LatencyBreakdown {
        LatencyBreakdown {
            preprocess_ms: pre,
            inference_ms: inf,
            postprocess_ms: post,
        }
    }

    #[test]
    fn test_fps_formula() {
        let latency = breakdown(1.5, 7.0, 1.5);
        assert!((latency.fps() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_uses_all_three_terms() {
        let latency = breakdown(2.0, 10.0, 3.0);
        let expected = 1000.0 / (2.0 + 10.0 + 3.0);
        assert!((latency.fps() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_record_fps_matches_latency_fps() {
        let record = BenchmarkRecord {
            model_id: "yolov8n".to_string(),
            size_mb: Some(12.8),
            params_millions: 3.15,
            map_50_95: 0.37,
            map_50: 0.52,
            latency: breakdown(0.5, 4.0, 0.5),
        };
        assert!((record.fps() - record.latency.fps()).abs() < 1e-9);
        assert!((record.inference_ms() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_size_is_none() {
        let record = BenchmarkRecord {
            model_id: "yolov8s".to_string(),
            size_mb: None,
            params_millions: 11.2,
            map_50_95: 0.44,
            map_50: 0.61,
            latency: breakdown(1.0, 12.0, 1.0),
        };
        assert!(record.size_mb.is_none());
    }
}
