//! Recommendation rule over a populated result table

use crate::error::{BenchError, Result};
use crate::record::BenchmarkRecord;
use crate::table::ResultTable;
use serde::{Deserialize, Serialize};

/// Throughput below this is treated as non-viable for live use, regardless
/// of accuracy
pub const REALTIME_FPS_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendReason {
    /// Best mAP 50-95 among variants sustaining the realtime threshold
    RealtimeBestAccuracy,
    /// No variant reached the threshold; fastest variant recommended
    FastestFallback,
}

impl RecommendReason {
    /// Sentence used in the report's recommendation section
    pub fn description(&self) -> &'static str {
        match self {
            RecommendReason::RealtimeBestAccuracy => {
                "It delivers the highest accuracy among the variants that sustain real-time throughput (FPS >= 30)."
            }
            RecommendReason::FastestFallback => {
                "No variant reached 30 FPS; the fastest variant is recommended to keep the pipeline responsive."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub model_id: String,
    pub reason: RecommendReason,
}

/// Two-tier selection: feasibility gate on throughput, then best accuracy.
/// Deterministic; float ties break by insertion order (first max wins).
pub fn recommend(table: &ResultTable) -> Result<Recommendation> {
    if table.is_empty() {
        return Err(BenchError::EmptyTable);
    }

    let realtime: Vec<&BenchmarkRecord> =
        table.filter(|r| r.fps() >= REALTIME_FPS_THRESHOLD);

    if let Some(first) = realtime.first() {
        let mut best = *first;
        for record in realtime.iter().skip(1) {
            if record.map_50_95 > best.map_50_95 {
                best = record;
            }
        }
        return Ok(Recommendation {
            model_id: best.model_id.clone(),
            reason: RecommendReason::RealtimeBestAccuracy,
        });
    }

    let fastest = table.best_by(|r| r.fps()).ok_or(BenchError::EmptyTable)?;
    Ok(Recommendation {
        model_id: fastest.model_id.clone(),
        reason: RecommendReason::FastestFallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LatencyBreakdown;

    fn record(id: &str, fps: f64, map: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            model_id: id.to_string(),
            size_mb: Some(10.0),
            params_millions: 3.0,
            map_50_95: map,
            map_50: map,
            latency: LatencyBreakdown {
                preprocess_ms: 0.0,
                inference_ms: 1000.0 / fps,
                postprocess_ms: 0.0,
            },
        }
    }

    #[test]
    fn test_realtime_best_accuracy_wins() {
        // Scenario A: A is realtime, B is more accurate but too slow
        let mut table = ResultTable::new();
        table.append(record("A", 45.0, 0.50));
        table.append(record("B", 20.0, 0.60));

        let rec = recommend(&table).unwrap();
        assert_eq!(rec.model_id, "A");
        assert_eq!(rec.reason, RecommendReason::RealtimeBestAccuracy);
    }

    #[test]
    fn test_fastest_fallback_when_nothing_is_realtime() {
        // Scenario B: nobody reaches 30 FPS, fastest wins over most accurate
        let mut table = ResultTable::new();
        table.append(record("A", 10.0, 0.50));
        table.append(record("B", 15.0, 0.30));

        let rec = recommend(&table).unwrap();
        assert_eq!(rec.model_id, "B");
        assert_eq!(rec.reason, RecommendReason::FastestFallback);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        // Scenario C
        let table = ResultTable::new();
        match recommend(&table) {
            Err(BenchError::EmptyTable) => {}
            other => panic!("Expected EmptyTable, got {:?}", other),
        }
    }

    #[test]
    fn test_tie_breaks_to_first_inserted() {
        let mut table = ResultTable::new();
        table.append(record("first", 60.0, 0.50));
        table.append(record("second", 90.0, 0.50));

        let rec = recommend(&table).unwrap();
        assert_eq!(rec.model_id, "first");
    }

    #[test]
    fn test_deterministic() {
        let mut table = ResultTable::new();
        table.append(record("A", 45.0, 0.50));
        table.append(record("B", 50.0, 0.55));
        table.append(record("C", 12.0, 0.70));

        let first = recommend(&table).unwrap();
        let second = recommend(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_slow_record_cannot_displace_realtime_pick() {
        let mut table = ResultTable::new();
        table.append(record("A", 45.0, 0.50));
        let before = recommend(&table).unwrap();

        // Below-threshold record with better accuracy changes nothing
        table.append(record("B", 20.0, 0.90));
        let after = recommend(&table).unwrap();
        assert_eq!(before.model_id, after.model_id);
        assert_eq!(after.reason, RecommendReason::RealtimeBestAccuracy);
    }

    #[test]
    fn test_exactly_at_threshold_counts_as_realtime() {
        let mut table = ResultTable::new();
        table.append(record("edge", 30.0, 0.40));

        let rec = recommend(&table).unwrap();
        assert_eq!(rec.model_id, "edge");
        assert_eq!(rec.reason, RecommendReason::RealtimeBestAccuracy);
    }
}
