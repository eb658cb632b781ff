//! Markdown report rendering and re-parsing

use crate::error::{BenchError, Result};
use crate::recommend::{Recommendation, REALTIME_FPS_THRESHOLD};
use crate::table::ResultTable;
use crate::types::RunMetadata;

const TABLE_HEADER: &str =
    "| Model | Size (MB) | Params (M) | mAP 50-95 | mAP 50 | Inference (ms) | FPS |";
const TABLE_SEPARATOR: &str = "|---|---|---|---|---|---|---|";

/// Render the benchmark report. Pure apart from reading the wall clock for
/// the header timestamp; persistence and console echo are the caller's job.
pub fn render(table: &ResultTable, recommendation: &Recommendation, meta: &RunMetadata) -> String {
    let mut doc = String::new();

    doc.push_str("# Model Benchmark Report\n\n");
    doc.push_str(&format!(
        "**Generated**: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    doc.push_str(&format!("**Dataset**: `{}`\n", meta.dataset_id));
    doc.push_str(&format!("**Device**: `{}`\n\n", meta.device.label()));

    doc.push_str("## 1. Performance Comparison\n\n");
    doc.push_str(TABLE_HEADER);
    doc.push('\n');
    doc.push_str(TABLE_SEPARATOR);
    doc.push('\n');
    for record in table.all() {
        let size = match record.size_mb {
            Some(mb) => format!("{:.2}", mb),
            None => "n/a".to_string(),
        };
        doc.push_str(&format!(
            "| {} | {} | {:.2} | {:.3} | {:.3} | {:.2} | {:.1} |\n",
            record.model_id,
            size,
            record.params_millions,
            record.map_50_95,
            record.map_50,
            record.inference_ms(),
            record.fps(),
        ));
    }
    doc.push('\n');

    doc.push_str("## 2. Metric Glossary\n\n");
    doc.push_str("* **mAP 50-95**: mean average precision averaged over IoU thresholds 0.50-0.95; the primary accuracy figure.\n");
    doc.push_str("* **mAP 50**: mean average precision at IoU threshold 0.50.\n");
    doc.push_str("* **Params (M)**: parameter count in millions; a proxy for model complexity.\n");
    doc.push_str("* **Inference (ms)**: mean per-image inference latency, excluding pre/post-processing.\n");
    doc.push_str(&format!(
        "* **FPS**: frames evaluable per second over the full per-image latency; {} or more is considered real-time.\n\n",
        REALTIME_FPS_THRESHOLD
    ));

    doc.push_str("## 3. Recommendation\n\n");
    doc.push_str(&format!(
        "**Recommended model**: **{}**\n\n",
        recommendation.model_id
    ));
    doc.push_str(&format!(
        "**Reason**: {}\n\n",
        recommendation.reason.description()
    ));
    if let Some(best_accuracy) = table.best_by(|r| r.map_50_95) {
        doc.push_str(&format!(
            "* Best accuracy: **{}** (mAP 50-95: {:.3})\n",
            best_accuracy.model_id, best_accuracy.map_50_95
        ));
    }
    if let Some(fastest) = table.best_by(|r| r.fps()) {
        doc.push_str(&format!(
            "* Fastest: **{}** ({:.1} FPS)\n",
            fastest.model_id,
            fastest.fps()
        ));
    }

    doc
}

/// One row recovered from a rendered report's comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub model_id: String,
    pub size_mb: Option<f64>,
    pub params_millions: f64,
    pub map_50_95: f64,
    pub map_50: f64,
    pub inference_ms: f64,
    pub fps: f64,
}

/// Parse the comparison table back out of a rendered document
pub fn parse_table(document: &str) -> Result<Vec<ParsedRow>> {
    let mut rows = Vec::new();

    for line in document.lines() {
        let line = line.trim();
        if !line.starts_with('|') {
            continue;
        }

        let cells: Vec<&str> = line
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        if cells.len() != 7 {
            continue;
        }
        // Header and separator rows
        if cells[0] == "Model" || cells[0].chars().all(|c| c == '-' || c == ':') {
            continue;
        }

        let size_mb = match cells[1] {
            "n/a" => None,
            value => Some(parse_cell(value, "Size (MB)")?),
        };

        rows.push(ParsedRow {
            model_id: cells[0].to_string(),
            size_mb,
            params_millions: parse_cell(cells[2], "Params (M)")?,
            map_50_95: parse_cell(cells[3], "mAP 50-95")?,
            map_50: parse_cell(cells[4], "mAP 50")?,
            inference_ms: parse_cell(cells[5], "Inference (ms)")?,
            fps: parse_cell(cells[6], "FPS")?,
        });
    }

    Ok(rows)
}

fn parse_cell(value: &str, column: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|e| BenchError::Report(format!("Bad {} cell '{}': {}", column, value, e)))
}
