//! Shared types for the benchmark run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compute device for the whole run, selected once (never per variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    /// Human-readable label used in the report header
    pub fn label(&self) -> &'static str {
        match self {
            Device::Cpu => "CPU",
            Device::Gpu => "CUDA (GPU)",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu => write!(f, "gpu"),
        }
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "gpu" | "cuda" => Ok(Device::Gpu),
            other => Err(format!("Unknown device '{}', expected cpu or gpu", other)),
        }
    }
}

/// Run-level metadata rendered into the report header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Dataset identifier the evaluation actually ran against (after any
    /// fallback to the bundled demonstration dataset)
    pub dataset_id: String,
    pub device: Device,
}
