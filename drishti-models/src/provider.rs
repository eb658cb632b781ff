//! Model provider seam and the hub-backed implementation

use crate::registry;
use crate::safetensors;
use crate::weights::WeightStore;
use async_trait::async_trait;
use drishti_core::{BenchError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A loaded model variant ready for evaluation. Carries only metadata; the
/// collector drops it before the next variant's load begins, so at most one
/// variant's resources are live at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub variant_id: String,
    /// Local weights path when the artifact is a regular file
    pub weights_path: Option<PathBuf>,
    /// Parameter count in millions, computed once at load time
    pub params_millions: f64,
    /// On-disk footprint in MB; `None` when the artifact could not be
    /// measured as a local regular file
    pub size_mb: Option<f64>,
}

/// Resolves a variant id to a loaded model artifact
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn load(&self, variant_id: &str) -> Result<LoadedModel>;
}

/// Provider backed by the built-in registry and the weight store. Loaded
/// metadata is kept in an explicit cache keyed by variant id, so parameter
/// counts are computed once per variant and stale entries can be dropped
/// with `invalidate` when an artifact changes on disk.
pub struct HubModelProvider {
    store: WeightStore,
    cache: RwLock<HashMap<String, Arc<LoadedModel>>>,
}

impl HubModelProvider {
    pub fn new(store: WeightStore) -> Self {
        Self {
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Drop the cached entry for a variant; returns whether one existed
    pub fn invalidate(&self, variant_id: &str) -> bool {
        self.cache.write().remove(variant_id).is_some()
    }

    /// Cached entry for a variant, if any
    pub fn cached(&self, variant_id: &str) -> Option<Arc<LoadedModel>> {
        self.cache.read().get(variant_id).cloned()
    }

    async fn resolve_artifact(&self, variant_id: &str) -> Result<PathBuf> {
        // A variant id naming an existing local file wins over the registry,
        // so custom weights can be benchmarked without registration
        let local = Path::new(variant_id);
        if local.is_file() {
            debug!("Variant {} resolved to local file", variant_id);
            return Ok(local.to_path_buf());
        }

        let spec = registry::lookup(variant_id).ok_or_else(|| BenchError::ModelLoad {
            variant: variant_id.to_string(),
            reason: "Unknown variant and no local file with this name".to_string(),
        })?;
        self.store
            .ensure_weights(variant_id, spec.file_name, spec.url, spec.checksum)
            .await
    }
}

#[async_trait]
impl ModelProvider for HubModelProvider {
    async fn load(&self, variant_id: &str) -> Result<LoadedModel> {
        if let Some(model) = self.cached(variant_id) {
            debug!("Variant {} served from cache", variant_id);
            return Ok((*model).clone());
        }

        let path = self.resolve_artifact(variant_id).await?;

        let size_mb = fs::metadata(&path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len() as f64 / 1e6);

        let elements =
            safetensors::count_tensor_elements(&path).map_err(|e| BenchError::ModelLoad {
                variant: variant_id.to_string(),
                reason: format!("Failed to read weights header: {}", e),
            })?;

        let model = LoadedModel {
            variant_id: variant_id.to_string(),
            weights_path: Some(path),
            params_millions: elements as f64 / 1e6,
            size_mb,
        };
        info!(
            "Loaded {}: {:.2}M params, size {}",
            variant_id,
            model.params_millions,
            model
                .size_mb
                .map(|mb| format!("{:.2} MB", mb))
                .unwrap_or_else(|| "unknown".to_string())
        );

        self.cache
            .write()
            .insert(variant_id.to_string(), Arc::new(model.clone()));
        Ok(model)
    }
}
