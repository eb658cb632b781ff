//! Weight store with auto-download

use drishti_core::{BenchError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// 2GB cap on a single weights artifact
const MAX_WEIGHTS_SIZE: usize = 2_000_000_000;
/// Downloads of large checkpoints can be slow; cap at one hour
const DOWNLOAD_TIMEOUT_SECS: u64 = 3600;

/// Where weight artifacts are cached on disk
#[derive(Debug, Clone)]
pub struct WeightStoreConfig {
    pub weights_dir: PathBuf,
}

impl Default for WeightStoreConfig {
    fn default() -> Self {
        let weights_dir = dirs::home_dir()
            .map(|mut p| {
                p.push(".drishti");
                p.push("weights");
                p
            })
            .unwrap_or_else(|| PathBuf::from("./weights"));
        Self { weights_dir }
    }
}

/// Downloads and caches model weight artifacts. One artifact per variant,
/// fetched at most once; writes are atomic (temp file + rename) so an
/// interrupted download never leaves a partial artifact behind.
pub struct WeightStore {
    config: WeightStoreConfig,
}

impl WeightStore {
    pub fn new(config: WeightStoreConfig) -> Self {
        Self { config }
    }

    pub fn weights_dir(&self) -> &PathBuf {
        &self.config.weights_dir
    }

    /// Create the weights directory if absent (idempotent)
    pub fn ensure_dir(&self) -> Result<PathBuf> {
        let dir = &self.config.weights_dir;
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            info!("Created weights directory: {:?}", dir);
        }
        Ok(dir.clone())
    }

    /// Return the local path for an artifact, downloading it first if it is
    /// not already cached. `checksum` is an optional hex sha256 digest.
    pub async fn ensure_weights(
        &self,
        variant: &str,
        file_name: &str,
        url: &str,
        checksum: &str,
    ) -> Result<PathBuf> {
        validate_file_name(variant, file_name)?;
        validate_url(variant, url)?;

        // Filesystem trouble while caching is this variant's problem, not
        // the run's; keep it skippable
        self.ensure_dir()
            .map_err(|e| load_error(variant, format!("Cannot create weights directory: {}", e)))?;
        let path = self.config.weights_dir.join(file_name);

        if path.exists() {
            info!("Weights for {} already cached at {:?}", variant, path);
            return Ok(path);
        }

        info!("Downloading weights for {} from {}", variant, url);
        let bytes = self.download(variant, url).await?;

        if !checksum.is_empty() {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            let digest = hex::encode(hasher.finalize());
            if digest != checksum {
                return Err(load_error(
                    variant,
                    format!("Checksum mismatch: expected {}, got {}", checksum, digest),
                ));
            }
            info!("Verified checksum for {}", variant);
        } else {
            info!(
                "Downloaded {} bytes for {} (checksum verification skipped)",
                bytes.len(),
                variant
            );
        }

        // Temp file + rename keeps the cached artifact all-or-nothing
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &bytes)
            .map_err(|e| load_error(variant, format!("Failed to write weights artifact: {}", e)))?;
        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            load_error(
                variant,
                format!("Failed to move weights artifact into place: {}", e),
            )
        })?;

        info!("Weights for {} saved to {:?}", variant, path);
        Ok(path)
    }

    async fn download(&self, variant: &str, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| load_error(variant, format!("HTTP client setup failed: {}", e)))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| load_error(variant, format!("Download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(load_error(
                variant,
                format!("Download failed: HTTP {}", response.status()),
            ));
        }

        if let Some(length) = response.content_length() {
            if length > MAX_WEIGHTS_SIZE as u64 {
                return Err(load_error(
                    variant,
                    format!("Artifact too large: {} bytes (max {})", length, MAX_WEIGHTS_SIZE),
                ));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| load_error(variant, format!("Download failed: {}", e)))?;

        if bytes.len() > MAX_WEIGHTS_SIZE {
            return Err(load_error(
                variant,
                format!("Artifact too large: {} bytes (max {})", bytes.len(), MAX_WEIGHTS_SIZE),
            ));
        }
        if bytes.len() < 1024 {
            return Err(load_error(
                variant,
                "Downloaded file too small, likely corrupted".to_string(),
            ));
        }

        Ok(bytes.to_vec())
    }
}

fn load_error(variant: &str, reason: String) -> BenchError {
    BenchError::ModelLoad {
        variant: variant.to_string(),
        reason,
    }
}

fn validate_file_name(variant: &str, file_name: &str) -> Result<()> {
    if file_name.is_empty() || file_name.len() > 255 {
        return Err(load_error(variant, "Invalid artifact file name".to_string()));
    }
    // Artifact names must stay inside the weights directory
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return Err(load_error(
            variant,
            "Artifact file name contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_url(variant: &str, url: &str) -> Result<()> {
    if url.is_empty() || url.len() > 2048 {
        return Err(load_error(variant, "Invalid download URL".to_string()));
    }
    if !url.starts_with("https://") {
        return Err(load_error(
            variant,
            "Only HTTPS URLs are allowed for weight downloads".to_string(),
        ));
    }
    Ok(())
}
