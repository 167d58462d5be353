use std::io::ErrorKind;

use async_trait::async_trait;
use cosmos_core::audio::{AudioAsset, AudioPreloader};
use cosmos_core::{CosmosError, Result};

/// Preloads an audio file by reading it once from disk.
///
/// This brings the file into the OS page cache so the player starts without
/// a stall. It does not decode anything.
#[derive(Debug, Clone, Default)]
pub struct FileAudioPreloader;

impl FileAudioPreloader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioPreloader for FileAudioPreloader {
    async fn preload(&self, asset: &AudioAsset) -> Result<()> {
        let path = asset.path.display().to_string();
        let bytes = tokio::fs::read(&asset.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => CosmosError::asset_not_found(path.clone()),
            _ => CosmosError::io(format!("Failed to read {}: {}", path, e)),
        })?;
        tracing::debug!("[Audio] Preloaded {} ({} bytes)", path, bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_preload_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("track.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let asset = AudioAsset {
            path,
            ..AudioAsset::default()
        };
        assert!(FileAudioPreloader::new().preload(&asset).await.is_ok());
    }

    #[tokio::test]
    async fn test_preload_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let asset = AudioAsset {
            path: temp_dir.path().join("missing.mp3"),
            ..AudioAsset::default()
        };
        let err = FileAudioPreloader::new().preload(&asset).await.unwrap_err();
        assert!(matches!(err, CosmosError::AssetNotFound { .. }));
    }
}
