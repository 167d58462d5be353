//! Configuration service.
//!
//! Loads and saves `config.toml`. A missing or empty file means defaults; a
//! file that exists but does not parse or validate is an error.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use cosmos_core::config::CosmosConfig;
use cosmos_core::{CosmosError, Result};

/// Loads, caches and atomically saves the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first access.
    cache: Arc<RwLock<Option<CosmosConfig>>>,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    pub fn get_config(&self) -> Result<CosmosConfig> {
        {
            let cached = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load()?;
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reads the file without touching the cache.
    pub fn load(&self) -> Result<CosmosConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[Config] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(CosmosConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            CosmosError::io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(CosmosConfig::default());
        }

        let config: CosmosConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!("[Config] Loaded {}", self.path.display());
        Ok(config)
    }

    /// Validates and writes the configuration through a temporary file and
    /// an atomic rename.
    pub fn save(&self, config: &CosmosConfig) -> Result<()> {
        config.validate()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(config)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        tracing::info!("[Config] Saved {}", self.path.display());
        Ok(())
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns `true` when a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&CosmosConfig::default())?;
        Ok(true)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            CosmosError::config(format!("{} has no file name", self.path.display()))
        })?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let service = ConfigService::new("/tmp/cosmos/config.toml");
        assert_eq!(
            service.temp_path().unwrap(),
            PathBuf::from("/tmp/cosmos/.config.toml.tmp")
        );
    }

    #[test]
    fn test_cache_survives_file_removal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(&path);

        let mut config = CosmosConfig::default();
        config.scene.star_count = 42;
        service.save(&config).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(service.get_config().unwrap().scene.star_count, 42);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap(), CosmosConfig::default());
    }
}
