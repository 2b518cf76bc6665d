//! Config file storage
//!
//! Directory structure:
//! ~/.dieselscope/
//!   config.yaml          # Model config: base series, sliders, fleet inputs
//!   dieselscope.log      # Log file (see `logging`)

use std::fs;
use std::path::{Path, PathBuf};

use dieselscope_core::ModelConfig;

use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    AlreadyExists(PathBuf),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::AlreadyExists(path) => {
                write!(f, "{} already exists (use --force to overwrite)", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Parse a model config from YAML
pub fn config_from_yaml(yaml: &str) -> Result<ModelConfig, StorageError> {
    serde_saphyr::from_str(yaml)
        .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
}

/// Serialize a model config to YAML
pub fn config_to_yaml(config: &ModelConfig) -> Result<String, StorageError> {
    serde_saphyr::to_string(config)
        .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))
}

/// Manages the data directory holding config.yaml
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.dieselscope/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dieselscope")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Load config.yaml, or the built-in config if the file is absent
    pub fn load_config(&self) -> Result<ModelConfig, StorageError> {
        let path = self.config_path();
        if !path.exists() {
            tracing::debug!("No config at {}, using built-in data", path.display());
            return Ok(ModelConfig::default());
        }
        load_config_file(&path)
    }

    pub fn save_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;
        let yaml = config_to_yaml(config)?;
        atomic_write(&self.config_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }

    /// Write the built-in config to config.yaml.
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn init(&self, force: bool) -> Result<PathBuf, StorageError> {
        let path = self.config_path();
        if path.exists() && !force {
            return Err(StorageError::AlreadyExists(path));
        }
        self.save_config(&ModelConfig::default())?;
        tracing::info!("Wrote default config to {}", path.display());
        Ok(path)
    }
}

/// Load a config from an explicit path
pub fn load_config_file(path: &Path) -> Result<ModelConfig, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    config_from_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dieselscope_core::AdjustmentParams;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let store = DataDirectory::new(dir.path().to_path_buf());

        let config = store.load_config().unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = DataDirectory::new(dir.path().join("nested"));
        let config = ModelConfig::default().with_params(AdjustmentParams::new(25, -4, 10));

        store.save_config(&config).unwrap();
        let loaded = store.load_config().unwrap();

        assert_eq!(loaded.params, config.params);
        assert_eq!(loaded.base_series, config.base_series);
        assert_eq!(loaded.sliders, config.sliders);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let store = DataDirectory::new(dir.path().to_path_buf());

        store.init(false).unwrap();
        assert!(matches!(
            store.init(false),
            Err(StorageError::AlreadyExists(_))
        ));
        assert!(store.init(true).is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "params:\n  sales_decline: 30\n  mileage_change: 0\n  survival_boost: -5\n";
        let config = config_from_yaml(yaml).unwrap();
        assert_eq!(config.params, AdjustmentParams::new(30, 0, -5));
        assert_eq!(config.base_series, ModelConfig::default().base_series);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let yaml = "base_series:\n  years: []\n  consumption: []\n";
        assert!(matches!(config_from_yaml(yaml), Err(StorageError::Parse(_))));
    }
}
