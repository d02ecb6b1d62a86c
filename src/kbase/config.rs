use crate::error::{KbError, Result};
use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PREVIEW_WIDTH: usize = 100;

/// Keys accepted by [`KbConfig::get`] and [`KbConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["default-category", "preview-width"];

/// Client configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbConfig {
    /// Category used when a command is not given one explicitly
    #[serde(default = "default_category")]
    pub default_category: Category,

    /// Terminal columns available to listing lines
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

fn default_category() -> Category {
    Category::Pabx
}

fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            preview_width: default_preview_width(),
        }
    }
}

impl KbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-category" => Ok(self.default_category.to_string()),
            "preview-width" => Ok(self.preview_width.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-category" => {
                self.default_category = value.parse()?;
            }
            "preview-width" => {
                let width: usize = value.trim().parse().map_err(|_| {
                    KbError::Api(format!("preview-width must be a number, got '{}'", value))
                })?;
                if width < 20 {
                    return Err(KbError::Api("preview-width must be at least 20".into()));
                }
                self.preview_width = width;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> KbError {
    KbError::Api(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KbConfig::default();
        assert_eq!(config.default_category, Category::Pabx);
        assert_eq!(config.preview_width, 100);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = KbConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, KbConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = KbConfig::default();
        config.set("default-category", "OMNI").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = KbConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_category, Category::Omni);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: KbConfig = serde_json::from_str(r#"{"default_category":"omni"}"#).unwrap();
        assert_eq!(config.default_category, Category::Omni);
        assert_eq!(config.preview_width, 100);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = KbConfig::default();
        assert!(matches!(
            config.set("default-category", "sales"),
            Err(KbError::InvalidCategory(_))
        ));
        assert!(config.set("preview-width", "wide").is_err());
        assert!(config.set("preview-width", "5").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, KbConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let config = KbConfig::default();
        assert_eq!(config.get("default-category").unwrap(), "pabx");
        assert_eq!(config.get("preview-width").unwrap(), "100");
        assert!(config.get("file-ext").is_err());
    }
}
