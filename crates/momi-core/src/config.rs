use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::MomiError;

/// Name given to the book synthesized on first start and by legacy migration.
pub const DEFAULT_BOOK_NAME: &str = "Mine Opskrifter";

/// Accent colors handed out to new books, cycled by book count.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

/// Top-level Momi configuration, stored at `~/.momi/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomiConfig {
    /// Origin that share links are built on (`<origin>/importer/<token>`).
    #[serde(default = "default_share_base_url")]
    pub share_base_url: Url,

    /// Colors assigned to new books when none is given.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Name of the book created for an empty installation.
    #[serde(default = "default_book_name")]
    pub default_book_name: String,
}

fn default_share_base_url() -> Url {
    Url::parse("http://localhost:5173").expect("static url parses")
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_book_name() -> String {
    DEFAULT_BOOK_NAME.to_string()
}

impl Default for MomiConfig {
    fn default() -> Self {
        Self {
            share_base_url: default_share_base_url(),
            palette: default_palette(),
            default_book_name: default_book_name(),
        }
    }
}

impl MomiConfig {
    /// Returns the Momi home directory (`~/.momi/`).
    pub fn home_dir() -> Result<PathBuf, MomiError> {
        let base = dirs::home_dir().ok_or_else(|| MomiError::Config {
            message: "could not determine home directory".into(),
        })?;
        Ok(base.join(".momi"))
    }

    pub fn config_path() -> Result<PathBuf, MomiError> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    pub fn db_path() -> Result<PathBuf, MomiError> {
        Ok(Self::home_dir()?.join("momi.db"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, MomiError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, MomiError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| MomiError::Serialization(e.to_string()))?;
        if config.palette.is_empty() {
            return Err(MomiError::Config {
                message: "palette must contain at least one color".into(),
            });
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), MomiError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MomiError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Initialize the Momi home directory with default config.
    pub fn init() -> Result<PathBuf, MomiError> {
        let home = Self::home_dir()?;
        std::fs::create_dir_all(&home)?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Ok(home)
    }

    /// Palette color for the book that will be created at position `index`.
    pub fn color_for_index(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = MomiConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: MomiConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config.share_base_url, deserialized.share_base_url);
        assert_eq!(config.palette, deserialized.palette);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: MomiConfig =
            toml::from_str("share_base_url = \"https://opskrifter.example\"").unwrap();
        assert_eq!(config.share_base_url.as_str(), "https://opskrifter.example/");
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(config.default_book_name, DEFAULT_BOOK_NAME);
    }

    #[test]
    fn test_color_cycles_through_palette() {
        let config = MomiConfig::default();
        assert_eq!(config.color_for_index(0), "#3b82f6");
        assert_eq!(config.color_for_index(6), "#3b82f6");
        assert_eq!(config.color_for_index(7), "#10b981");
    }

    #[test]
    fn test_empty_palette_rejected_on_load() {
        let dir = std::env::temp_dir().join(format!("momi-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "palette = []\n").unwrap();
        assert!(matches!(
            MomiConfig::load_from(&path),
            Err(MomiError::Config { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
