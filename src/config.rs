//! Engine configuration persistence
//!
//! Stores layout engine preferences in `~/.config/drydock/config.yaml`.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::structure::DockArea;

/// Engine configuration that persists across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    /// Attempt the native-geometry fast path when a structure carries a blob.
    #[serde(default = "default_use_native_state")]
    pub use_native_state: bool,
    /// Include control mementos when capturing structures.
    #[serde(default = "default_capture_mementos")]
    pub capture_mementos: bool,
    /// Area receiving controls opened without an explicit area.
    #[serde(default = "default_area")]
    pub default_area: DockArea,
    /// Capacity of the saved-layout store.
    #[serde(default = "default_max_saved_layouts")]
    pub max_saved_layouts: usize,
}

fn default_use_native_state() -> bool {
    true
}

fn default_capture_mementos() -> bool {
    true
}

fn default_area() -> DockArea {
    DockArea::Left
}

fn default_max_saved_layouts() -> usize {
    16
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            use_native_state: default_use_native_state(),
            capture_mementos: default_capture_mementos(),
            default_area: default_area(),
            max_saved_layouts: default_max_saved_layouts(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file()
            .context("no config directory available")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("serializing config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("writing config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
