//! Persistent named layout store
//!
//! Tracks captured window structures under user-chosen names and persists
//! them to disk. Layouts are stored in MRU (most recently used) order;
//! capacity is enforced by callers via [`LayoutStore::prune`].

use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::structure::DockStructure;

/// A single saved layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLayout {
    /// User-chosen name ("debugging", "wide editor", ...)
    pub name: String,
    /// Timestamp when last saved (Unix epoch seconds)
    pub saved_at: u64,
    /// The captured structure, including any native geometry blob
    pub structure: DockStructure,
}

impl SavedLayout {
    /// Create a new layout saved at the current time
    pub fn new(name: impl Into<String>, structure: DockStructure) -> Self {
        Self {
            name: name.into(),
            saved_at: now_epoch_secs(),
            structure,
        }
    }

    /// Update for re-saving under the same name
    pub fn touch(&mut self, structure: DockStructure) {
        self.saved_at = now_epoch_secs();
        self.structure = structure;
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Persistent collection of named layouts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStore {
    /// Schema version for forward compatibility
    #[serde(default)]
    pub version: u32,
    /// Saved layouts, most recently saved first
    pub layouts: Vec<SavedLayout>,
}

impl LayoutStore {
    pub const CURRENT_VERSION: u32 = 1;

    /// Load the store from disk, or return an empty one
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::layouts_file() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Load the store from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading layouts from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing layouts from {}", path.display()))
    }

    /// Save the store to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::layouts_file()
            .context("no config directory available")?;
        crate::config_paths::ensure_config_dir()
            .map_err(|e| anyhow::anyhow!(e))
            .context("creating config directory")?;
        self.save_to(&path)
    }

    /// Save the store to an explicit path
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self).context("serializing layouts")?;
        std::fs::write(path, contents)
            .with_context(|| format!("writing layouts to {}", path.display()))
    }

    /// Save a structure under a name (or update if already present)
    ///
    /// The layout moves to the front of the list either way.
    pub fn remember(&mut self, name: impl Into<String>, structure: DockStructure) {
        let name = name.into();
        if let Some(idx) = self.find_index(&name) {
            self.layouts[idx].touch(structure);
            let layout = self.layouts.remove(idx);
            self.layouts.insert(0, layout);
        } else {
            self.layouts.insert(0, SavedLayout::new(name, structure));
        }
    }

    /// Look up a layout by name
    pub fn get(&self, name: &str) -> Option<&SavedLayout> {
        self.layouts.iter().find(|l| l.name == name)
    }

    /// Remove a layout by name
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.layouts.len();
        self.layouts.retain(|l| l.name != name);
        self.layouts.len() != before
    }

    /// Clear all saved layouts
    pub fn clear(&mut self) {
        self.layouts.clear();
    }

    /// Names in MRU order
    pub fn names(&self) -> Vec<&str> {
        self.layouts.iter().map(|l| l.name.as_str()).collect()
    }

    /// Drop the oldest layouts beyond `max`
    pub fn prune(&mut self, max: usize) {
        if self.layouts.len() > max {
            tracing::debug!(
                "Pruned {} layouts beyond capacity {}",
                self.layouts.len() - max,
                max
            );
            self.layouts.truncate(max);
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Find index of a layout by name
    fn find_index(&self, name: &str) -> Option<usize> {
        self.layouts.iter().position(|l| l.name == name)
    }
}
