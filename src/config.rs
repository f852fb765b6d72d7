//! Sync engine configuration persistence
//!
//! Stores user preferences in `~/.config/livesync/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Delay between writing a document into the view and instrumenting it
    #[serde(default = "default_instrument_delay_ms")]
    pub instrument_delay_ms: u64,
    /// Minimum trimmed length (in characters) for a text region to become editable
    #[serde(default = "default_min_editable_chars")]
    pub min_editable_chars: usize,
    /// Tags that count as structural containers in delete mode
    #[serde(default = "default_container_tags")]
    pub container_tags: Vec<String>,
    /// Patch text edits at the span captured during rendering when it is still valid
    #[serde(default)]
    pub prefer_source_spans: bool,
    /// Show the inline-editing hint after each render
    #[serde(default = "default_show_hint")]
    pub show_hint: bool,
    #[serde(default = "default_hint_text")]
    pub hint_text: String,
}

fn default_instrument_delay_ms() -> u64 {
    100
}

fn default_min_editable_chars() -> usize {
    2
}

fn default_container_tags() -> Vec<String> {
    vec!["div".to_string()]
}

fn default_show_hint() -> bool {
    true
}

fn default_hint_text() -> String {
    "Click on any text to edit inline".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            instrument_delay_ms: default_instrument_delay_ms(),
            min_editable_chars: default_min_editable_chars(),
            container_tags: default_container_tags(),
            prefer_source_spans: false,
            show_hint: default_show_hint(),
            hint_text: default_hint_text(),
        }
    }
}

impl SyncConfig {
    /// Load config from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
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

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// True if `tag` counts as a structural container
    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
