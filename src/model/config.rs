use serde::{Deserialize, Serialize};

use crate::model::item::ValidationMode;

/// Configuration from config.toml in the store directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub items: ItemsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key holding the serialized item array
    #[serde(default = "default_items_key")]
    pub items_key: String,
    /// Key holding the theme color
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            items_key: default_items_key(),
            theme_key: default_theme_key(),
        }
    }
}

fn default_items_key() -> String {
    "todos".to_string()
}

fn default_theme_key() -> String {
    "themeColor".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsConfig {
    /// How persisted records are checked on load
    #[serde(default)]
    pub validation: ValidationMode,
    /// Whether `edit` may set empty text. When false, edits are trimmed
    /// and an empty result leaves the item unchanged.
    #[serde(default = "default_true")]
    pub allow_empty_edit: bool,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        ItemsConfig {
            validation: ValidationMode::default(),
            allow_empty_edit: true,
        }
    }
}

fn default_true() -> bool {
    true
}
