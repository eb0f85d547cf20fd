use pagecraft_common::{StoreContext, ThemeTokens};
use pagecraft_editor::EditorOptions;
use pagecraft_repository::{Actor, Role};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root of the file-backed page store
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Store name substituted into placeholders
    #[serde(default = "default_store_name")]
    pub store_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Store theme color tokens
    #[serde(default)]
    pub theme: ThemeTokens,

    /// Seconds between auto-saves (5-30)
    #[serde(default = "default_auto_save_seconds")]
    pub auto_save_seconds: u64,

    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Acting identity for commands
    #[serde(default)]
    pub user: UserConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: String,
    pub role: Role,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            role: Role::Owner,
        }
    }
}

fn default_store_dir() -> String {
    ".pagecraft".to_string()
}

fn default_store_name() -> String {
    "My Store".to_string()
}

fn default_auto_save_seconds() -> u64 {
    10
}

fn default_undo_limit() -> usize {
    pagecraft_editor::DEFAULT_UNDO_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the page store
    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }

    pub fn store_context(&self) -> StoreContext {
        let store = StoreContext::new(self.store_name.as_str());
        match &self.logo_url {
            Some(url) => store.with_logo(url.as_str()),
            None => store,
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user.id.as_str(), self.user.role)
    }

    /// Editor options; the auto-save interval is clamped to 5-30 seconds
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions::default()
            .with_auto_save_seconds(self.auto_save_seconds)
            .with_undo_limit(self.undo_limit)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            store_name: default_store_name(),
            logo_url: None,
            theme: ThemeTokens::new(),
            auto_save_seconds: default_auto_save_seconds(),
            undo_limit: default_undo_limit(),
            log_level: default_log_level(),
            user: UserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "storeDir": "pages",
            "storeName": "Acme",
            "theme": { "primary": "#000000" },
            "autoSaveSeconds": 90,
            "undoLimit": 20,
            "user": { "id": "u-7", "role": "viewer" }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir, "pages");
        assert_eq!(config.store_context().name, "Acme");
        assert_eq!(config.theme.get("primary"), Some("#000000"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.actor().role, Role::Viewer);

        let options = config.editor_options();
        assert_eq!(options.auto_save_interval, Duration::from_secs(30));
        assert_eq!(options.undo_limit, 20);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store_dir, ".pagecraft");
        assert_eq!(config.store_name, "My Store");
        assert_eq!(config.user.role, Role::Owner);
        assert_eq!(config.editor_options().auto_save_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}
