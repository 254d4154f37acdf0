use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("taskview")
        .join("tasks.json")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TaskViewConfig {
    /// Location of the JSON task snapshot.
    pub data_path: PathBuf,
    /// Owner to scope snapshots to. `None` means the store holds a single
    /// user's tasks.
    pub owner_id: Option<String>,
}

impl Default for TaskViewConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            owner_id: None,
        }
    }
}

impl TaskViewConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("taskview")
            .join("config.json")
    }

    /// Load from the default location. A missing or unreadable config is
    /// never fatal; defaults apply.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("invalid config at {}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskViewConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config, TaskViewConfig::default());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"owner_id":"u1"}"#).unwrap();
        let config = TaskViewConfig::load_from(&path);
        assert_eq!(config.owner_id.as_deref(), Some("u1"));
        assert_eq!(config.data_path, TaskViewConfig::default().data_path);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(TaskViewConfig::load_from(&path), TaskViewConfig::default());
    }
}
