use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::configuration::configuration_directory;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AppState {
    #[serde(default)]
    pub show_password: bool,
}

impl AppState {
    pub fn state_file_path() -> PathBuf {
        configuration_directory().join("server-editor.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::state_file_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(state) => {
                    log::info!("[app_state] loaded from {}", path.display());
                    state
                }
                Err(error) => {
                    log::warn!("[app_state] failed to parse {}: {error}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!(
                    "[app_state] no state file at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::state_file_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            log::warn!(
                "[app_state] failed to create state directory {}: {error}",
                parent.display()
            );
        }
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(error) = std::fs::write(path, content) {
                    log::warn!("[app_state] failed to write {}: {error}", path.display());
                }
            }
            Err(error) => {
                log::warn!("[app_state] failed to serialize state: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_broken_file_uses_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("server-editor.toml");
        assert_eq!(AppState::load_from(&path), AppState::default());

        std::fs::write(&path, "show_password = [").unwrap();
        assert_eq!(AppState::load_from(&path), AppState::default());
    }

    #[test]
    fn preferences_survive_restart() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("state").join("server-editor.toml");

        AppState {
            show_password: true,
        }
        .save_to(&path);

        assert!(AppState::load_from(&path).show_password);
    }
}
