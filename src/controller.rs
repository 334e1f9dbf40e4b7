use std::path::{Path, PathBuf};

use gpui::EventEmitter;

use crate::{
    configuration::{Configuration, Server},
    editor::ServerStore,
};

pub struct ConfigurationChanged;

pub struct ServerController {
    configuration: Configuration,
    path: PathBuf,
    last_error: Option<String>,
}

impl EventEmitter<ConfigurationChanged> for ServerController {}

impl ServerController {
    pub fn load(path: PathBuf) -> Self {
        let configuration = read_configuration(&path);
        Self {
            configuration,
            path,
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reload(&mut self) {
        self.configuration = read_configuration(&self.path);
    }

    // Kept until taken; a later successful write does not clear it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    fn persist(&mut self) {
        match self.configuration.save(&self.path) {
            Ok(()) => {
                log::info!("[controller] saved {}", self.path.display());
            }
            Err(error) => {
                log::warn!("[controller] {error}");
                self.last_error = Some(error);
            }
        }
    }
}

impl ServerStore for ServerController {
    fn configuration_copy(&self) -> Configuration {
        self.configuration.clone()
    }

    fn save_servers(&mut self, servers: Vec<Server>, local_port: i32, portable_mode: bool) {
        self.configuration.configs = servers;
        self.configuration.local_port = local_port;
        self.configuration.portable_mode = portable_mode;
        self.persist();
    }

    fn select_server_index(&mut self, index: usize) {
        self.configuration.index = i32::try_from(index).unwrap_or(i32::MAX);
        self.persist();
    }
}

fn read_configuration(path: &Path) -> Configuration {
    if !path.exists() {
        log::info!(
            "[controller] no configuration at {}, using defaults",
            path.display()
        );
        return Configuration::default();
    }
    match Configuration::load(path) {
        Ok(configuration) => {
            log::info!(
                "[controller] loaded {} servers from {}",
                configuration.configs.len(),
                path.display()
            );
            configuration
        }
        Err(error) => {
            log::warn!("[controller] {error}; using defaults");
            Configuration::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::CONFIGURATION_FILE_NAME;

    fn server(address: &str) -> Server {
        Server {
            server: address.into(),
            password: "secret".into(),
            ..Server::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let controller = ServerController::load(directory.path().join(CONFIGURATION_FILE_NAME));
        assert_eq!(controller.configuration_copy(), Configuration::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        let controller = ServerController::load(path);
        assert!(controller.configuration_copy().configs.is_empty());
    }

    #[test]
    fn save_servers_persists_and_reloads() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        let mut controller = ServerController::load(path.clone());

        controller.save_servers(vec![server("1.1.1.1"), server("2.2.2.2")], 1081, false);
        controller.select_server_index(1);
        assert_eq!(controller.take_error(), None);

        let reopened = ServerController::load(path);
        let configuration = reopened.configuration_copy();
        assert_eq!(configuration.configs.len(), 2);
        assert_eq!(configuration.index, 1);
        assert_eq!(configuration.local_port, 1081);
        assert!(!configuration.portable_mode);
    }

    #[test]
    fn copy_is_independent() {
        let directory = tempfile::tempdir().unwrap();
        let mut controller = ServerController::load(directory.path().join(CONFIGURATION_FILE_NAME));
        controller.save_servers(vec![server("1.1.1.1")], 1080, true);

        let mut copy = controller.configuration_copy();
        copy.configs.clear();
        assert_eq!(controller.configuration_copy().configs.len(), 1);
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        let mut controller = ServerController::load(path.clone());

        let external = Configuration {
            configs: vec![server("example.com")],
            ..Configuration::default()
        };
        external.save(&path).unwrap();

        controller.reload();
        assert_eq!(controller.configuration_copy(), external);
    }

    #[test]
    fn write_failure_is_reported() {
        let directory = tempfile::tempdir().unwrap();
        let mut controller = ServerController::load(directory.path().to_path_buf());
        controller.save_servers(vec![server("1.1.1.1")], 1080, true);
        assert!(controller.take_error().is_some());
        assert_eq!(controller.take_error(), None);
    }

    #[test]
    fn failed_server_write_survives_later_index_write() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CONFIGURATION_FILE_NAME);
        std::fs::create_dir(&path).unwrap();
        let mut controller = ServerController::load(path.clone());

        controller.save_servers(vec![server("1.1.1.1")], 1080, true);
        std::fs::remove_dir(&path).unwrap();
        controller.select_server_index(0);

        assert!(path.is_file());
        assert!(controller.take_error().is_some());
    }
}
