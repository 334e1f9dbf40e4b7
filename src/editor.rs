use thiserror::Error;

use crate::configuration::{
    Configuration, ConfigurationError, HostNameKind, Server, check_host_name, check_local_port,
    check_server,
};

pub trait ServerStore {
    fn configuration_copy(&self) -> Configuration;
    fn save_servers(&mut self, servers: Vec<Server>, local_port: i32, portable_mode: bool);
    fn select_server_index(&mut self, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Address,
    Port,
    Password,
    Method,
    Plugin,
    PluginOptions,
    PluginArguments,
    Remarks,
    Timeout,
    LocalPort,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Invalid server address")]
    InvalidAddress,
    #[error("Illegal port number format")]
    IllegalPortFormat,
    #[error("Illegal timeout format")]
    IllegalTimeoutFormat,
    #[error("Illegal port number format")]
    IllegalLocalPortFormat,
    #[error("Please add at least one server")]
    NoServers,
    #[error("{source}")]
    Server {
        source: ConfigurationError,
        field: FormField,
    },
    #[error(transparent)]
    LocalPort(ConfigurationError),
}

impl EditorError {
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::InvalidAddress => Some(FormField::Address),
            Self::IllegalPortFormat => Some(FormField::Port),
            Self::IllegalTimeoutFormat => Some(FormField::Timeout),
            Self::IllegalLocalPortFormat | Self::LocalPort(_) => Some(FormField::LocalPort),
            Self::Server { field, .. } => Some(*field),
            Self::NoServers => None,
        }
    }

    fn from_server_check(source: ConfigurationError) -> Self {
        let field = match source {
            ConfigurationError::ServerBlank => FormField::Address,
            ConfigurationError::PortOutOfRange => FormField::Port,
            ConfigurationError::PasswordBlank => FormField::Password,
            ConfigurationError::TimeoutInvalid { .. } => FormField::Timeout,
            ConfigurationError::LocalPortReserved(_) => FormField::LocalPort,
        };
        Self::Server { source, field }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerForm {
    pub address: String,
    pub port: String,
    pub password: String,
    pub method: String,
    pub plugin: String,
    pub plugin_options: String,
    pub plugin_arguments: String,
    pub remarks: String,
    pub timeout: String,
}

impl ServerForm {
    pub fn from_server(server: &Server) -> Self {
        Self {
            address: server.server.clone(),
            port: server.server_port.to_string(),
            password: server.password.clone(),
            method: server.method_or_default().to_string(),
            plugin: server.plugin.clone(),
            plugin_options: server.plugin_opts.clone(),
            plugin_arguments: server.plugin_args.clone(),
            remarks: server.remarks.clone(),
            timeout: server.timeout.to_string(),
        }
    }

    // Field order matters: the first invalid field wins.
    pub fn to_server(&self) -> Result<Server, EditorError> {
        let address = self.address.trim();
        if check_host_name(address) == HostNameKind::Unknown {
            return Err(EditorError::InvalidAddress);
        }
        let server_port = self
            .port
            .trim()
            .parse::<i32>()
            .map_err(|_| EditorError::IllegalPortFormat)?;
        let timeout = self
            .timeout
            .trim()
            .parse::<i32>()
            .map_err(|_| EditorError::IllegalTimeoutFormat)?;

        let server = Server {
            server: address.to_string(),
            server_port,
            password: self.password.clone(),
            method: self.method.clone(),
            plugin: self.plugin.clone(),
            plugin_opts: self.plugin_options.clone(),
            plugin_args: self.plugin_arguments.clone(),
            remarks: self.remarks.clone(),
            timeout,
        };
        check_server(&server).map_err(EditorError::from_server_check)?;
        Ok(server)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Address => &self.address,
            FormField::Port => &self.port,
            FormField::Password => &self.password,
            FormField::Method => &self.method,
            FormField::Plugin => &self.plugin,
            FormField::PluginOptions => &self.plugin_options,
            FormField::PluginArguments => &self.plugin_arguments,
            FormField::Remarks => &self.remarks,
            FormField::Timeout => &self.timeout,
            FormField::LocalPort => return None,
        };
        Some(value)
    }

    fn slot(&mut self, field: FormField) -> Option<&mut String> {
        let slot = match field {
            FormField::Address => &mut self.address,
            FormField::Port => &mut self.port,
            FormField::Password => &mut self.password,
            FormField::Method => &mut self.method,
            FormField::Plugin => &mut self.plugin,
            FormField::PluginOptions => &mut self.plugin_options,
            FormField::PluginArguments => &mut self.plugin_arguments,
            FormField::Remarks => &mut self.remarks,
            FormField::Timeout => &mut self.timeout,
            FormField::LocalPort => return None,
        };
        Some(slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub delete: bool,
    pub duplicate: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub apply: bool,
}

pub struct ServerListEditor {
    servers: Vec<Server>,
    labels: Vec<String>,
    selected: Option<usize>,
    form: ServerForm,
    local_port: String,
    portable_mode: bool,
    dirty: bool,
}

impl ServerListEditor {
    pub fn new(configuration: Configuration) -> Self {
        let mut editor = Self {
            servers: Vec::new(),
            labels: Vec::new(),
            selected: None,
            form: ServerForm::default(),
            local_port: String::new(),
            portable_mode: false,
            dirty: false,
        };
        editor.load(configuration);
        editor
    }

    pub fn load(&mut self, configuration: Configuration) {
        self.servers = configuration.configs;
        self.render_labels();

        self.selected = if self.servers.is_empty() {
            None
        } else {
            usize::try_from(configuration.index)
                .ok()
                .filter(|index| *index < self.servers.len())
                .or(Some(0))
        };
        self.load_selected_form();

        self.local_port = configuration.local_port.to_string();
        self.portable_mode = configuration.portable_mode;
        self.dirty = false;

        log::debug!(
            "[editor] loaded {} servers, selected={:?}",
            self.servers.len(),
            self.selected
        );
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn form(&self) -> &ServerForm {
        &self.form
    }

    pub fn portable_mode(&self) -> bool {
        self.portable_mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn field_value(&self, field: FormField) -> &str {
        self.form.get(field).unwrap_or(self.local_port.as_str())
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match self.form.slot(field) {
            Some(slot) => {
                if *slot == value {
                    return;
                }
                *slot = value;
            }
            None => {
                if self.local_port == value {
                    return;
                }
                self.local_port = value;
            }
        }
        self.dirty = true;
    }

    pub fn set_portable_mode(&mut self, portable_mode: bool) {
        if self.portable_mode != portable_mode {
            self.portable_mode = portable_mode;
            self.dirty = true;
        }
    }

    pub fn buttons(&self) -> ButtonState {
        let count = self.servers.len();
        ButtonState {
            delete: count > 0,
            duplicate: self.selected.is_some(),
            move_up: self.selected.is_some_and(|index| index > 0),
            move_down: self.selected.is_some_and(|index| index + 1 < count),
            apply: self.is_dirty(),
        }
    }

    pub fn validate_and_commit_current(&mut self) -> Result<(), EditorError> {
        let Some(index) = self.selected.filter(|index| *index < self.servers.len()) else {
            return Ok(());
        };
        let server = self.form.to_server().inspect_err(|error| {
            log::debug!("[editor] row {index} rejected: {error}");
        })?;
        self.labels[index] = server.friendly_name();
        self.servers[index] = server;
        Ok(())
    }

    pub fn select(&mut self, index: usize) -> Result<(), EditorError> {
        if self.selected == Some(index) || index >= self.servers.len() {
            return Ok(());
        }
        self.validate_and_commit_current()?;
        self.selected = Some(index);
        self.load_selected_form();
        Ok(())
    }

    pub fn add(&mut self) -> Result<(), EditorError> {
        self.validate_and_commit_current()?;
        self.servers.push(Server::default());
        self.render_labels();
        self.selected = Some(self.servers.len() - 1);
        self.load_selected_form();
        self.dirty = true;
        Ok(())
    }

    pub fn duplicate(&mut self) -> Result<(), EditorError> {
        self.validate_and_commit_current()?;
        let Some(index) = self.selected else {
            return Ok(());
        };
        let copy = self.servers[index].clone();
        self.servers.insert(index + 1, copy);
        self.render_labels();
        self.selected = Some(index + 1);
        self.load_selected_form();
        self.dirty = true;
        Ok(())
    }

    // Pending edits of the removed row are dropped, not validated.
    pub fn delete(&mut self) {
        let Some(index) = self.selected.filter(|index| *index < self.servers.len()) else {
            return;
        };
        self.servers.remove(index);
        self.render_labels();
        self.selected = if self.servers.is_empty() {
            None
        } else {
            Some(index.min(self.servers.len() - 1))
        };
        self.load_selected_form();
        self.dirty = true;
    }

    pub fn move_selected(&mut self, direction: MoveDirection) -> Result<(), EditorError> {
        self.validate_and_commit_current()?;
        let Some(index) = self.selected else {
            return Ok(());
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.servers.len() => index + 1,
            _ => return Ok(()),
        };
        let server = self.servers.remove(index);
        self.servers.insert(target, server);
        let label = self.labels.remove(index);
        self.labels.insert(target, label);
        self.selected = Some(target);
        self.dirty = true;
        Ok(())
    }

    pub fn save(&mut self, store: &mut impl ServerStore) -> Result<(), EditorError> {
        self.validate_and_commit_current()?;
        if self.servers.is_empty() {
            return Err(EditorError::NoServers);
        }
        let local_port = self
            .local_port
            .trim()
            .parse::<i32>()
            .map_err(|_| EditorError::IllegalLocalPortFormat)?;
        check_local_port(local_port).map_err(EditorError::LocalPort)?;

        log::info!(
            "[editor] saving {} servers (local_port={local_port}, portable_mode={})",
            self.servers.len(),
            self.portable_mode
        );
        store.save_servers(self.servers.clone(), local_port, self.portable_mode);
        if let Some(index) = self.selected {
            store.select_server_index(index);
        }
        self.local_port = local_port.to_string();
        self.dirty = false;
        Ok(())
    }

    fn render_labels(&mut self) {
        self.labels = self.servers.iter().map(Server::friendly_name).collect();
    }

    fn load_selected_form(&mut self) {
        self.form = match self.selected.and_then(|index| self.servers.get(index)) {
            Some(server) => ServerForm::from_server(server),
            None => ServerForm::default(),
        };
    }
}
