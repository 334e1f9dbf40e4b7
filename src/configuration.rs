use std::{
    net::{Ipv4Addr, Ipv6Addr},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_METHOD: &str = "aes-256-cfb";
pub const DEFAULT_SERVER_PORT: i32 = 8388;
pub const DEFAULT_LOCAL_PORT: i32 = 1080;
pub const DEFAULT_SERVER_TIMEOUT: i32 = 5;
pub const MAX_SERVER_TIMEOUT: i32 = 20;

// Reserved by the Windows client for its PAC server.
pub const RESERVED_LOCAL_PORT: i32 = 8123;

pub const CONFIGURATION_FILE_NAME: &str = "gui-config.json";

pub const METHODS: &[&str] = &[
    "rc4-md5",
    "salsa20",
    "chacha20",
    "chacha20-ietf",
    "aes-256-cfb",
    "aes-192-cfb",
    "aes-128-cfb",
    "aes-256-ctr",
    "aes-192-ctr",
    "aes-128-ctr",
    "bf-cfb",
    "camellia-128-cfb",
    "camellia-192-cfb",
    "camellia-256-cfb",
    "aes-128-gcm",
    "aes-192-gcm",
    "aes-256-gcm",
    "chacha20-ietf-poly1305",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Server IP can not be blank")]
    ServerBlank,
    #[error("Port out of range")]
    PortOutOfRange,
    #[error("Password can not be blank")]
    PasswordBlank,
    #[error("Timeout is invalid, it should not exceed {max}")]
    TimeoutInvalid { max: i32 },
    #[error("Port can't be {0}")]
    LocalPortReserved(i32),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Server {
    #[serde(default)]
    pub server: String,
    #[serde(default = "default_server_port")]
    pub server_port: i32,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub plugin: String,
    #[serde(default)]
    pub plugin_opts: String,
    #[serde(default)]
    pub plugin_args: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default = "default_server_timeout")]
    pub timeout: i32,
}

fn default_server_port() -> i32 {
    DEFAULT_SERVER_PORT
}

fn default_method() -> String {
    DEFAULT_METHOD.into()
}

fn default_server_timeout() -> i32 {
    DEFAULT_SERVER_TIMEOUT
}

impl Default for Server {
    fn default() -> Self {
        Self {
            server: String::new(),
            server_port: DEFAULT_SERVER_PORT,
            password: String::new(),
            method: DEFAULT_METHOD.into(),
            plugin: String::new(),
            plugin_opts: String::new(),
            plugin_args: String::new(),
            remarks: String::new(),
            timeout: DEFAULT_SERVER_TIMEOUT,
        }
    }
}

impl Server {
    pub fn method_or_default(&self) -> &str {
        if self.method.is_empty() {
            DEFAULT_METHOD
        } else {
            &self.method
        }
    }

    pub fn formal_host_name(&self) -> String {
        match check_host_name(&self.server) {
            HostNameKind::Ipv6 if !self.server.starts_with('[') => format!("[{}]", self.server),
            _ => self.server.clone(),
        }
    }

    pub fn friendly_name(&self) -> String {
        if self.server.is_empty() {
            return "New server".into();
        }
        let address = format!("{}:{}", self.formal_host_name(), self.server_port);
        if self.remarks.is_empty() {
            address
        } else {
            format!("{} ({address})", self.remarks)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub configs: Vec<Server>,
    #[serde(default)]
    pub index: i32,
    #[serde(default = "default_local_port")]
    pub local_port: i32,
    #[serde(default = "default_portable_mode")]
    pub portable_mode: bool,
}

fn default_local_port() -> i32 {
    DEFAULT_LOCAL_PORT
}

fn default_portable_mode() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            configs: Vec::new(),
            index: 0,
            local_port: DEFAULT_LOCAL_PORT,
            portable_mode: true,
        }
    }
}

impl Configuration {
    pub fn default_path() -> PathBuf {
        configuration_directory().join(CONFIGURATION_FILE_NAME)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read {}: {error}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|error| format!("Failed to parse {}: {error}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!("Failed to create directory {}: {error}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|error| format!("Failed to serialize configuration: {error}"))?;
        std::fs::write(path, content)
            .map_err(|error| format!("Failed to write {}: {error}", path.display()))
    }
}

pub fn configuration_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shadowsocks")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNameKind {
    Dns,
    Ipv4,
    Ipv6,
    Unknown,
}

pub fn check_host_name(name: &str) -> HostNameKind {
    if name.is_empty() {
        return HostNameKind::Unknown;
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return HostNameKind::Ipv4;
    }
    let unbracketed = name
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(name);
    let address = match unbracketed.split_once('%') {
        Some((address, zone)) if !zone.is_empty() => address,
        Some(_) => return HostNameKind::Unknown,
        None => unbracketed,
    };
    if address.parse::<Ipv6Addr>().is_ok() {
        return HostNameKind::Ipv6;
    }
    if is_dns_name(name) {
        HostNameKind::Dns
    } else {
        HostNameKind::Unknown
    }
}

fn is_dns_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > 255 {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
    })
}

pub fn check_port(port: i32) -> Result<(), ConfigurationError> {
    if (1..=65535).contains(&port) {
        Ok(())
    } else {
        Err(ConfigurationError::PortOutOfRange)
    }
}

pub fn check_local_port(port: i32) -> Result<(), ConfigurationError> {
    check_port(port)?;
    if port == RESERVED_LOCAL_PORT {
        return Err(ConfigurationError::LocalPortReserved(port));
    }
    Ok(())
}

pub fn check_server(server: &Server) -> Result<(), ConfigurationError> {
    if server.server.is_empty() {
        return Err(ConfigurationError::ServerBlank);
    }
    check_port(server.server_port)?;
    if server.password.is_empty() {
        return Err(ConfigurationError::PasswordBlank);
    }
    if server.timeout <= 0 || server.timeout > MAX_SERVER_TIMEOUT {
        return Err(ConfigurationError::TimeoutInvalid {
            max: MAX_SERVER_TIMEOUT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(address: &str, port: i32) -> Server {
        Server {
            server: address.into(),
            server_port: port,
            password: "secret".into(),
            ..Server::default()
        }
    }

    #[test]
    fn host_name_classification() {
        assert_eq!(check_host_name("1.1.1.1"), HostNameKind::Ipv4);
        assert_eq!(check_host_name("::1"), HostNameKind::Ipv6);
        assert_eq!(check_host_name("[2001:db8::1]"), HostNameKind::Ipv6);
        assert_eq!(check_host_name("fe80::1%4"), HostNameKind::Ipv6);
        assert_eq!(check_host_name("[fe80::1%eth0]"), HostNameKind::Ipv6);
        assert_eq!(check_host_name("fe80::1%"), HostNameKind::Unknown);
        assert_eq!(check_host_name("1.1.1.1%4"), HostNameKind::Unknown);
        assert_eq!(check_host_name("example.com"), HostNameKind::Dns);
        assert_eq!(check_host_name("my_host.local."), HostNameKind::Dns);
        assert_eq!(check_host_name(""), HostNameKind::Unknown);
        assert_eq!(check_host_name("not a host!!"), HostNameKind::Unknown);
        assert_eq!(check_host_name("a..b"), HostNameKind::Unknown);
        assert_eq!(check_host_name(&"x".repeat(64)), HostNameKind::Unknown);
    }

    #[test]
    fn friendly_name_formats() {
        assert_eq!(Server::default().friendly_name(), "New server");
        assert_eq!(server("1.1.1.1", 8388).friendly_name(), "1.1.1.1:8388");
        assert_eq!(server("::1", 443).friendly_name(), "[::1]:443");
        assert_eq!(server("fe80::1%4", 443).friendly_name(), "[fe80::1%4]:443");

        let mut named = server("example.com", 443);
        named.remarks = "home".into();
        assert_eq!(named.friendly_name(), "home (example.com:443)");
    }

    #[test]
    fn check_server_rules() {
        assert_eq!(check_server(&server("1.1.1.1", 8388)), Ok(()));
        assert_eq!(
            check_server(&server("", 8388)),
            Err(ConfigurationError::ServerBlank)
        );
        assert_eq!(
            check_server(&server("1.1.1.1", 0)),
            Err(ConfigurationError::PortOutOfRange)
        );
        assert_eq!(
            check_server(&server("1.1.1.1", 65536)),
            Err(ConfigurationError::PortOutOfRange)
        );

        let mut no_password = server("1.1.1.1", 8388);
        no_password.password.clear();
        assert_eq!(
            check_server(&no_password),
            Err(ConfigurationError::PasswordBlank)
        );

        let mut slow = server("1.1.1.1", 8388);
        slow.timeout = 21;
        let error = check_server(&slow).unwrap_err();
        assert_eq!(error.to_string(), "Timeout is invalid, it should not exceed 20");
    }

    #[test]
    fn check_local_port_rules() {
        assert_eq!(check_local_port(1080), Ok(()));
        assert_eq!(check_local_port(0), Err(ConfigurationError::PortOutOfRange));
        assert_eq!(
            check_local_port(8123),
            Err(ConfigurationError::LocalPortReserved(8123))
        );
    }

    #[test]
    fn method_falls_back_to_default() {
        let mut unset = server("1.1.1.1", 8388);
        unset.method.clear();
        assert_eq!(unset.method_or_default(), DEFAULT_METHOD);
    }

    #[test]
    fn parses_partial_configuration_file() {
        let json = r#"{
            "configs": [{ "server": "1.1.1.1", "server_port": 443, "password": "p" }],
            "index": 3,
            "localPort": 1081,
            "unknownKey": true
        }"#;
        let configuration: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(configuration.configs.len(), 1);
        assert_eq!(configuration.configs[0].method, DEFAULT_METHOD);
        assert_eq!(configuration.configs[0].timeout, DEFAULT_SERVER_TIMEOUT);
        assert_eq!(configuration.index, 3);
        assert_eq!(configuration.local_port, 1081);
        assert!(configuration.portable_mode);
    }

    #[test]
    fn save_then_load_from_disk() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nested").join(CONFIGURATION_FILE_NAME);
        let configuration = Configuration {
            configs: vec![server("example.com", 443)],
            index: 0,
            local_port: 1090,
            portable_mode: false,
        };

        configuration.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"localPort\": 1090"));
        assert_eq!(Configuration::load(&path).unwrap(), configuration);
    }

    #[test]
    fn load_reports_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        let error = Configuration::load(&directory.path().join("absent.json")).unwrap_err();
        assert!(error.starts_with("Failed to read"));
    }
}
