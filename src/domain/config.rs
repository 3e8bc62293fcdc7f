//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, the event database, command triggers and the notifier.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://data/events.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    /// Leading tokens that mark a message as a planner command.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,
    /// User ids allowed to issue commands. Empty means everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            triggers: default_triggers(),
            allowed_users: Vec::new(),
        }
    }
}

impl CommandsConfig {
    pub fn is_allowed(&self, user_id: &str) -> bool {
        self.allowed_users.is_empty() || self.allowed_users.iter().any(|u| u == user_id)
    }
}

pub fn default_triggers() -> Vec<String> {
    vec!["!event".to_string(), "!ev".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifierConfig {
    /// Upper bound on private messages in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_max_concurrency() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::parse(
            "services:\n  matrix:\n    username: planner\n    password: secret\n    homeserver: https://matrix.example.org\n",
        )
        .unwrap();

        assert_eq!(config.services.matrix.username, "planner");
        assert_eq!(config.services.matrix.display_name, None);
        assert_eq!(config.database.url, "sqlite://data/events.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.commands.triggers, vec!["!event", "!ev"]);
        assert!(config.commands.allowed_users.is_empty());
        assert_eq!(config.notifier.max_concurrency, 4);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
services:
  matrix:
    username: planner
    password: secret
    homeserver: https://matrix.example.org
    display_name: Event Planner
database:
  url: "sqlite::memory:"
  max_connections: 1
commands:
  triggers: ["!plan"]
  allowed_users: ["@owner:example.org"]
notifier:
  max_concurrency: 2
"#;
        let config = AppConfig::parse(yaml).unwrap();
        assert_eq!(config.services.matrix.display_name.as_deref(), Some("Event Planner"));
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.commands.triggers, vec!["!plan"]);
        assert!(config.commands.is_allowed("@owner:example.org"));
        assert!(!config.commands.is_allowed("@someone:example.org"));
        assert_eq!(config.notifier.max_concurrency, 2);
    }

    #[test]
    fn test_empty_allow_list_admits_everyone() {
        let commands = CommandsConfig::default();
        assert!(commands.is_allowed("@anyone:example.org"));
    }

    #[test]
    fn test_missing_matrix_section_is_an_error() {
        assert!(AppConfig::parse("database:\n  url: \"sqlite::memory:\"\n").is_err());
    }
}
