//! Server configuration from environment variables

use std::str::FromStr;

use board_core::dnd::DndConfig;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid value for {name}: '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

/// Runtime settings for the board server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub rest_port: u16,
    pub socket_port: u16,
    pub dnd: DndConfig,
    /// Start with the three demo tasks
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rest_port: 8081,
            socket_port: 8080,
            dnd: DndConfig::default(),
            seed_demo: true,
        }
    }
}

impl ServerConfig {
    /// Read `BOARD_*` variables, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            rest_port: parse(&lookup, "BOARD_REST_PORT", defaults.rest_port)?,
            socket_port: parse(&lookup, "BOARD_SOCKET_PORT", defaults.socket_port)?,
            dnd: DndConfig {
                interaction_range: parse(
                    &lookup,
                    "BOARD_INTERACTION_RANGE",
                    defaults.dnd.interaction_range,
                )?,
                activation_distance: parse(
                    &lookup,
                    "BOARD_ACTIVATION_DISTANCE",
                    defaults.dnd.activation_distance,
                )?,
            },
            seed_demo: parse(&lookup, "BOARD_SEED_DEMO", defaults.seed_demo)?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError { name, value })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rest_port, 8081);
        assert_eq!(config.socket_port, 8080);
        assert_eq!(config.dnd, DndConfig::default());
        assert!(config.seed_demo);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BOARD_REST_PORT", "9000"),
            ("BOARD_INTERACTION_RANGE", "80.5"),
            ("BOARD_SEED_DEMO", "false"),
        ]))
        .unwrap();
        assert_eq!(config.rest_port, 9000);
        assert_eq!(config.dnd.interaction_range, 80.5);
        assert!(!config.seed_demo);
    }

    #[test]
    fn test_invalid_value_names_the_variable() {
        let err = ServerConfig::from_lookup(lookup(&[("BOARD_SOCKET_PORT", "http")])).unwrap_err();
        assert_eq!(err.name, "BOARD_SOCKET_PORT");
        assert!(err.to_string().contains("BOARD_SOCKET_PORT"));
    }
}
