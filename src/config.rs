//! Server configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Deserializer};
use strum::Display;

/// Path of the liveness endpoint. Fixed, not configurable.
pub const PING_PATH: &str = "/_ping";

/// Path of the Prometheus exposition endpoint.
pub const METRICS_PATH: &str = "/metrics";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Listener ===
    /// Listening port. Unset, empty and `0` all fall back to 4000.
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    /// Host name shown in the startup line.
    #[serde(default = "default_host")]
    pub host: String,

    /// Interface the listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    // === GraphQL ===
    /// Mount path of the GraphQL endpoint.
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Serve GraphiQL to browsers hitting the GraphQL path.
    #[serde(default = "default_true")]
    pub graphql_playground: bool,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_json_body_limit")]
    pub json_body_limit: usize,

    // === Observability ===
    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log filter directives.
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    4000
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_true() -> bool {
    true
}

fn default_json_body_limit() -> usize {
    100 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Falsy values (empty, `0`) mean "use the default port".
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(default_port());
    }

    match raw.parse::<u16>() {
        Ok(0) => Ok(default_port()),
        Ok(port) => Ok(port),
        Err(e) => Err(serde::de::Error::custom(format!(
            "invalid PORT {raw:?}: {e}"
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            bind_address: default_bind_address(),
            graphql_path: default_graphql_path(),
            graphql_playground: true,
            json_body_limit: default_json_body_limit(),
            metrics_enabled: true,
            log_format: LogFormat::default(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::from_iter(vars.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be a positive integer".to_string());
        }

        if !self.graphql_path.starts_with('/') {
            return Err(format!(
                "GRAPHQL_PATH must start with '/', got {:?}",
                self.graphql_path
            ));
        }

        if self.graphql_path == PING_PATH || self.graphql_path == METRICS_PATH {
            return Err(format!(
                "GRAPHQL_PATH {:?} collides with a built-in route",
                self.graphql_path
            ));
        }

        if self.json_body_limit == 0 {
            return Err("JSON_BODY_LIMIT must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// URL announced in the startup line.
    pub fn public_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
