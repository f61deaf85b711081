use std::net::SocketAddr;

use metrod_core::{MetrodError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,

    pub database: DatabaseSection,

    #[serde(default)]
    pub flush: FlushSection,

    #[serde(default)]
    pub shutdown: ShutdownSection,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.flush.validate()?;
        self.shutdown.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            MetrodError::Config(format!(
                "server.listen is not a valid socket address: {}",
                self.listen
            ))
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl DatabaseSection {
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(MetrodError::Config("database.url must not be empty".into()));
        }
        if self.max_connections == 0 {
            return Err(MetrodError::Config(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(MetrodError::Config(
                "database.min_connections must not exceed max_connections".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}
fn default_max_lifetime_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlushSection {
    #[serde(default = "default_flush_interval_secs")]
    pub interval_secs: u64,
}

impl Default for FlushSection {
    fn default() -> Self {
        Self { interval_secs: default_flush_interval_secs() }
    }
}

impl FlushSection {
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(MetrodError::Config(
                "flush.interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_flush_interval_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownSection {
    #[serde(default = "default_shutdown_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ShutdownSection {
    fn default() -> Self {
        Self { timeout_secs: default_shutdown_timeout_secs() }
    }
}

impl ShutdownSection {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(MetrodError::Config(
                "shutdown.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_shutdown_timeout_secs() -> u64 {
    30
}
