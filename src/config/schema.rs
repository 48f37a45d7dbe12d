//! Config schema and deserialization

use crate::runner::{Device, RunnerConfig, Throttling, DEFAULT_PROGRESS_INTERVAL};
use crate::AuditCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SERVER_DELAY_MS: u64 = 2000;

/// Settings for the stub audit server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Listen address, e.g. "127.0.0.1:3000"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,

    /// Artificial delay before answering a POST
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl ServerConfig {
    pub fn addr(&self) -> &str {
        self.addr.as_deref().unwrap_or(DEFAULT_SERVER_ADDR)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.unwrap_or(DEFAULT_SERVER_DELAY_MS))
    }
}

/// Root config structure for .perfauditrc.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum performance score (exit 1 if below)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling: Option<Throttling>,

    /// Categories to audit. Empty means the runner defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<AuditCategory>,

    /// Period of the progress timer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_interval_ms: Option<u64>,

    /// Audit endpoint URL; when set, audits go through the remote source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Values given on the command line; `None` leaves the file value in place
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<u8>,
    pub device: Option<Device>,
    pub throttling: Option<Throttling>,
    pub categories: Vec<AuditCategory>,
    pub endpoint: Option<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if cli.threshold.is_some() {
            self.threshold = cli.threshold;
        }
        if cli.device.is_some() {
            self.device = cli.device;
        }
        if cli.throttling.is_some() {
            self.throttling = cli.throttling;
        }
        if !cli.categories.is_empty() {
            self.categories = cli.categories;
        }
        if cli.endpoint.is_some() {
            self.endpoint = cli.endpoint;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.device.is_none() {
            self.device = base.device;
        }
        if self.throttling.is_none() {
            self.throttling = base.throttling;
        }
        if self.categories.is_empty() {
            self.categories = base.categories;
        }
        if self.progress_interval_ms.is_none() {
            self.progress_interval_ms = base.progress_interval_ms;
        }
        if self.endpoint.is_none() {
            self.endpoint = base.endpoint;
        }
        if self.server.addr.is_none() {
            self.server.addr = base.server.addr;
        }
        if self.server.delay_ms.is_none() {
            self.server.delay_ms = base.server.delay_ms;
        }
    }

    /// Runner settings with defaults filled in
    pub fn runner_config(&self) -> RunnerConfig {
        let mut runner = RunnerConfig::default();
        if let Some(device) = self.device {
            runner.device = device;
        }
        if let Some(throttling) = self.throttling {
            runner.throttling = throttling;
        }
        if !self.categories.is_empty() {
            runner.categories = self.categories.clone();
        }
        runner
    }

    /// Never zero; a tokio interval cannot have an empty period
    pub fn progress_interval(&self) -> Duration {
        self.progress_interval_ms
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(DEFAULT_PROGRESS_INTERVAL)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold.unwrap_or(0)
    }
}
