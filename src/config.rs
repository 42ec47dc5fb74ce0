//! Configuration types for docker-dns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint of the etcd cluster records are written to.
    pub etcd_endpoint: String,

    /// Host suffix table: domain suffix to record target.
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Record target for one configured domain suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Address stored for hostnames matching the suffix.
    pub address: String,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "docker_dns=debug,warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus metrics exporter address.
    #[serde(default)]
    pub prometheus_addr: Option<SocketAddr>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prometheus_addr: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file with environment overrides
    /// (prefix `DOCKER_DNS`, e.g. `DOCKER_DNS__ETCD_ENDPOINT`).
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .add_source(
                config::Environment::with_prefix("DOCKER_DNS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
etcd_endpoint = "http://127.0.0.1:2379"

[hosts."example.com"]
address = "10.0.0.1"

[hosts."cluster.example.com"]
address = "10.0.0.2"

[telemetry]
log_level = "debug"
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.etcd_endpoint, "http://127.0.0.1:2379");
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.hosts["example.com"].address, "10.0.0.1");
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_telemetry_defaults_when_absent() {
        let file = write_config(
            r#"
etcd_endpoint = "http://127.0.0.1:2379"

[hosts."example.com"]
address = "10.0.0.1"
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.prometheus_addr.is_none());
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let file = write_config(
            r#"
[hosts."example.com"]
address = "10.0.0.1"
"#,
        );

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let file = write_config("etcd_endpoint = [not valid toml");
        assert!(Config::load(file.path()).is_err());
    }
}
