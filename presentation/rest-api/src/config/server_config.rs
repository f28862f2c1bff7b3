use std::time::Duration;

use super::error::{ConfigError, optional, parsed};

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: String,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: APP_PORT, then "8080")
    /// - REQUEST_TIMEOUT_SECS: Upper bound for a single request (default: 30)
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ip = optional(lookup, "SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = optional(lookup, "SERVICE_PORT")
            .or_else(|| optional(lookup, "APP_PORT"))
            .unwrap_or_else(|| "8080".to_string());
        let timeout_secs: u64 = parsed(lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            ip,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
