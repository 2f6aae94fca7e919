// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Client configuration

use std::time::Duration;

/// Default alpha HTTP endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Connection settings for a [`Client`](crate::Client)
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the Dgraph alpha HTTP API
    pub endpoint: String,
    /// Upper bound for every request, including commit and abort
    pub timeout: Duration,
    /// Upper bound for establishing the TCP connection
    pub connect_timeout: Duration,
    /// Probe `/health` while connecting
    pub verify_health: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            verify_health: true,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Skip the health probe, e.g. when the alpha sits behind a proxy that
    /// only forwards the query endpoints
    pub fn without_health_check(mut self) -> Self {
        self.verify_health = false;
        self
    }

    /// Endpoint with any trailing slash removed
    pub(crate) fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ClientConfig::new("http://alpha:8080/")
            .with_timeout(Duration::from_secs(2))
            .without_health_check();

        assert_eq!(config.base_url(), "http://alpha:8080");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(!config.verify_health);
    }
}
