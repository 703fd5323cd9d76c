// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Service configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wait between two status checks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.treasuredata.com";

/// Default result format requested from the engine
pub const DEFAULT_RESULT_FORMAT: &str = "json";

/// Default per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Configuration of a query service
///
/// Unset fields fall back to their defaults when deserialized, so a host can
/// pass `{ "api_key": "..." }` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Base URL of the job API
    pub endpoint: String,

    /// Wait between status checks, in milliseconds. 0 polls back to back.
    pub poll_interval_ms: u64,

    /// Give up polling after this many milliseconds; unbounded when unset
    pub max_wait_ms: Option<u64>,

    /// Format passed to the result call
    pub result_format: String,

    /// Per-request HTTP timeout, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_wait_ms: None,
            result_format: DEFAULT_RESULT_FORMAT.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait_ms = Some(max_wait.as_millis() as u64);
        self
    }

    pub fn with_result_format(mut self, format: impl Into<String>) -> Self {
        self.result_format = format.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_ms.map(Duration::from_millis)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("Endpoint must not be empty".to_string());
        }

        if self.result_format.trim().is_empty() {
            return Err("Result format must not be empty".to_string());
        }

        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be > 0".to_string());
        }

        if let Some(max_wait) = self.max_wait_ms {
            if max_wait < self.poll_interval_ms {
                return Err(format!(
                    "Max wait ({} ms) is shorter than the poll interval ({} ms)",
                    max_wait, self.poll_interval_ms
                ));
            }
        }

        Ok(())
    }
}
