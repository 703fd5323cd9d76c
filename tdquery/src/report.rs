// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Failure reporting hook
//!
//! Every failure path hands the error to a [`Reporter`] before it is returned.
//! Reporting is fire-and-forget: it cannot fail and never changes the error.

use serde_json::Value;
use std::error::Error as StdError;

/// Receives every failure the job client sees
pub trait Reporter: Send + Sync {
    fn report(&self, message: &str, error: &(dyn StdError + 'static), context: Value);
}

/// Default reporter: writes failures to the `log` facade at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, message: &str, error: &(dyn StdError + 'static), context: Value) {
        log::error!("{}: {} (context: {})", message, error, context);

        let mut source = error.source();
        while let Some(cause) = source {
            log::error!("  caused by: {}", cause);
            source = cause.source();
        }
    }
}

/// Discards reports; for hosts that surface errors some other way
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _message: &str, _error: &(dyn StdError + 'static), _context: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TransportError;

    #[test]
    fn test_reporters_accept_any_error() {
        let err = TransportError::Network("timed out".to_string());
        LogReporter.report("status failed", &err, serde_json::json!({ "job_id": "1" }));
        NoopReporter.report("status failed", &err, Value::Null);
    }
}
