// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Remote query engine seam
//!
//! [`QueryEngine`] is the five-call surface the orchestrator needs from the
//! remote service. The HTTP implementation lives in the SDK crate; tests plug
//! in scripted engines.

pub mod models;

pub use models::{IssuedJob, JobDetail, JobStatusInfo, RawResult, ScheduledJob, ScheduledRun};

use crate::types::{Engine, JobId, JobParams};
use async_trait::async_trait;
use thiserror::Error;

/// Failure to reach the engine or to understand its answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Remote job API consumed by the job client
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Issue a new job running `sql` against `database`
    async fn issue_job(
        &self,
        engine: Engine,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<IssuedJob, TransportError>;

    /// Trigger a saved query for the given ISO-8601 run time
    async fn run_schedule(&self, name: &str, time: &str) -> Result<ScheduledRun, TransportError>;

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusInfo, TransportError>;

    async fn show_job(&self, job_id: &JobId) -> Result<JobDetail, TransportError>;

    /// Raw result in the given format (`json` yields one JSON array per line)
    async fn job_result(&self, job_id: &JobId, format: &str) -> Result<RawResult, TransportError>;
}
