// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Response payloads of the remote engine's job API

use crate::types::JobId;
use serde::{Deserialize, Serialize};

/// Response of the job issue call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedJob {
    pub job_id: JobId,
    #[serde(default)]
    pub database: Option<String>,
}

/// One job triggered by a scheduled run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub job_id: JobId,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

/// Response of the run-schedule call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRun {
    #[serde(default)]
    pub jobs: Vec<ScheduledJob>,
}

/// Status payload of a job
///
/// `status` stays a raw string here; the job client validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusInfo {
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub status: String,
    #[serde(default)]
    pub cpu_time: Option<u64>,
    #[serde(default)]
    pub result_size: Option<u64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub num_records: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

impl JobStatusInfo {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            job_id: None,
            status: status.into(),
            cpu_time: None,
            result_size: None,
            duration: None,
            num_records: None,
            created_at: None,
            updated_at: None,
            start_at: None,
            end_at: None,
        }
    }
}

/// Full job metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub status: Option<String>,
    /// JSON-encoded `[[name, type], ...]`; absent until the job has run
    #[serde(default)]
    pub hive_result_schema: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub num_records: Option<u64>,
    #[serde(default)]
    pub result_size: Option<u64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

impl JobDetail {
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            hive_result_schema: Some(schema.into()),
            ..Self::default()
        }
    }
}

/// Raw result payload of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    /// Newline-delimited JSON arrays, one per row
    Text(String),
    /// The engine answered with a non-text body (e.g. `{}`): no rows
    Empty,
}

impl RawResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawResult::Text(text) => Some(text),
            RawResult::Empty => None,
        }
    }
}

impl From<&str> for RawResult {
    fn from(text: &str) -> Self {
        RawResult::Text(text.to_string())
    }
}

impl From<String> for RawResult {
    fn from(text: String) -> Self {
        RawResult::Text(text)
    }
}
