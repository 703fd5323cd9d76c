// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Core data model shared by the job client, poller and orchestrator

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier the remote engine assigns to a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        JobId(id)
    }
}

/// Job lifecycle states reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Booting,
    Running,
    Success,
    Error,
    Killed,
}

impl JobStatus {
    /// No further transition happens from a terminal status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Queued | JobStatus::Booting | JobStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Success)
    }

    /// Terminal statuses other than success
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Error | JobStatus::Killed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Booting => "booting",
            JobStatus::Running => "running",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Killed => "killed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when the engine reports a status outside the known lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJobStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownJobStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "booting" => Ok(JobStatus::Booting),
            "running" => Ok(JobStatus::Running),
            "success" => Ok(JobStatus::Success),
            "error" => Ok(JobStatus::Error),
            "killed" => Ok(JobStatus::Killed),
            other => Err(UnknownJobStatus(other.to_string())),
        }
    }
}

/// SQL dialect a job runs under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Presto,
    Hive,
}

impl Engine {
    /// Path segment used by the job issue endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Presto => "presto",
            Engine::Hive => "hive",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output column: `(name, type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column(pub String, pub String);

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Column(name.into(), column_type.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn column_type(&self) -> &str {
        &self.1
    }
}

/// Ordered output columns of a job; position `i` describes `row[i]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema(Vec<Column>);

impl ColumnSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnSchema(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Column::name)
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        ColumnSchema(iter.into_iter().map(|(n, t)| Column::new(n, t)).collect())
    }
}

/// Positional row values, aligned to a [`ColumnSchema`]
pub type ResultRow = Vec<serde_json::Value>;

/// Named job parameters forwarded to the engine alongside the SQL text
///
/// Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobParams {
    /// Scheduling priority, -2 (very low) to 2 (very high)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i8>,

    /// Number of automatic retries the engine performs on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<u32>,

    /// Resource pool the job runs in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<String>,

    /// Result export target URL
    #[serde(rename = "result", skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,

    /// Idempotency key; the engine rejects a second job with the same key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
}

impl JobParams {
    /// Set parameters as `(name, value)` pairs, in a stable order
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(retry_limit) = self.retry_limit {
            pairs.push(("retry_limit", retry_limit.to_string()));
        }
        if let Some(ref pool_name) = self.pool_name {
            pairs.push(("pool_name", pool_name.clone()));
        }
        if let Some(ref result_url) = self.result_url {
            pairs.push(("result", result_url.clone()));
        }
        if let Some(ref domain_key) = self.domain_key {
            pairs.push(("domain_key", domain_key.clone()));
        }
        if let Some(ref engine_version) = self.engine_version {
            pairs.push(("engine_version", engine_version.clone()));
        }
        pairs
    }
}

/// Options for an ad-hoc query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Dialect, resolved once when the job is submitted
    #[serde(default)]
    pub engine: Engine,

    /// Everything else, forwarded to the engine untouched
    #[serde(flatten)]
    pub params: JobParams,
}

impl QueryOptions {
    pub fn presto() -> Self {
        Self::default()
    }

    pub fn hive() -> Self {
        Self {
            engine: Engine::Hive,
            ..Self::default()
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.params.priority = Some(priority);
        self
    }

    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.params.retry_limit = Some(retry_limit);
        self
    }

    pub fn with_pool_name(mut self, pool_name: impl Into<String>) -> Self {
        self.params.pool_name = Some(pool_name.into());
        self
    }

    pub fn with_result_url(mut self, result_url: impl Into<String>) -> Self {
        self.params.result_url = Some(result_url.into());
        self
    }

    pub fn with_domain_key(mut self, domain_key: impl Into<String>) -> Self {
        self.params.domain_key = Some(domain_key.into());
        self
    }

    pub fn with_engine_version(mut self, engine_version: impl Into<String>) -> Self {
        self.params.engine_version = Some(engine_version.into());
        self
    }
}

/// Options for running a saved (scheduled) query by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedQueryOptions {
    /// Logical run time; the current time is used when unset
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl NamedQueryOptions {
    pub fn at(scheduled_time: DateTime<Utc>) -> Self {
        Self {
            scheduled_time: Some(scheduled_time),
        }
    }

    /// ISO-8601 run time, captured now if no time was given
    pub fn scheduled_time_iso(&self) -> String {
        to_iso8601(self.scheduled_time.unwrap_or_else(Utc::now))
    }
}

/// Millisecond precision, `Z` suffix: `2019-10-22T15:06:59.000Z`
pub fn to_iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
