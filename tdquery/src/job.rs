// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Job client: typed calls over a [`QueryEngine`]
//!
//! Each call maps one remote operation to a local result. Failures go through
//! [`JobClient::fail`], which reports them before they are returned.

use crate::decode;
use crate::engine::{JobDetail, JobStatusInfo, QueryEngine, RawResult};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::types::{ColumnSchema, Engine, JobId, JobParams, JobStatus, ResultRow};
use serde_json::{json, Value};
use std::sync::Arc;

/// Parsed status together with the payload it came from
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    pub info: JobStatusInfo,
}

#[derive(Clone)]
pub struct JobClient {
    engine: Arc<dyn QueryEngine>,
    reporter: Arc<dyn Reporter>,
    result_format: String,
}

impl JobClient {
    pub fn new(
        engine: Arc<dyn QueryEngine>,
        reporter: Arc<dyn Reporter>,
        result_format: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            reporter,
            result_format: result_format.into(),
        }
    }

    /// Report a failure and hand it back for propagation
    pub(crate) fn fail(&self, message: &str, error: Error, context: Value) -> Error {
        self.reporter.report(message, &error, context);
        error
    }

    /// Issue a job in the given dialect
    pub async fn submit_query(
        &self,
        database: &str,
        sql: &str,
        engine: Engine,
        params: &JobParams,
    ) -> Result<JobId> {
        log::debug!("Submitting {} job on database '{}'", engine, database);

        match self.engine.issue_job(engine, database, sql, params).await {
            Ok(issued) => {
                log::info!("Submitted {} job {} on '{}'", engine, issued.job_id, database);
                Ok(issued.job_id)
            }
            Err(source) => Err(self.fail(
                &format!("{} query failed", engine),
                Error::Submission {
                    target: format!("{} job on {}", engine, database),
                    source,
                },
                json!({ "db": database, "query": sql, "options": params }),
            )),
        }
    }

    pub async fn submit_presto_job(
        &self,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<JobId> {
        self.submit_query(database, sql, Engine::Presto, params).await
    }

    pub async fn submit_hive_job(
        &self,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<JobId> {
        self.submit_query(database, sql, Engine::Hive, params).await
    }

    /// Trigger a saved query and return the first job it started
    pub async fn submit_named_query(&self, name: &str, scheduled_time: &str) -> Result<JobId> {
        log::debug!("Running saved query '{}' at {}", name, scheduled_time);

        let run = match self.engine.run_schedule(name, scheduled_time).await {
            Ok(run) => run,
            Err(source) => {
                return Err(self.fail(
                    "Executing scheduled query failed",
                    Error::Submission {
                        target: format!("saved query {}", name),
                        source,
                    },
                    json!({ "name": name, "scheduled_time": scheduled_time }),
                ))
            }
        };

        if run.jobs.len() > 1 {
            log::debug!(
                "Saved query '{}' triggered {} jobs, following the first",
                name,
                run.jobs.len()
            );
        }

        match run.jobs.first() {
            Some(job) => {
                log::info!("Saved query '{}' started job {}", name, job.job_id);
                Ok(job.job_id.clone())
            }
            None => Err(self.fail(
                "Scheduled query did not trigger a job",
                Error::NoJobsTriggered {
                    name: name.to_string(),
                },
                json!({ "name": name, "scheduled_time": scheduled_time, "res": run }),
            )),
        }
    }

    pub async fn fetch_status(&self, job_id: &JobId) -> Result<StatusSnapshot> {
        let info = match self.engine.job_status(job_id).await {
            Ok(info) => info,
            Err(source) => {
                return Err(self.fail(
                    "Failed to fetch job status",
                    Error::StatusFetch {
                        job_id: job_id.clone(),
                        source,
                    },
                    json!({ "job_id": job_id }),
                ))
            }
        };

        match info.status.parse::<JobStatus>() {
            Ok(status) => Ok(StatusSnapshot { status, info }),
            Err(unknown) => Err(self.fail(
                "Job reported an unknown status",
                Error::UnknownStatus {
                    job_id: job_id.clone(),
                    status: unknown.0,
                },
                json!({ "job_id": job_id, "body": info }),
            )),
        }
    }

    pub async fn fetch_detail(&self, job_id: &JobId) -> Result<JobDetail> {
        self.engine.show_job(job_id).await.map_err(|source| {
            self.fail(
                "Failed to pull job information",
                Error::DetailFetch {
                    job_id: job_id.clone(),
                    source,
                },
                json!({ "job_id": job_id }),
            )
        })
    }

    /// Output columns of a finished job
    pub async fn fetch_schema(&self, job_id: &JobId) -> Result<ColumnSchema> {
        let detail = self.fetch_detail(job_id).await?;

        let blob = match detail.hive_result_schema.as_deref() {
            Some(blob) if !blob.is_empty() => blob,
            _ => {
                return Err(self.fail(
                    "Job result schema is missing",
                    Error::MissingSchema {
                        job_id: job_id.clone(),
                    },
                    json!({ "job_id": job_id, "res": detail }),
                ))
            }
        };

        decode::decode_schema(job_id, blob).map_err(|error| {
            self.fail(
                "Failed to parse job result schema",
                error,
                json!({ "job_id": job_id, "res": detail }),
            )
        })
    }

    pub async fn fetch_raw_result(&self, job_id: &JobId) -> Result<RawResult> {
        self.engine
            .job_result(job_id, &self.result_format)
            .await
            .map_err(|source| {
                self.fail(
                    "Failed to pull job results",
                    Error::ResultFetch {
                        job_id: job_id.clone(),
                        source,
                    },
                    json!({ "job_id": job_id, "format": self.result_format }),
                )
            })
    }

    /// Decoded result rows of a finished job
    pub async fn fetch_results(&self, job_id: &JobId) -> Result<Vec<ResultRow>> {
        let raw = self.fetch_raw_result(job_id).await?;

        decode::decode_rows(job_id, &raw).map_err(|error| {
            self.fail(
                "Failed to parse job results",
                error,
                json!({
                    "job_id": job_id,
                    "format": self.result_format,
                    "res": raw.as_text(),
                }),
            )
        })
    }
}
