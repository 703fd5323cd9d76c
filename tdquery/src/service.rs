// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query orchestrator
//!
//! Composes the job client, poller, decoders and record mapper into the two
//! end-to-end flows. Stages run strictly in order:
//!
//! ```text
//! submit ─► wait for success ─► fetch schema ─► fetch rows ─► map records
//! ```
//!
//! Any stage failure aborts the flow with that stage's error; nothing partial
//! is returned.

use crate::config::ServiceConfig;
use crate::engine::{JobStatusInfo, QueryEngine};
use crate::error::Result;
use crate::job::{JobClient, StatusSnapshot};
use crate::poll::CompletionPoller;
use crate::record::{map_schema_to_records, Record};
use crate::report::{LogReporter, Reporter};
use crate::types::{
    ColumnSchema, Engine, JobId, JobParams, NamedQueryOptions, QueryOptions, ResultRow,
};
use std::sync::Arc;

/// Entry point for running queries against a remote engine
///
/// Cheap to clone; clones share the engine and reporter. Concurrent calls are
/// independent of each other.
#[derive(Clone)]
pub struct QueryService {
    client: JobClient,
    poller: CompletionPoller,
    config: ServiceConfig,
}

impl QueryService {
    /// Build a service that reports failures to the `log` facade
    ///
    /// `config` is used as given. Call [`ServiceConfig::validate`] first to
    /// reject inconsistent settings; a `max_wait` shorter than the poll
    /// interval gives up after the first non-terminal status.
    pub fn new(engine: Arc<dyn QueryEngine>, config: ServiceConfig) -> Self {
        Self::with_reporter(engine, Arc::new(LogReporter), config)
    }

    /// Build a service with a custom reporter; `config` is not validated
    pub fn with_reporter(
        engine: Arc<dyn QueryEngine>,
        reporter: Arc<dyn Reporter>,
        config: ServiceConfig,
    ) -> Self {
        let client = JobClient::new(engine, reporter, config.result_format.clone());
        let poller = CompletionPoller::new(client.clone(), config.poll_interval())
            .with_max_wait(config.max_wait());

        Self {
            client,
            poller,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Lower-level job client, for callers that drive the stages themselves
    pub fn client(&self) -> &JobClient {
        &self.client
    }

    pub async fn submit_presto_job(
        &self,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<JobId> {
        self.client.submit_presto_job(database, sql, params).await
    }

    pub async fn submit_hive_job(
        &self,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<JobId> {
        self.client.submit_hive_job(database, sql, params).await
    }

    pub async fn get_status(&self, job_id: &JobId) -> Result<StatusSnapshot> {
        self.client.fetch_status(job_id).await
    }

    pub async fn get_schema(&self, job_id: &JobId) -> Result<ColumnSchema> {
        self.client.fetch_schema(job_id).await
    }

    pub async fn get_results(&self, job_id: &JobId) -> Result<Vec<ResultRow>> {
        self.client.fetch_results(job_id).await
    }

    pub async fn wait_for_completion(&self, job_id: &JobId) -> Result<JobStatusInfo> {
        self.poller.wait(job_id).await
    }

    /// Run an ad-hoc query and return its rows as records
    pub async fn query(
        &self,
        database: &str,
        sql: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Record>> {
        let job_id = match options.engine {
            Engine::Presto => {
                self.client
                    .submit_presto_job(database, sql, &options.params)
                    .await?
            }
            Engine::Hive => {
                self.client
                    .submit_hive_job(database, sql, &options.params)
                    .await?
            }
        };

        self.collect(&job_id).await
    }

    /// Run a saved query by name and return its rows as records
    ///
    /// The run time defaults to the moment of the call.
    pub async fn named_query(
        &self,
        name: &str,
        options: &NamedQueryOptions,
    ) -> Result<Vec<Record>> {
        let scheduled_time = options.scheduled_time_iso();
        let job_id = self.client.submit_named_query(name, &scheduled_time).await?;

        self.collect(&job_id).await
    }

    /// Shared tail of both flows: wait, schema, rows, records
    async fn collect(&self, job_id: &JobId) -> Result<Vec<Record>> {
        self.poller.wait(job_id).await?;
        let schema = self.client.fetch_schema(job_id).await?;
        let rows = self.client.fetch_results(job_id).await?;

        let records = map_schema_to_records(&schema, &rows);
        log::debug!(
            "Job {} produced {} record(s) over {} column(s)",
            job_id,
            records.len(),
            schema.len()
        );
        Ok(records)
    }
}
