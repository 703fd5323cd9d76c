//! HTTP engine and the main entry point
//!
//! [`HttpEngine`] implements [`QueryEngine`] over the `/v3` REST API.
//! [`TreasureData`] wires it into a [`QueryService`] together with the
//! configuration and a reporter.

use crate::error::{Error, Result};
use crate::query::QueryBuilder;
use crate::result::TypedResult;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tdquery::{
    Engine, IssuedJob, JobDetail, JobId, JobParams, JobStatusInfo, LogReporter, NamedQueryOptions,
    QueryEngine, QueryOptions, QueryService, RawResult, Reporter, ScheduledRun, ServiceConfig,
    TransportError,
};

/// [`QueryEngine`] backed by the engine's REST API
///
/// Every request carries `Authorization: TD1 <api key>`. Non-2xx answers
/// become [`TransportError::Http`] with the response body.
#[derive(Clone)]
pub struct HttpEngine {
    endpoint: Url,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpEngine {
    /// Build an engine from the endpoint, key and timeout in `config`
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Error::Connection(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::Connection(format!(
                "Endpoint '{}' cannot carry a path",
                config.endpoint
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint URL with the given path segments appended, percent-encoded
    pub(crate) fn url(&self, segments: &[&str]) -> std::result::Result<Url, TransportError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidRequest("endpoint cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("TD1 {}", self.api_key))
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: RequestBuilder) -> std::result::Result<String, TransportError> {
        let start = Instant::now();
        let response: Response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(
            "[TD_HTTP] {} status={} bytes={} duration_ms={}",
            url.path(),
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            warn!("[TD_HTTP] {} failed: status={} body=\"{}\"", url.path(), status, body);
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, TransportError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

/// Result bodies: text rows, or a JSON object when the job has no result
pub(crate) fn classify_result_body(body: String) -> RawResult {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{')
        && serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(trimmed).is_ok()
    {
        return RawResult::Empty;
    }
    RawResult::Text(body)
}

#[async_trait]
impl QueryEngine for HttpEngine {
    async fn issue_job(
        &self,
        engine: Engine,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> std::result::Result<IssuedJob, TransportError> {
        let url = self.url(&["v3", "job", "issue", engine.as_str(), database])?;

        let mut form = vec![("query", sql.to_string())];
        form.extend(params.to_pairs());

        self.send_json(self.http_client.post(url).form(&form)).await
    }

    async fn run_schedule(
        &self,
        name: &str,
        time: &str,
    ) -> std::result::Result<ScheduledRun, TransportError> {
        let url = self.url(&["v3", "schedule", "run", name, time])?;
        self.send_json(self.http_client.post(url)).await
    }

    async fn job_status(
        &self,
        job_id: &JobId,
    ) -> std::result::Result<JobStatusInfo, TransportError> {
        let url = self.url(&["v3", "job", "status", job_id.as_str()])?;
        self.send_json(self.http_client.get(url)).await
    }

    async fn show_job(&self, job_id: &JobId) -> std::result::Result<JobDetail, TransportError> {
        let url = self.url(&["v3", "job", "show", job_id.as_str()])?;
        self.send_json(self.http_client.get(url)).await
    }

    async fn job_result(
        &self,
        job_id: &JobId,
        format: &str,
    ) -> std::result::Result<RawResult, TransportError> {
        let mut url = self.url(&["v3", "job", "result", job_id.as_str()])?;
        url.query_pairs_mut().append_pair("format", format);

        let body = self.send(self.http_client.get(url)).await?;
        Ok(classify_result_body(body))
    }
}

/// Main entry point
///
/// # Examples
///
/// ```no_run
/// use tdquery_sdk::{ServiceConfig, TreasureData};
///
/// # async fn example() -> Result<(), tdquery_sdk::Error> {
/// let td = TreasureData::connect(ServiceConfig::new("my-api-key"))?;
///
/// let result = td.query("my_db", "SELECT name, views FROM my_table").await?;
/// for record in result.records() {
///     println!("{:?}", record.get("name"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TreasureData {
    service: QueryService,
}

impl TreasureData {
    /// Connect with the default reporter, which logs failures
    pub fn connect(config: ServiceConfig) -> Result<Self> {
        Self::connect_with_reporter(config, Arc::new(LogReporter))
    }

    pub fn connect_with_reporter(
        config: ServiceConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        config.validate().map_err(Error::Connection)?;
        let engine = HttpEngine::new(&config)?;
        Ok(Self::from_engine(Arc::new(engine), reporter, config))
    }

    /// Use any engine implementation; handy for tests and proxies
    pub fn from_engine(
        engine: Arc<dyn QueryEngine>,
        reporter: Arc<dyn Reporter>,
        config: ServiceConfig,
    ) -> Self {
        TreasureData {
            service: QueryService::with_reporter(engine, reporter, config),
        }
    }

    /// Underlying query service, for stage-by-stage control
    pub fn service(&self) -> &QueryService {
        &self.service
    }

    /// Run a presto query with default options
    pub async fn query(&self, database: &str, sql: &str) -> Result<TypedResult> {
        self.query_with(database, sql, &QueryOptions::default()).await
    }

    pub async fn query_with(
        &self,
        database: &str,
        sql: &str,
        options: &QueryOptions,
    ) -> Result<TypedResult> {
        let records = self.service.query(database, sql, options).await?;
        Ok(TypedResult::new(records))
    }

    /// Run a saved query by name, scheduled now
    pub async fn named_query(&self, name: &str) -> Result<TypedResult> {
        self.named_query_with(name, &NamedQueryOptions::default()).await
    }

    pub async fn named_query_with(
        &self,
        name: &str,
        options: &NamedQueryOptions,
    ) -> Result<TypedResult> {
        let records = self.service.named_query(name, options).await?;
        Ok(TypedResult::new(records))
    }

    /// Fluent builder for an ad-hoc query
    pub fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }
}
