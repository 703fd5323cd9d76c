//! Scripted in-memory engine
//!
//! Answers the five engine calls from canned responses and records every call
//! in order. Defaults match a small successful presto job.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tdquery::{
    Engine, IssuedJob, JobDetail, JobId, JobParams, JobStatusInfo, QueryEngine, RawResult,
    ScheduledJob, ScheduledRun, TransportError,
};

pub const DEFAULT_SCHEMA: &str =
    r#"[["name", "varchar(19)"], ["views", "integer"], ["clicks", "integer"]]"#;
pub const DEFAULT_RESULT: &str = "[\"page 1\",100,10]\n";

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    IssueJob {
        engine: Engine,
        database: String,
        sql: String,
        params: JobParams,
    },
    RunSchedule {
        name: String,
        time: String,
    },
    JobStatus(JobId),
    ShowJob(JobId),
    JobResult {
        job_id: JobId,
        format: String,
    },
}

impl EngineCall {
    pub fn name(&self) -> &'static str {
        match self {
            EngineCall::IssueJob { .. } => "issue_job",
            EngineCall::RunSchedule { .. } => "run_schedule",
            EngineCall::JobStatus(_) => "job_status",
            EngineCall::ShowJob(_) => "show_job",
            EngineCall::JobResult { .. } => "job_result",
        }
    }
}

pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    issue: Mutex<Result<IssuedJob, TransportError>>,
    schedule: Mutex<Result<ScheduledRun, TransportError>>,
    statuses: Mutex<VecDeque<Result<JobStatusInfo, TransportError>>>,
    detail: Mutex<Result<JobDetail, TransportError>>,
    result: Mutex<Result<RawResult, TransportError>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            issue: Mutex::new(Ok(IssuedJob {
                job_id: JobId::from("12345"),
                database: Some("my_db".to_string()),
            })),
            schedule: Mutex::new(Ok(ScheduledRun {
                jobs: vec![ScheduledJob {
                    job_id: JobId::from("123456"),
                    job_type: Some("presto".to_string()),
                    scheduled_at: Some("2015-12-01 00:00:00 UTC".to_string()),
                }],
            })),
            statuses: Mutex::new(VecDeque::from(vec![Ok(JobStatusInfo::new("success"))])),
            detail: Mutex::new(Ok(JobDetail::with_schema(DEFAULT_SCHEMA))),
            result: Mutex::new(Ok(RawResult::from(DEFAULT_RESULT))),
        }
    }

    pub fn with_job_id(self, job_id: &str) -> Self {
        *self.issue.lock() = Ok(IssuedJob {
            job_id: JobId::from(job_id),
            database: None,
        });
        self
    }

    pub fn with_issue_error(self, error: TransportError) -> Self {
        *self.issue.lock() = Err(error);
        self
    }

    pub fn with_scheduled_jobs(self, job_ids: &[&str]) -> Self {
        *self.schedule.lock() = Ok(ScheduledRun {
            jobs: job_ids
                .iter()
                .map(|id| ScheduledJob {
                    job_id: JobId::from(*id),
                    job_type: Some("presto".to_string()),
                    scheduled_at: None,
                })
                .collect(),
        });
        self
    }

    pub fn with_schedule_error(self, error: TransportError) -> Self {
        *self.schedule.lock() = Err(error);
        self
    }

    /// Status strings returned in order; the last one repeats
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        *self.statuses.lock() = statuses
            .iter()
            .map(|status| Ok(JobStatusInfo::new(*status)))
            .collect();
        self
    }

    pub fn with_status_error(self, error: TransportError) -> Self {
        *self.statuses.lock() = VecDeque::from(vec![Err(error)]);
        self
    }

    pub fn with_detail(self, detail: JobDetail) -> Self {
        *self.detail.lock() = Ok(detail);
        self
    }

    pub fn with_detail_error(self, error: TransportError) -> Self {
        *self.detail.lock() = Err(error);
        self
    }

    pub fn with_result(self, result: RawResult) -> Self {
        *self.result.lock() = Ok(result);
        self
    }

    pub fn with_result_error(self, error: TransportError) -> Self {
        *self.result.lock() = Err(error);
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(EngineCall::name).collect()
    }

    pub fn status_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, EngineCall::JobStatus(_)))
            .count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl QueryEngine for MockEngine {
    async fn issue_job(
        &self,
        engine: Engine,
        database: &str,
        sql: &str,
        params: &JobParams,
    ) -> Result<IssuedJob, TransportError> {
        self.record(EngineCall::IssueJob {
            engine,
            database: database.to_string(),
            sql: sql.to_string(),
            params: params.clone(),
        });
        self.issue.lock().clone()
    }

    async fn run_schedule(&self, name: &str, time: &str) -> Result<ScheduledRun, TransportError> {
        self.record(EngineCall::RunSchedule {
            name: name.to_string(),
            time: time.to_string(),
        });
        self.schedule.lock().clone()
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusInfo, TransportError> {
        self.record(EngineCall::JobStatus(job_id.clone()));

        let mut statuses = self.statuses.lock();
        if statuses.len() > 1 {
            if let Some(next) = statuses.pop_front() {
                return next;
            }
        }
        statuses
            .front()
            .cloned()
            .unwrap_or_else(|| Err(TransportError::InvalidResponse("no status scripted".into())))
    }

    async fn show_job(&self, job_id: &JobId) -> Result<JobDetail, TransportError> {
        self.record(EngineCall::ShowJob(job_id.clone()));
        self.detail.lock().clone()
    }

    async fn job_result(&self, job_id: &JobId, format: &str) -> Result<RawResult, TransportError> {
        self.record(EngineCall::JobResult {
            job_id: job_id.clone(),
            format: format.to_string(),
        });
        self.result.lock().clone()
    }
}
