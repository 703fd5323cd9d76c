// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Completion poller
//!
//! Queries job status at a fixed interval until the job reaches a terminal
//! status. No backoff, no jitter, and status-fetch errors are never retried.
//! Without a max wait the loop runs until the job ends or the caller drops
//! the future.

use crate::engine::JobStatusInfo;
use crate::error::{Error, Result};
use crate::job::{JobClient, StatusSnapshot};
use crate::types::{JobId, JobStatus};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

/// Poller state after one status observation
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Still queued, booting or running
    Pending(JobStatus),
    /// Finished successfully; carries the final status payload
    Succeeded(JobStatusInfo),
    /// Ended in `error` or `killed`
    Failed(JobStatus),
}

impl From<StatusSnapshot> for PollState {
    fn from(snapshot: StatusSnapshot) -> Self {
        match snapshot.status {
            JobStatus::Success => PollState::Succeeded(snapshot.info),
            status if status.is_failure() => PollState::Failed(status),
            status => PollState::Pending(status),
        }
    }
}

#[derive(Clone)]
pub struct CompletionPoller {
    client: JobClient,
    interval: Duration,
    max_wait: Option<Duration>,
}

impl CompletionPoller {
    pub fn new(client: JobClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            max_wait: None,
        }
    }

    /// Stop polling once this much time has passed
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until the job is terminal
    ///
    /// Returns the final status payload on success and `JobFailed` when the
    /// job ended in `error` or `killed`. A job that is already terminal costs
    /// exactly one status query.
    pub async fn wait(&self, job_id: &JobId) -> Result<JobStatusInfo> {
        let started = Instant::now();
        let mut polls: u32 = 0;

        loop {
            let snapshot = self.client.fetch_status(job_id).await?;
            polls += 1;

            match PollState::from(snapshot) {
                PollState::Pending(status) => {
                    log::debug!(
                        "Job {} is {} (poll #{}, {:?} elapsed)",
                        job_id,
                        status,
                        polls,
                        started.elapsed()
                    );

                    if let Some(max_wait) = self.max_wait {
                        let waited = started.elapsed();
                        if waited + self.interval > max_wait {
                            return Err(self.client.fail(
                                "Gave up waiting for job completion",
                                Error::PollDeadlineExceeded {
                                    job_id: job_id.clone(),
                                    waited,
                                },
                                json!({ "job_id": job_id, "status": status, "polls": polls }),
                            ));
                        }
                    }

                    self.pause().await;
                }
                PollState::Succeeded(info) => {
                    log::info!(
                        "Job {} succeeded after {} poll(s) in {:?}",
                        job_id,
                        polls,
                        started.elapsed()
                    );
                    return Ok(info);
                }
                PollState::Failed(status) => {
                    log::warn!("Job {} ended with status {}", job_id, status);
                    return Err(self.client.fail(
                        "Job failed or was killed",
                        Error::JobFailed {
                            job_id: job_id.clone(),
                            status,
                        },
                        json!({ "job_id": job_id, "status": status, "polls": polls }),
                    ));
                }
            }
        }
    }

    async fn pause(&self) {
        if self.interval.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.interval).await;
        }
    }
}
