// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error taxonomy for job orchestration
//!
//! Each variant belongs to one [`ErrorKind`]. Nothing is retried automatically;
//! every error is handed to the reporter before it reaches the caller.

use crate::engine::TransportError;
use crate::types::{JobId, JobStatus};
use std::time::Duration;
use thiserror::Error;

/// Which payload a decode error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTarget {
    Schema,
    Result,
}

impl std::fmt::Display for DecodeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeTarget::Schema => f.write_str("result schema"),
            DecodeTarget::Result => f.write_str("result rows"),
        }
    }
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The job could not be created
    Submission,
    /// Job status could not be read
    StatusFetch,
    /// Job detail (and with it the schema) could not be read
    DetailFetch,
    /// The raw result payload could not be read
    ResultFetch,
    /// The engine ran the job and it ended in `error` or `killed`
    JobFailed,
    /// A schema or result payload was malformed
    Decode,
    /// Polling gave up after the configured maximum wait
    Timeout,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Job submission failed for {target}: {source}")]
    Submission {
        target: String,
        #[source]
        source: TransportError,
    },

    #[error("Scheduled query '{name}' did not trigger any job")]
    NoJobsTriggered { name: String },

    #[error("Failed to fetch status of job {job_id}: {source}")]
    StatusFetch {
        job_id: JobId,
        #[source]
        source: TransportError,
    },

    #[error("Job {job_id} reported unknown status '{status}'")]
    UnknownStatus { job_id: JobId, status: String },

    #[error("Failed to fetch detail of job {job_id}: {source}")]
    DetailFetch {
        job_id: JobId,
        #[source]
        source: TransportError,
    },

    #[error("Job {job_id} has no result schema")]
    MissingSchema { job_id: JobId },

    #[error("Failed to fetch result of job {job_id}: {source}")]
    ResultFetch {
        job_id: JobId,
        #[source]
        source: TransportError,
    },

    #[error("Job {job_id} failed with status '{status}'")]
    JobFailed { job_id: JobId, status: JobStatus },

    #[error("Failed to decode {target} of job {job_id}: {source}")]
    Decode {
        job_id: JobId,
        target: DecodeTarget,
        #[source]
        source: serde_json::Error,
        /// 1-based line of the offending row, for result payloads
        line: Option<usize>,
        payload: String,
    },

    #[error("Job {job_id} still running after {waited:?}")]
    PollDeadlineExceeded { job_id: JobId, waited: Duration },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Submission { .. } | Error::NoJobsTriggered { .. } => ErrorKind::Submission,
            Error::StatusFetch { .. } | Error::UnknownStatus { .. } => ErrorKind::StatusFetch,
            Error::DetailFetch { .. } | Error::MissingSchema { .. } => ErrorKind::DetailFetch,
            Error::ResultFetch { .. } => ErrorKind::ResultFetch,
            Error::JobFailed { .. } => ErrorKind::JobFailed,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::PollDeadlineExceeded { .. } => ErrorKind::Timeout,
        }
    }

    /// Job the error refers to, when one had been assigned
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Error::Submission { .. } | Error::NoJobsTriggered { .. } => None,
            Error::StatusFetch { job_id, .. }
            | Error::UnknownStatus { job_id, .. }
            | Error::DetailFetch { job_id, .. }
            | Error::MissingSchema { job_id }
            | Error::ResultFetch { job_id, .. }
            | Error::JobFailed { job_id, .. }
            | Error::Decode { job_id, .. }
            | Error::PollDeadlineExceeded { job_id, .. } => Some(job_id),
        }
    }

    /// Transport failure underneath, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Error::Submission { source, .. }
            | Error::StatusFetch { source, .. }
            | Error::DetailFetch { source, .. }
            | Error::ResultFetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_schema_is_detail_fetch() {
        let err = Error::MissingSchema {
            job_id: JobId::from("42"),
        };
        assert_eq!(err.kind(), ErrorKind::DetailFetch);
        assert_eq!(err.job_id().map(JobId::as_str), Some("42"));
        assert!(err.transport().is_none());
    }

    #[test]
    fn test_job_failed_message_carries_status() {
        let err = Error::JobFailed {
            job_id: JobId::from("7"),
            status: JobStatus::Killed,
        };
        assert_eq!(err.kind(), ErrorKind::JobFailed);
        assert_eq!(err.to_string(), "Job 7 failed with status 'killed'");
    }

    #[test]
    fn test_submission_exposes_transport() {
        let err = Error::Submission {
            target: "presto job on my_db".to_string(),
            source: TransportError::Network("connection reset".to_string()),
        };
        assert_eq!(err.kind(), ErrorKind::Submission);
        assert!(err.job_id().is_none());
        assert!(matches!(err.transport(), Some(TransportError::Network(_))));
    }
}
