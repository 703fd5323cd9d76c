// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! tdquery - job orchestration for a remote Presto/Hive query engine
//!
//! Submits SQL jobs, polls them until they finish, fetches the result schema
//! and rows, and zips both into named records.
//!
//! # Features
//!
//! - **Two dialects**: Presto and Hive jobs, selected per query
//! - **Saved queries**: trigger a scheduled query by name
//! - **Fixed-interval polling**: no backoff, optional max wait
//! - **Result decoding**: schema blob and newline-delimited JSON rows
//! - **Failure reporting**: every failure reaches an injected [`Reporter`]
//!
//! # Usage
//!
//! The engine is a trait so the crate carries no network code; the
//! `tdquery-sdk` crate provides the HTTP implementation.
//!
//! ```ignore
//! use tdquery::{QueryOptions, QueryService, ServiceConfig};
//!
//! let service = QueryService::new(engine, ServiceConfig::new(api_key));
//! let records = service
//!     .query("my_db", "SELECT name, views FROM my_table", &QueryOptions::presto())
//!     .await?;
//! ```

pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod job;
pub mod poll;
pub mod record;
pub mod report;
pub mod service;
pub mod types;

pub use config::ServiceConfig;
pub use engine::{
    IssuedJob, JobDetail, JobStatusInfo, QueryEngine, RawResult, ScheduledJob, ScheduledRun,
    TransportError,
};
pub use error::{DecodeTarget, Error, ErrorKind, Result};
pub use job::{JobClient, StatusSnapshot};
pub use poll::{CompletionPoller, PollState};
pub use record::{map_schema_to_records, Record};
pub use report::{LogReporter, NoopReporter, Reporter};
pub use service::QueryService;
pub use types::{
    Column, ColumnSchema, Engine, JobId, JobParams, JobStatus, NamedQueryOptions, QueryOptions,
    ResultRow,
};

/// tdquery version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tdquery crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
