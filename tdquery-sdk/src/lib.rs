//! tdquery SDK - HTTP client and ergonomic API on top of tdquery
//!
//! This crate connects the tdquery job orchestration core to the engine's REST
//! API and offers a small, typed surface for applications: connect, run a query
//! or a saved query, and deserialize the records into your own structs.
//!
//! # Quick Start
//!
//! ```no_run
//! use serde::Deserialize;
//! use tdquery_sdk::{ServiceConfig, TreasureData};
//!
//! #[derive(Deserialize)]
//! struct PageViews {
//!     name: String,
//!     views: u64,
//! }
//!
//! # async fn example() -> Result<(), tdquery_sdk::Error> {
//! let td = TreasureData::connect(ServiceConfig::new("my-api-key"))?;
//!
//! let pages: Vec<PageViews> = td
//!     .query("my_db", "SELECT name, views FROM my_table")
//!     .await?
//!     .deserialize_rows()?;
//!
//! let daily = td.named_query("daily_rollup").await?;
//! println!("{} rows", daily.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code (Your Rust App)      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  tdquery SDK (this crate)               │
//! │  - TreasureData (main API)              │
//! │  - QueryBuilder (fluent queries)        │
//! │  - TypedResult (deserialization)        │
//! │  - HttpEngine (REST transport)          │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  tdquery core (tdquery crate)           │
//! │  - QueryService                         │
//! │  - JobClient / CompletionPoller         │
//! │  - Decoders / Record mapper             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`connection`] - HTTP engine and the main entry point
//! - [`query`] - Query builder
//! - [`result`] - Result handling and deserialization
//! - [`error`] - Error types and handling

// Re-export core types for convenience
pub use tdquery::{
    Engine, ErrorKind, JobId, JobStatus, NamedQueryOptions, QueryOptions, Record, Reporter,
    ServiceConfig,
};

// SDK modules
pub mod connection;
pub mod error;
pub mod query;
pub mod result;

// Re-export main types for convenience
pub use connection::{HttpEngine, TreasureData};
pub use error::{Error, Result};
pub use query::QueryBuilder;
pub use result::TypedResult;
