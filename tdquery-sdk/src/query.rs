//! Query builder for ad-hoc jobs
//!
//! Collects the database, SQL text, dialect and job parameters, then runs the
//! full submit/poll/fetch flow in one call.

use crate::connection::TreasureData;
use crate::error::{Error, Result};
use crate::result::TypedResult;
use tdquery::{Engine, QueryOptions};

/// Fluent API for building an ad-hoc query
///
/// # Examples
///
/// ```no_run
/// # use tdquery_sdk::{ServiceConfig, TreasureData};
/// # async fn example() -> Result<(), tdquery_sdk::Error> {
/// # let td = TreasureData::connect(ServiceConfig::new("my-api-key"))?;
/// let result = td
///     .query_builder()
///     .database("my_db")
///     .sql("SELECT name, views FROM my_table")
///     .hive()
///     .priority(1)
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<'td> {
    td: &'td TreasureData,
    database: Option<String>,
    sql: Option<String>,
    options: QueryOptions,
}

impl<'td> QueryBuilder<'td> {
    pub(crate) fn new(td: &'td TreasureData) -> Self {
        QueryBuilder {
            td,
            database: None,
            sql: None,
            options: QueryOptions::default(),
        }
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    pub fn sql(mut self, sql: &str) -> Self {
        self.sql = Some(sql.to_string());
        self
    }

    pub fn engine(mut self, engine: Engine) -> Self {
        self.options.engine = engine;
        self
    }

    /// Shorthand for `engine(Engine::Hive)`
    pub fn hive(self) -> Self {
        self.engine(Engine::Hive)
    }

    /// Scheduling priority, -2 (very low) to 2 (very high)
    pub fn priority(mut self, priority: i8) -> Self {
        self.options.params.priority = Some(priority);
        self
    }

    pub fn retry_limit(mut self, retry_limit: u32) -> Self {
        self.options.params.retry_limit = Some(retry_limit);
        self
    }

    pub fn pool_name(mut self, pool_name: &str) -> Self {
        self.options.params.pool_name = Some(pool_name.to_string());
        self
    }

    /// Export the result to this target as well
    pub fn result_url(mut self, result_url: &str) -> Self {
        self.options.params.result_url = Some(result_url.to_string());
        self
    }

    pub fn domain_key(mut self, domain_key: &str) -> Self {
        self.options.params.domain_key = Some(domain_key.to_string());
        self
    }

    /// Validate and return `(database, sql, options)` without running anything
    pub fn build(&self) -> Result<(String, String, QueryOptions)> {
        let database = match self.database.as_deref().map(str::trim) {
            Some(database) if !database.is_empty() => database.to_string(),
            _ => {
                return Err(Error::InvalidOperation(
                    "Query requires a database".to_string(),
                ))
            }
        };

        let sql = match self.sql.as_deref().map(str::trim) {
            Some(sql) if !sql.is_empty() => sql.to_string(),
            _ => return Err(Error::InvalidOperation("Query requires SQL text".to_string())),
        };

        if let Some(priority) = self.options.params.priority {
            if !(-2..=2).contains(&priority) {
                return Err(Error::InvalidOperation(format!(
                    "Priority must be between -2 and 2, got {}",
                    priority
                )));
            }
        }

        Ok((database, sql, self.options.clone()))
    }

    /// Build and run the query
    pub async fn execute(&self) -> Result<TypedResult> {
        let (database, sql, options) = self.build()?;
        self.td.query_with(&database, &sql, &options).await
    }
}
