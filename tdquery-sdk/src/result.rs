//! Result handling and typed deserialization
//!
//! This module wraps the records a query returns and deserializes them into
//! user types with serde.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use tdquery::Record;

/// Records of a finished query, with typed accessors
///
/// # Examples
///
/// ```no_run
/// use serde::Deserialize;
/// use tdquery_sdk::{ServiceConfig, TreasureData};
///
/// #[derive(Deserialize, Debug)]
/// struct PageViews {
///     name: String,
///     views: u64,
/// }
///
/// # async fn example() -> Result<(), tdquery_sdk::Error> {
/// # let td = TreasureData::connect(ServiceConfig::new("my-api-key"))?;
/// let result = td.query("my_db", "SELECT name, views FROM my_table").await?;
///
/// for page in result.deserialize_rows::<PageViews>()? {
///     println!("Page: {:?}", page);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypedResult {
    records: Vec<Record>,
}

impl TypedResult {
    pub fn new(records: Vec<Record>) -> Self {
        TypedResult { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names of the first record, in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.records
            .first()
            .map(|record| record.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn get_row(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Deserialize every record into `T`
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.records
            .iter()
            .map(|record| self.deserialize_row(record))
            .collect()
    }

    pub fn deserialize_row<T: DeserializeOwned>(&self, record: &Record) -> Result<T> {
        let value = serde_json::to_value(record)?;
        Ok(serde_json::from_value(value)?)
    }

    /// First record as `T`; for single-row queries
    pub fn first<T: DeserializeOwned>(&self) -> Result<T> {
        let record = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        self.deserialize_row(record)
    }

    /// First column of the first record; for `SELECT COUNT(1)` style queries
    pub fn scalar<T: DeserializeOwned>(&self) -> Result<T> {
        let record = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        let (_, value) = record
            .iter()
            .next()
            .ok_or_else(|| Error::NotFound("No columns returned".to_string()))?;

        Ok(serde_json::from_value(value.clone())?)
    }
}

impl From<Vec<Record>> for TypedResult {
    fn from(records: Vec<Record>) -> Self {
        TypedResult::new(records)
    }
}
