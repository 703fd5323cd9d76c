// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema × rows → named records

use crate::types::{ColumnSchema, ResultRow};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// One result row keyed by column name, in schema order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Convert to a JSON object
    pub fn into_json(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Where each schema column lands in a record
///
/// Repeated column names share the slot of their first occurrence.
struct RecordLayout<'a> {
    names: Vec<&'a str>,
    first_column: Vec<usize>,
    slot_of_column: Vec<usize>,
}

impl<'a> RecordLayout<'a> {
    fn new(schema: &'a ColumnSchema) -> Self {
        let mut slots: HashMap<&str, usize> = HashMap::with_capacity(schema.len());
        let mut names = Vec::with_capacity(schema.len());
        let mut first_column = Vec::with_capacity(schema.len());
        let mut slot_of_column = Vec::with_capacity(schema.len());

        for (index, column) in schema.columns().iter().enumerate() {
            let slot = *slots.entry(column.name()).or_insert_with(|| {
                names.push(column.name());
                first_column.push(index);
                names.len() - 1
            });
            slot_of_column.push(slot);
        }

        Self {
            names,
            first_column,
            slot_of_column,
        }
    }

    fn record(&self, row: &ResultRow) -> Record {
        let width = row.len().min(self.slot_of_column.len());
        // slots are ordered by first occurrence, so the filled ones are a prefix
        let filled = self.first_column.partition_point(|&index| index < width);

        let mut fields: Vec<(String, Value)> = self.names[..filled]
            .iter()
            .map(|name| (name.to_string(), Value::Null))
            .collect();
        for (slot, value) in self.slot_of_column.iter().zip(&row[..width]) {
            fields[*slot].1 = value.clone();
        }

        Record { fields }
    }
}

/// Zip a schema with positional rows
///
/// Column `i` takes `row[i]`. A short row leaves its trailing columns out of
/// the record; values past the last column are dropped. A repeated column
/// name keeps its first position and takes the last value.
pub fn map_schema_to_records(schema: &ColumnSchema, rows: &[ResultRow]) -> Vec<Record> {
    let layout = RecordLayout::new(schema);
    rows.iter().map(|row| layout.record(row)).collect()
}
