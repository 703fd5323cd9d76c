// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Decoders for the engine's result encodings
//!
//! - Schema: a JSON string holding `[[name, type], ...]`.
//! - Rows: one JSON array per line, no enclosing array.
//!
//! Rows are decoded line by line. The producer must escape newlines inside
//! string values (`\n` in the JSON text); a raw newline splits a row and is
//! reported as a decode error on that line.

use crate::engine::RawResult;
use crate::error::{DecodeTarget, Error, Result};
use crate::types::{ColumnSchema, JobId, ResultRow};

/// Decode the `hive_result_schema` blob of a job
pub fn decode_schema(job_id: &JobId, blob: &str) -> Result<ColumnSchema> {
    serde_json::from_str(blob).map_err(|source| Error::Decode {
        job_id: job_id.clone(),
        target: DecodeTarget::Schema,
        source,
        line: None,
        payload: blob.to_string(),
    })
}

/// Decode a raw result payload into positional rows
///
/// An empty payload (or a non-text body) is an empty result set, which is
/// how the engine reports a job with zero output rows.
pub fn decode_rows(job_id: &JobId, raw: &RawResult) -> Result<Vec<ResultRow>> {
    let text = match raw.as_text() {
        Some(text) => text.trim(),
        None => return Ok(Vec::new()),
    };

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row: ResultRow = serde_json::from_str(line).map_err(|source| Error::Decode {
            job_id: job_id.clone(),
            target: DecodeTarget::Result,
            source,
            line: Some(index + 1),
            payload: text.to_string(),
        })?;
        rows.push(row);
    }

    log::debug!("Decoded {} row(s) for job {}", rows.len(), job_id);
    Ok(rows)
}
