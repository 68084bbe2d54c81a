//! Batch list loading
//!
//! A batch list is a JSON array such as
//! `[{"contest": 1850, "problem": "A"}, {"contestId": "4", "index": "a"}]`.
//! Entries that do not yield a valid contest id and problem index are skipped.

use crate::error::Error;
use crate::types::ProblemId;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// One batch list entry, with values kept loose so bad entries can be skipped
#[derive(Debug, Clone, Default, Deserialize)]
struct BatchItem {
    #[serde(default, alias = "contestId")]
    contest: Option<Value>,
    #[serde(default, alias = "problemIndex", alias = "index")]
    problem: Option<Value>,
}

/// Contest ids appear both as numbers and as numeric strings
fn contest_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Problem indices are normally strings; other scalars are taken as text
fn problem_index(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_problem_id(entry: Value) -> Result<ProblemId, String> {
    let item: BatchItem = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    let contest = item
        .contest
        .as_ref()
        .and_then(contest_id)
        .ok_or("missing or invalid contest id")?;
    let index = item
        .problem
        .as_ref()
        .and_then(problem_index)
        .ok_or("missing or invalid problem index")?;
    ProblemId::parse(contest, &index).map_err(|e| e.to_string())
}

/// Parse a batch list from JSON text
///
/// Only a document that is not a JSON array is an error; unusable entries
/// are skipped with a warning.
pub fn parse_batch(json: &str) -> Result<Vec<ProblemId>, Error> {
    let entries: Vec<Value> = serde_json::from_str(json).map_err(Error::BatchConfigParse)?;

    let ids = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let raw = entry.to_string();
            match to_problem_id(entry) {
                Ok(id) => Some(id),
                Err(reason) => {
                    warn!(position, entry = %raw, reason = %reason, "Skipping batch entry");
                    None
                }
            }
        })
        .collect();
    Ok(ids)
}

/// Read and parse a batch list file
pub async fn load_batch(path: &Path) -> Result<Vec<ProblemId>, Error> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::BatchConfig(format!(
                "{} does not exist",
                path.display()
            )))
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_batch(&json)
}
