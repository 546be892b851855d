use std::collections::HashMap;

use chrono::{DateTime, Datelike};
use serde_json::Value;
use tracing::debug;

use cfp_core::{ContestMeta, Problem, ProblemKey};

use crate::client::ApiClient;
use crate::error::{ApiError, FetchError};
use crate::transport::Transport;

/// Fetch the full problem catalog with contest metadata resolved.
///
/// Problems without a rating are kept (they can never match a requested
/// rating); problems whose contest carries no usable metadata are
/// dropped, since their year cannot be checked.
pub async fn load_catalog<T: Transport>(client: &ApiClient<T>) -> Result<Vec<Problem>, ApiError> {
    let problems = client
        .call("problemset.problems", &[])
        .await
        .map_err(ApiError::CatalogUnavailable)?;
    let contests = client
        .call("contest.list", &[("gym", "false".to_string())])
        .await
        .map_err(ApiError::CatalogUnavailable)?;

    let meta = parse_contests(&contests).map_err(ApiError::CatalogUnavailable)?;
    let catalog = parse_problems(&problems, &meta).map_err(ApiError::CatalogUnavailable)?;
    debug!(
        "catalog: {} problem(s) across {} contest(s)",
        catalog.len(),
        meta.len()
    );
    Ok(catalog)
}

/// Contest id -> metadata for every non-gym contest with a start time.
fn parse_contests(result: &Value) -> Result<HashMap<i64, ContestMeta>, FetchError> {
    let rows = result
        .as_array()
        .ok_or_else(|| FetchError::Malformed("contest.list result is not an array".to_string()))?;
    let mut meta = HashMap::new();
    for row in rows {
        if row.get("gym").and_then(Value::as_bool) == Some(true) {
            continue;
        }
        let (Some(id), Some(start)) = (
            row.get("id").and_then(Value::as_i64),
            row.get("startTimeSeconds").and_then(Value::as_i64),
        ) else {
            continue;
        };
        let Some(start) = DateTime::from_timestamp(start, 0) else {
            continue;
        };
        let name = row
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        meta.insert(
            id,
            ContestMeta {
                id,
                name,
                year: start.year(),
            },
        );
    }
    Ok(meta)
}

fn parse_problems(
    result: &Value,
    meta: &HashMap<i64, ContestMeta>,
) -> Result<Vec<Problem>, FetchError> {
    let rows = result
        .get("problems")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FetchError::Malformed("problemset.problems result missing problems array".to_string())
        })?;
    let mut catalog = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(contest_id), Some(index)) = (
            row.get("contestId").and_then(Value::as_i64),
            row.get("index").and_then(Value::as_str),
        ) else {
            continue;
        };
        let Some(contest) = meta.get(&contest_id) else {
            continue;
        };
        let rating = row
            .get("rating")
            .and_then(Value::as_u64)
            .and_then(|r| u32::try_from(r).ok());
        let tags = row
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let name = row
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        catalog.push(Problem {
            key: ProblemKey::new(contest_id, index),
            name,
            rating,
            tags,
            year: contest.year,
            contest_name: contest.name.clone(),
        });
    }
    Ok(catalog)
}
