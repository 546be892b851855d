use serde_json::Value;
use tracing::debug;

use cfp_core::{ProblemKey, TouchedSet};

use crate::client::ApiClient;
use crate::error::{ApiError, FetchError};
use crate::transport::Transport;

/// Union of every problem identity any of the given handles has ever
/// submitted to, regardless of verdict. Handles are processed in input
/// order, sequentially, through the client's shared throttle.
pub async fn build_touched_set<T: Transport>(
    client: &ApiClient<T>,
    handles: &[String],
) -> Result<TouchedSet, ApiError> {
    let mut touched = TouchedSet::new();
    for handle in handles {
        debug!("user.status: loading history for {handle}");
        let rows = client.user_submissions(handle).await.map_err(|e| match e {
            FetchError::Rejected { ref comment, .. } if is_unknown_handle(comment) => {
                ApiError::InvalidHandle {
                    handle: handle.clone(),
                    comment: comment.clone(),
                }
            }
            other => ApiError::Fetch(other),
        })?;
        let before = touched.len();
        for row in &rows {
            if let Some(key) = submission_key(row) {
                touched.insert(key);
            }
        }
        debug!(
            "user.status: {handle} contributed {} new problem(s) from {} submission(s)",
            touched.len() - before,
            rows.len()
        );
    }
    Ok(touched)
}

/// The service reports unknown handles as a FAILED comment rather than a
/// dedicated code.
fn is_unknown_handle(comment: &str) -> bool {
    let c = comment.to_lowercase();
    c.contains("not found") || c.contains("handles:")
}

/// Problem identity of one submission row; rows without a full identity
/// (old gym submissions and the like) are skipped.
fn submission_key(row: &Value) -> Option<ProblemKey> {
    let problem = row.get("problem")?;
    let contest_id = problem.get("contestId")?.as_i64()?;
    let index = problem.get("index")?.as_str()?;
    Some(ProblemKey::new(contest_id, index))
}
