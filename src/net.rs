//! Deadline-bounded HTTP plumbing shared by both fetchers.

use std::time::Duration;

use reqwest::{Client, Response};
use tokio::time::timeout;
use tracing::debug;

use crate::error::{StoryError, StoryResult};

/// Issue a GET bounded by `deadline`. When the deadline fires the in-flight
/// request future is dropped, which aborts the connection. A non-success
/// status is an error; callers never see a failed response.
pub(crate) async fn get_within(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> StoryResult<Response> {
    debug!(%url, "GET");
    let response = timeout(deadline, client.get(url).send())
        .await
        .map_err(|_| StoryError::Timeout)?
        .map_err(|e| {
            if e.is_timeout() {
                StoryError::Timeout
            } else {
                StoryError::FetchFailed(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StoryError::FetchFailed(format!("HTTP {status}")));
    }
    Ok(response)
}
