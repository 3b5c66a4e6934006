//! Fire-and-refresh mutation submission.
//!
//! Mutations never splice fetched data locally: a successful submission bumps
//! the caller's refresh token and the affected query cell re-fetches. The one
//! exception is the optimistic like/follow toggle, which flips local state
//! immediately and does not reconcile against the server response.

use crate::api::{ApiError, Client};
use crate::query::RefreshToken;
use log::*;
use reqwest::Method;

/// Submit one mutating request. On any 2xx the refresh token is bumped so
/// dependent query cells re-fetch; on a non-2xx the token is left alone and
/// the status is surfaced to the caller. No retries, no rollback.
///
pub async fn submit(
    client: &Client,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
    refresh: &mut RefreshToken,
) -> Result<(), ApiError> {
    let response = client.send(method.clone(), path, body.as_ref()).await?;
    let status = response.status();
    if !status.is_success() {
        warn!("{} {} failed with status {}", method, path, status);
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }
    refresh.bump();
    Ok(())
}

/// Which request a toggle click obligates the caller to send.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ToggleIntent {
    Engage,
    Disengage,
}

/// Local state for like/follow style toggles. A click flips the flag and
/// count immediately, independent of network completion; a second click
/// before the first request settles reverts the state and yields the
/// opposite intent. Final state is not reconciled against the server if a
/// request fails.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OptimisticToggle {
    engaged: bool,
    count: i64,
}

impl OptimisticToggle {
    pub fn new(engaged: bool, count: i64) -> Self {
        OptimisticToggle { engaged, count }
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// Fold in the initially fetched server value without touching the
    /// count.
    pub fn adopt(&mut self, engaged: bool) {
        self.engaged = engaged;
    }

    /// Flip local state and return the request intent the caller must issue.
    pub fn click(&mut self) -> ToggleIntent {
        if self.engaged {
            self.engaged = false;
            self.count -= 1;
            ToggleIntent::Disengage
        } else {
            self.engaged = true;
            self.count += 1;
            ToggleIntent::Engage
        }
    }
}
