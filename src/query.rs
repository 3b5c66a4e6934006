//! Query cells: stateful bindings of one API fetch to its latest outcome.
//!
//! A cell is a pure function of (key, dependency snapshot): it issues exactly
//! one fetch per distinct identity of that pair and holds the settled
//! `QueryState` for its subscriber. A null key disables the cell entirely.
//! Overlapping fetches are resolved by sequence number, so the last fetch
//! issued wins regardless of completion order.

use crate::api::{ApiError, Client};
use log::*;
use serde::de::DeserializeOwned;

/// Opaque value whose only contract is inequality after a mutation. Bumped
/// by the mutation submitter and consumed through a cell's dependency list
/// to force a re-fetch.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshToken(u64);

impl RefreshToken {
    /// Mark dependent data as stale.
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Contribute this token to a dependency list.
    pub fn as_dep(&self) -> u64 {
        self.0
    }
}

/// Latest outcome of a cell's fetch. Both sides are `None` while pending or
/// disabled; exactly one is set once a fetch settles.
///
#[derive(Debug)]
pub struct QueryState<T> {
    value: Option<T>,
    error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState {
            value: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// True while no fetch has settled (or the cell is disabled).
    pub fn is_pending(&self) -> bool {
        self.value.is_none() && self.error.is_none()
    }

    fn settle(&mut self, outcome: Result<T, ApiError>) {
        match outcome {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(error) => {
                self.value = None;
                self.error = Some(error);
            }
        }
    }

    fn reset(&mut self) {
        self.value = None;
        self.error = None;
    }
}

/// Permission to run one fetch for a cell. Carries the path to fetch and the
/// sequence number used to discard stale completions.
///
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    path: String,
}

impl FetchTicket {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Binds one possibly-null key (URL path) plus a dependency snapshot to a
/// `QueryState`. Owned by a single subscriber; never shared.
///
pub struct QueryCell<T> {
    key: Option<String>,
    deps: Vec<u64>,
    observed: bool,
    issued: u64,
    state: QueryState<T>,
}

impl<T> Default for QueryCell<T> {
    fn default() -> Self {
        QueryCell {
            key: None,
            deps: vec![],
            observed: false,
            issued: 0,
            state: QueryState::default(),
        }
    }
}

impl<T> QueryCell<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current (key, deps) identity. Returns a ticket iff a fetch
    /// must be issued: first observation of a non-null key, a key change, or
    /// a dependency change. Re-observing an unchanged identity returns
    /// `None`, so unrelated re-renders never re-fetch. A null key disables
    /// the cell: no ticket, state reset to pending-empty.
    ///
    pub fn observe(&mut self, key: Option<&str>, deps: &[u64]) -> Option<FetchTicket> {
        let key_changed = self.key.as_deref() != key;
        let deps_changed = self.deps != deps;

        if key_changed {
            self.key = key.map(str::to_owned);
        }
        if deps_changed {
            self.deps = deps.to_vec();
        }

        let path = match &self.key {
            Some(path) => path,
            None => {
                self.observed = true;
                self.state.reset();
                return None;
            }
        };

        if self.observed && !key_changed && !deps_changed {
            return None;
        }
        self.observed = true;

        self.issued += 1;
        trace!("Issuing fetch #{} for {}", self.issued, path);
        Some(FetchTicket {
            seq: self.issued,
            path: path.clone(),
        })
    }

    /// Settle the outcome of a previously issued fetch. Outcomes of fetches
    /// that are no longer the newest issued one are discarded, so the last
    /// fetch issued wins over the last to resolve. Returns whether the
    /// outcome was applied.
    ///
    pub fn apply(&mut self, ticket: FetchTicket, outcome: Result<T, ApiError>) -> bool {
        if ticket.seq != self.issued {
            debug!(
                "Discarding stale fetch #{} for {} (newest is #{})",
                ticket.seq, ticket.path, self.issued
            );
            return false;
        }
        // The key may have gone null while the fetch was in flight.
        if self.key.is_none() {
            return false;
        }
        self.state.settle(outcome);
        true
    }

    /// Latest settled state.
    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }
}

impl<T: DeserializeOwned> QueryCell<T> {
    /// One-call form for sequential callers: observe the identity and, if a
    /// fetch is due, run it to completion against the client.
    ///
    pub async fn sync(
        &mut self,
        client: &Client,
        key: Option<&str>,
        deps: &[u64],
    ) -> &QueryState<T> {
        if let Some(ticket) = self.observe(key, deps) {
            let outcome = client.get_json::<T>(ticket.path()).await;
            self.apply(ticket, outcome);
        }
        self.state()
    }
}
