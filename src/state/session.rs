//! Process-wide authentication session state.
//!
//! A single `Session` lives at the application root and is handed to all
//! descendants by read reference; only the session itself mutates it. The
//! server is probed on every route change, so staleness is bounded by the
//! time until the next navigation.

use crate::api::{ApiError, Forge};
use crate::state::navigation::Navigator;
use log::*;

/// Tri-state authentication status. `Unknown` until the first probe
/// settles, which is what lets the navigation guard distinguish "not yet
/// known" from "known false".
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthStatus {
    Unknown,
    SignedIn,
    SignedOut,
}

/// Houses authentication state shared across the whole view tree.
///
#[derive(Debug)]
pub struct Session {
    status: AuthStatus,
    just_signed_out: bool,
}

impl Default for Session {
    fn default() -> Session {
        Session {
            status: AuthStatus::Unknown,
            just_signed_out: false,
        }
    }
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    /// `None` while no probe has settled; downstream query cells use this to
    /// keep their keys null until the auth flag is known.
    ///
    pub fn is_authenticated(&self) -> Option<bool> {
        match self.status {
            AuthStatus::Unknown => None,
            AuthStatus::SignedIn => Some(true),
            AuthStatus::SignedOut => Some(false),
        }
    }

    /// One-shot flag distinguishing "unauthenticated because the user just
    /// signed out" from "unauthenticated because never signed in".
    ///
    pub fn just_signed_out(&self) -> bool {
        self.just_signed_out
    }

    /// Consume the one-shot flag. The landing view calls this on mount so
    /// that a later, unrelated loss of authentication redirects correctly.
    ///
    pub fn clear_just_signed_out(&mut self) {
        self.just_signed_out = false;
    }

    /// Re-probe server-side session state; called on every route change.
    /// Updates the status only when the probed flag differs. A failed probe
    /// leaves the status untouched, so a view never flips on a probe that
    /// did not settle.
    ///
    pub async fn on_route_change(&mut self, forge: &Forge) -> Result<(), ApiError> {
        let is_auth = forge.auth_probe().await?;
        let probed = if is_auth {
            AuthStatus::SignedIn
        } else {
            AuthStatus::SignedOut
        };
        if probed != self.status {
            debug!(
                "Authentication state changed: {:?} -> {:?}",
                self.status, probed
            );
            self.status = probed;
        }
        Ok(())
    }

    /// Sign the user out. The server round-trip completes before local state
    /// flips, so a probe racing ahead cannot re-assert an authenticated
    /// session. On success the navigator is pointed home and the
    /// just-signed-out flag is raised. Calling this when already signed out
    /// is a no-op from the user's perspective.
    ///
    pub async fn sign_out(
        &mut self,
        forge: &Forge,
        navigator: &mut dyn Navigator,
    ) -> Result<(), ApiError> {
        forge.sign_out().await?;
        navigator.navigate("/");
        self.just_signed_out = true;
        self.status = AuthStatus::SignedOut;
        info!("Signed out.");
        Ok(())
    }
}
