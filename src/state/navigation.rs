//! Navigation guard for views that require authentication.
//!
//! Routing itself is an external capability; the guard only decides. The one
//! invariant that matters: never redirect on a probe that has not settled,
//! or the user sees a flash-redirect to sign-in followed by a flash-back.

use crate::state::session::{AuthStatus, Session};
use log::*;

/// Path of the sign-in view.
pub const SIGN_IN_PATH: &str = "/signin";

/// Opaque navigation capability handed in by the application shell.
///
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// What a protected view should do right now.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GuardDecision {
    /// Probe pending or sign-out navigation already in flight: render a
    /// loading indicator, do not redirect.
    Wait,
    /// Render the protected view.
    Allow,
    /// Signed out without an explicit sign-out: go to the sign-in view.
    RedirectToSignIn,
}

/// Decide from (auth status, just-signed-out) what a protected view does.
///
pub fn guard(session: &Session) -> GuardDecision {
    match (session.status(), session.just_signed_out()) {
        (AuthStatus::Unknown, _) => GuardDecision::Wait,
        (AuthStatus::SignedIn, _) => GuardDecision::Allow,
        (AuthStatus::SignedOut, true) => GuardDecision::Wait,
        (AuthStatus::SignedOut, false) => GuardDecision::RedirectToSignIn,
    }
}

/// Apply the guard decision, navigating only in the redirect case.
///
pub fn enforce(session: &Session, navigator: &mut dyn Navigator) -> GuardDecision {
    let decision = guard(session);
    if decision == GuardDecision::RedirectToSignIn {
        debug!("Redirecting unauthenticated user to {}", SIGN_IN_PATH);
        navigator.navigate(SIGN_IN_PATH);
    }
    decision
}
