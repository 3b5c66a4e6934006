//! Application state management module.
//!
//! This module contains the shared state every view is a function of:
//! - `Session`: process-wide authentication state, re-probed on navigation
//! - Navigation guard types for views that require authentication

mod navigation;
mod session;

pub use navigation::{enforce, guard, GuardDecision, Navigator, SIGN_IN_PATH};
pub use session::{AuthStatus, Session};
