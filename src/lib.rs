//! Client-side synchronization layer for the Forge project hosting API.
//!
//! Every screen of a Forge client is a function of (auth session, one or more
//! fetched resources, local UI state). This crate provides those three legs:
//!
//! - [`api`]: a typed async surface over the HTTP API, one method per
//!   endpoint, with a low-level transport that never treats a non-2xx status
//!   as a transport failure.
//! - [`query`]: query cells binding one fetch to one subscriber, re-issued
//!   exactly once per change of (key, dependency snapshot), with stale
//!   overlapping completions discarded by sequence number.
//! - [`state`]: the process-wide authentication session (probed on every
//!   navigation) and the guard that keeps protected views from redirecting
//!   on a probe that has not settled.
//! - [`comments`]: the recursive reply-tree model backing the comment UI.
//! - [`mutation`]: fire-and-refresh submission that bumps a refresh token on
//!   success so the affected query cell re-fetches.

pub mod api;
pub mod comments;
pub mod config;
pub mod error;
pub mod mutation;
pub mod query;
pub mod state;
pub mod utils;
