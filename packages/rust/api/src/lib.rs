//! Generic HTTP access layer for the SliceVote backend.
//!
//! The backend speaks one convention: hypermedia-style resource objects
//! carrying a self link, JSON bodies, bearer-token auth, and a trailing-slash
//! URL scheme. This crate wraps that convention behind five verbs
//! ([`ApiClient::get`], `post`, `put`, `patch`, `delete`):
//! - resource references (raw paths or backend objects) resolve against the
//!   configured base URL
//! - empty success bodies come back as [`Payload::NoContent`] instead of a
//!   parse error
//! - failures are surfaced to the user through an injected [`Notifier`]
//!   exactly once and then returned to the caller, never swallowed
//!
//! Not a general HTTP library: no retries, no timeouts, no concurrency
//! limiting. Each call is one round trip; drop the future to cancel it.

mod client;
pub mod notify;
mod resolve;

pub use client::{ApiClient, Body, Payload};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use resolve::{ResourceRef, resolve};
