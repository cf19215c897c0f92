//! # chore-notify
//!
//! Turns weekly assignments into per-person messages and delivers them to
//! ntfy endpoints.
//!
//! - [`compose`] — natural-language message text (exact pluralization rules)
//! - [`endpoints`] — the persisted person → endpoint table: load, regenerate
//!   with merge, mint fresh capability URLs
//! - [`dispatch`] — the HTTP client and the sequential fan-out; each
//!   person's delivery is independent, so a failure is logged and the batch
//!   continues
//!
//! Endpoints are unauthenticated capability URLs (`https://ntfy.sh/<uuid>`);
//! whoever knows the URL can subscribe, which is the intended model.

#![deny(unsafe_code)]

pub mod compose;
pub mod dispatch;
pub mod endpoints;
pub mod errors;

pub use dispatch::{Delivery, NtfyClient};
pub use endpoints::EndpointTable;
pub use errors::NotifyError;
