//! Client transports
//!
//! [`HttpClient`] is the seam between the API operations and the wire:
//! `NetworkHttpClient` talks to a remote server over reqwest,
//! `OneshotHttpClient` drives an in-process axum router.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
