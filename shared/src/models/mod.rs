//! Data models
//!
//! Shared between the API client and the dashboard.

pub mod sale;
pub mod stats;

// Re-exports
pub use sale::*;
pub use stats::*;
