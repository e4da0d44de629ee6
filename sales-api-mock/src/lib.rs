//! In-memory mock of the sales API
//!
//! Serves `/sales`, `/sales/stats`, `/sales/predict` from a `Vec<Sale>`.
//! Used by the client and dashboard tests and by the `sales-api-mock`
//! binary for local development.

pub mod api;
pub mod state;
pub mod store;

pub use api::{app, router};
pub use state::MockState;
pub use store::sample_sales;
