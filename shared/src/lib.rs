//! Shared types for the sales dashboard
//!
//! Sale records, filter vocabulary, query encoding and response shapes
//! used by both the API client and the dashboard.

pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use models::{Prediction, Sale, SalesStats};
pub use query::{Facet, FacetSelections, PAGE_SIZE, SalesQuery, SortField, SortOrder, StatsQuery};
pub use response::SalesPage;
pub use serde::{Deserialize, Serialize};
