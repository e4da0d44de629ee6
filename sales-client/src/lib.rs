//! Sales Client - HTTP client for the sales API
//!
//! Lists, filters and creates sale records, fetches aggregate statistics and
//! revenue predictions.

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::SalesApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::{
    Facet, FacetSelections, PAGE_SIZE, Prediction, Sale, SalesPage, SalesQuery, SalesStats,
    SortField, SortOrder, StatsQuery,
};
