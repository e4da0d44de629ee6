//! Dashboard error types

use thiserror::Error;

/// Dashboard error type
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unparseable console command
    #[error("Invalid command: {0}")]
    Command(String),

    /// Unknown facet, sort field or sort order keyword
    #[error(transparent)]
    Keyword(#[from] shared::query::ParseKeywordError),

    /// Client setup failure
    #[error(transparent)]
    Client(#[from] sales_client::ClientError),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
