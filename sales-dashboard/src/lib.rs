//! Sales Dashboard - console front end for the sales API
//!
//! Keeps search text, facet selections, sort and page in a
//! [`QueryManager`], refetches the record list and the aggregate stats when
//! they change, and renders the result as text.

pub mod config;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod logger;
pub mod state;

pub use config::DashboardConfig;
pub use console::Command;
pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use filter::{FilterState, Pagination, QueryManager, Refetch, StatsScope};
pub use logger::init_logger;
pub use state::{Completion, DashboardState, Ticket};
