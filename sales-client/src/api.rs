//! Sales API operations
//!
//! Each operation comes in two forms. The `try_*` form returns the
//! [`ClientError`](crate::ClientError) to the caller. The plain form logs the
//! failure and substitutes the documented default, so a failed list reads as
//! an empty page and failed stats read as zeros.

use shared::query::with_query;
use shared::{Prediction, Sale, SalesPage, SalesQuery, SalesStats, StatsQuery};

use crate::ClientResult;
use crate::client::HttpClient;

const SALES_PATH: &str = "sales";
const STATS_PATH: &str = "sales/stats";
const PREDICT_PATH: &str = "sales/predict";

/// Typed client for the sales endpoints
#[derive(Debug, Clone)]
pub struct SalesApi<C> {
    http: C,
}

impl<C: HttpClient> SalesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    // ========== List ==========

    pub async fn try_list_sales(&self, query: &SalesQuery) -> ClientResult<SalesPage> {
        let path = with_query(SALES_PATH, &query.to_pairs());
        self.http.get(&path).await
    }

    /// `GET /sales`; empty page with zero totals on failure
    pub async fn list_sales(&self, query: &SalesQuery) -> SalesPage {
        match self.try_list_sales(query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(error = %e, page = query.page, "Failed to fetch sales");
                SalesPage::default()
            }
        }
    }

    // ========== Stats ==========

    pub async fn try_fetch_stats(&self, query: &StatsQuery) -> ClientResult<SalesStats> {
        let path = with_query(STATS_PATH, &query.to_pairs());
        self.http.get(&path).await
    }

    /// `GET /sales/stats`; all zeros on failure
    pub async fn fetch_stats(&self, query: &StatsQuery) -> SalesStats {
        match self.try_fetch_stats(query).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch stats");
                SalesStats::default()
            }
        }
    }

    // ========== Create ==========

    /// `POST /sales`; `Ok(None)` when the server answers with an empty body
    pub async fn try_create_sale(&self, sale: &Sale) -> ClientResult<Option<Sale>> {
        self.http.post(SALES_PATH, sale).await
    }

    /// `POST /sales`; `None` on failure
    ///
    /// `None` does not tell whether the record was persisted.
    pub async fn create_sale(&self, sale: &Sale) -> Option<Sale> {
        match self.try_create_sale(sale).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(error = %e, customer = %sale.customer_name, "Failed to create sale");
                None
            }
        }
    }

    // ========== Prediction ==========

    pub async fn try_predict(&self, quantity: u32) -> ClientResult<Prediction> {
        let path = with_query(PREDICT_PATH, &[("quantity", quantity.to_string())]);
        self.http.get(&path).await
    }

    /// `GET /sales/predict`; zero on failure
    pub async fn predict(&self, quantity: u32) -> f64 {
        match self.try_predict(quantity).await {
            Ok(prediction) => prediction.predicted_total_revenue,
            Err(e) => {
                tracing::error!(error = %e, quantity, "Failed to fetch prediction");
                0.0
            }
        }
    }
}
