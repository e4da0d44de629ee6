//! Dashboard controller
//!
//! Owns the [`DashboardState`] behind an async lock and issues the fetches
//! each mutation requires. The lock is never held across a request.

use std::sync::Arc;

use sales_client::{Facet, HttpClient, NetworkHttpClient, Sale, SalesApi, SortField, SortOrder};
use tokio::sync::RwLock;

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::filter::{QueryManager, Refetch, StatsScope};
use crate::state::DashboardState;

pub struct Dashboard<C> {
    api: SalesApi<C>,
    state: Arc<RwLock<DashboardState>>,
}

impl<C> Clone for Dashboard<C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
        }
    }
}

impl Dashboard<NetworkHttpClient> {
    /// Dashboard over the network client `config` describes
    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        let api = config.client_config().build_api()?;
        Ok(Self::new(api, config.stats_scope))
    }
}

impl<C: HttpClient> Dashboard<C> {
    pub fn new(api: SalesApi<C>, scope: StatsScope) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::new(QueryManager::new(scope)))),
        }
    }

    pub fn api(&self) -> &SalesApi<C> {
        &self.api
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Initial load of list and stats
    pub async fn start(&self) {
        self.run(Refetch::ALL).await;
    }

    // ========== Fetching ==========

    /// Run the fetches `refetch` asks for, concurrently
    pub async fn run(&self, refetch: Refetch) {
        match (refetch.list, refetch.stats) {
            (true, true) => {
                tokio::join!(self.refresh_list(), self.refresh_stats());
            }
            (true, false) => self.refresh_list().await,
            (false, true) => self.refresh_stats().await,
            (false, false) => {}
        }
    }

    pub async fn refresh_list(&self) {
        let (ticket, query) = self.state.write().await.begin_list();
        tracing::debug!(seq = ticket.seq, page = query.page, "Fetching sales");

        let result = self.api.try_list_sales(&query).await;
        self.state.write().await.complete_list(ticket, result);
    }

    pub async fn refresh_stats(&self) {
        let (ticket, query) = self.state.write().await.begin_stats();
        tracing::debug!(seq = ticket.seq, "Fetching stats");

        let result = self.api.try_fetch_stats(&query).await;
        self.state.write().await.complete_stats(ticket, result);
    }

    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut QueryManager) -> Refetch,
    {
        let refetch = {
            let mut state = self.state.write().await;
            f(&mut state.query)
        };
        self.run(refetch).await;
    }

    // ========== Filters ==========

    pub async fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(move |q| q.set_search_text(text)).await;
    }

    pub async fn toggle_facet(&self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        self.update(move |q| q.toggle_facet(facet, value)).await;
    }

    pub async fn clear_facet(&self, facet: Facet) {
        self.update(move |q| q.clear_facet(facet)).await;
    }

    pub async fn select_only(&self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        self.update(move |q| q.select_only(facet, value)).await;
    }

    // ========== Sort ==========

    pub async fn set_sort_direction(&self, order: SortOrder) {
        self.update(move |q| q.set_sort_direction(order)).await;
    }

    pub async fn toggle_sort_direction(&self) {
        self.update(|q| q.toggle_sort_direction()).await;
    }

    pub async fn set_sort_field(&self, field: SortField) {
        self.update(move |q| q.set_sort_field(field)).await;
    }

    // ========== Pagination ==========

    /// Go to `page`, clamped to `[1, pages]`
    pub async fn go_to_page(&self, page: u32) {
        self.update(move |q| {
            let page = q.clamp_page(page);
            q.set_page(page)
        })
        .await;
    }

    pub async fn next_page(&self) {
        self.update(|q| {
            let page = q.clamp_page(q.pagination().page.saturating_add(1));
            q.set_page(page)
        })
        .await;
    }

    pub async fn prev_page(&self) {
        self.update(|q| {
            let page = q.clamp_page(q.pagination().page.saturating_sub(1));
            q.set_page(page)
        })
        .await;
    }

    // ========== Records ==========

    /// Submit a new sale, then reload list and stats
    ///
    /// Reloads whether or not the create succeeded; `None` means the outcome
    /// is unknown, not that nothing was stored.
    pub async fn create_sale(&self, sale: &Sale) -> Option<Sale> {
        let created = self.api.create_sale(sale).await;
        if let Some(created) = &created {
            tracing::info!(id = ?created.id, "Sale created");
        }
        self.run(Refetch::ALL).await;
        created
    }

    /// Predicted revenue for `quantity`; 0 on failure
    pub async fn predict(&self, quantity: u32) -> f64 {
        self.api.predict(quantity).await
    }
}
