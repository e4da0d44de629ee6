//! Dashboard state
//!
//! Everything a renderer needs: the query state, the current page of
//! records, the aggregate stats and the loading/error flags.
//!
//! Fetches are split into `begin_*` (issue a [`Ticket`], derive the query)
//! and `complete_*` (apply the result). A completion is applied only if its
//! ticket is the newest one issued on its channel, so a slow earlier
//! response never overwrites a faster later one.

use sales_client::{ClientError, Sale, SalesPage, SalesQuery, SalesStats, StatsQuery};

use crate::filter::QueryManager;

/// Fetch channel a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    List,
    Stats,
}

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub channel: Channel,
    pub seq: u64,
}

/// Result of completing a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer fetch was issued on the same channel; result discarded
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub query: QueryManager,
    /// Records of the current page
    pub sales: Vec<Sale>,
    pub stats: SalesStats,
    /// True while the newest list fetch is in flight
    pub loading: bool,
    /// Failure of the last applied list fetch; `sales` is empty when set
    pub list_error: Option<String>,
    /// Failure of the last applied stats fetch; `stats` is zeroed when set
    pub stats_error: Option<String>,
    list_seq: u64,
    stats_seq: u64,
}

impl DashboardState {
    pub fn new(query: QueryManager) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    pub fn begin_list(&mut self) -> (Ticket, SalesQuery) {
        self.list_seq += 1;
        self.loading = true;
        let ticket = Ticket {
            channel: Channel::List,
            seq: self.list_seq,
        };
        (ticket, self.query.sales_query())
    }

    pub fn begin_stats(&mut self) -> (Ticket, StatsQuery) {
        self.stats_seq += 1;
        let ticket = Ticket {
            channel: Channel::Stats,
            seq: self.stats_seq,
        };
        (ticket, self.query.stats_query())
    }

    /// Whether `ticket` is the newest fetch issued on its channel
    pub fn is_current(&self, ticket: Ticket) -> bool {
        match ticket.channel {
            Channel::List => ticket.seq == self.list_seq,
            Channel::Stats => ticket.seq == self.stats_seq,
        }
    }

    /// Apply a list response; failures become the empty page
    pub fn complete_list(
        &mut self,
        ticket: Ticket,
        result: Result<SalesPage, ClientError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.seq, latest = self.list_seq, "Dropping stale sales response");
            return Completion::Stale;
        }

        let page = match result {
            Ok(page) => {
                self.list_error = None;
                page
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch sales");
                self.list_error = Some(e.to_string());
                SalesPage::default()
            }
        };

        self.query.apply_totals(&page);
        self.sales = page.data;
        self.loading = false;
        Completion::Applied
    }

    /// Apply a stats response; failures become all zeros
    pub fn complete_stats(
        &mut self,
        ticket: Ticket,
        result: Result<SalesStats, ClientError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.seq, latest = self.stats_seq, "Dropping stale stats response");
            return Completion::Stale;
        }

        match result {
            Ok(stats) => {
                self.stats = stats;
                self.stats_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch stats");
                self.stats = SalesStats::default();
                self.stats_error = Some(e.to_string());
            }
        }
        Completion::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_client::{Facet, PAGE_SIZE};

    fn page_of(total: u64) -> SalesPage {
        SalesPage::new(Vec::new(), total, 1, PAGE_SIZE)
    }

    #[test]
    fn test_list_failure_yields_empty_state() {
        let mut state = DashboardState::default();
        let (t, _) = state.begin_list();
        assert!(state.loading);
        state.complete_list(t, Ok(page_of(42)));
        assert_eq!(state.query.pagination().total, 42);

        let (t, _) = state.begin_list();
        let outcome = state.complete_list(t, Err(ClientError::Internal("down".into())));
        assert_eq!(outcome, Completion::Applied);
        assert!(state.sales.is_empty());
        assert_eq!(state.query.pagination().total, 0);
        assert_eq!(state.query.pagination().pages, 0);
        assert!(!state.loading);
        assert!(state.list_error.is_some());
    }

    #[test]
    fn test_stats_failure_yields_zeros() {
        let mut state = DashboardState::default();
        let (t, _) = state.begin_stats();
        state.complete_stats(
            t,
            Ok(SalesStats {
                total_revenue: 10.0,
                total_orders: 1,
                avg_order_value: 10.0,
            }),
        );

        let (t, _) = state.begin_stats();
        state.complete_stats(t, Err(ClientError::Internal("down".into())));
        assert_eq!(state.stats, SalesStats::default());
        assert!(state.stats_error.is_some());
    }

    #[test]
    fn test_stale_list_response_dropped() {
        let mut state = DashboardState::default();
        let (first, _) = state.begin_list();
        let (second, _) = state.begin_list();

        assert_eq!(state.complete_list(second, Ok(page_of(3))), Completion::Applied);
        assert!(!state.loading);

        assert_eq!(state.complete_list(first, Ok(page_of(99))), Completion::Stale);
        assert_eq!(state.query.pagination().total, 3);
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_completion_keeps_loading() {
        let mut state = DashboardState::default();
        let (first, _) = state.begin_list();
        let (_second, _) = state.begin_list();

        state.complete_list(first, Ok(page_of(1)));
        assert!(state.loading);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut state = DashboardState::default();
        let (list, _) = state.begin_list();
        let (stats, _) = state.begin_stats();
        let (_stats2, _) = state.begin_stats();

        assert!(state.is_current(list));
        assert!(!state.is_current(stats));
    }

    #[test]
    fn test_begin_list_uses_current_query() {
        let mut state = DashboardState::default();
        state.query.toggle_facet(Facet::Gender, "Female");
        let (_, query) = state.begin_list();
        assert!(query.facets.contains(Facet::Gender, "Female"));
        assert_eq!(query.page, 1);
    }
}
