//! Filter and pagination state
//!
//! [`QueryManager`] owns the search text, facet selections, sort and page
//! number. Each mutation returns the [`Refetch`] it requires; deriving the
//! outgoing queries is pure.
//!
//! Refetch policy, applied uniformly:
//! - search / facet changes: page resets to 1, list is refetched, stats are
//!   refetched when the stats scope follows the filters;
//! - sort and page changes: list only (neither is part of the stats query).

use serde::{Deserialize, Serialize};
use shared::{
    Facet, FacetSelections, PAGE_SIZE, SalesPage, SalesQuery, SortField, SortOrder, StatsQuery,
};
use std::str::FromStr;

use crate::error::DashboardError;

/// Which records the aggregate stats cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsScope {
    /// Stats follow the active search and facets
    #[default]
    Filtered,
    /// Stats always cover every record
    All,
}

impl FromStr for StatsScope {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filtered" => Ok(StatsScope::Filtered),
            "all" | "unfiltered" => Ok(StatsScope::All),
            other => Err(DashboardError::Config(format!(
                "STATS_SCOPE must be 'filtered' or 'all', got '{}'",
                other
            ))),
        }
    }
}

/// Fetches a state change requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refetch {
    pub list: bool,
    pub stats: bool,
}

impl Refetch {
    pub const LIST: Refetch = Refetch {
        list: true,
        stats: false,
    };
    pub const ALL: Refetch = Refetch {
        list: true,
        stats: true,
    };
}

/// User-controlled filter fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub facets: FacetSelections,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Current page and the totals of the last list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 0,
            total: 0,
        }
    }
}

/// Filter/query state manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryManager {
    filters: FilterState,
    pagination: Pagination,
    scope: StatsScope,
}

impl QueryManager {
    pub fn new(scope: StatsScope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn scope(&self) -> StatsScope {
        self.scope
    }

    fn filters_changed(&mut self) -> Refetch {
        self.pagination.page = 1;
        Refetch {
            list: true,
            stats: self.scope == StatsScope::Filtered,
        }
    }

    // ========== Filter identity (page resets) ==========

    pub fn set_search_text(&mut self, text: impl Into<String>) -> Refetch {
        self.filters.search = text.into();
        self.filters_changed()
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: impl Into<String>) -> Refetch {
        self.filters.facets.toggle(facet, value);
        self.filters_changed()
    }

    pub fn clear_facet(&mut self, facet: Facet) -> Refetch {
        self.filters.facets.clear(facet);
        self.filters_changed()
    }

    /// Single-select variant: the facet ends up as exactly `{value}`
    pub fn select_only(&mut self, facet: Facet, value: impl Into<String>) -> Refetch {
        self.filters.facets.select_only(facet, value);
        self.filters_changed()
    }

    // ========== Sort and page (page kept) ==========

    pub fn set_sort_direction(&mut self, order: SortOrder) -> Refetch {
        self.filters.sort_order = order;
        Refetch::LIST
    }

    pub fn toggle_sort_direction(&mut self) -> Refetch {
        self.filters.sort_order = self.filters.sort_order.toggled();
        Refetch::LIST
    }

    pub fn set_sort_field(&mut self, field: SortField) -> Refetch {
        self.filters.sort_by = field;
        Refetch::LIST
    }

    /// Sets the page as given; callers clamp with [`Self::clamp_page`]
    pub fn set_page(&mut self, page: u32) -> Refetch {
        self.pagination.page = page;
        Refetch::LIST
    }

    /// Clamp a requested page to `[1, pages]` (1 when there are no pages)
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.pagination.pages.max(1))
    }

    /// Record the totals a list response reported
    pub fn apply_totals(&mut self, page: &SalesPage) {
        self.pagination.total = page.total;
        self.pagination.pages = page.pages;
    }

    // ========== Derived queries ==========

    pub fn sales_query(&self) -> SalesQuery {
        SalesQuery {
            page: self.pagination.page,
            limit: PAGE_SIZE,
            search: self.filters.search.clone(),
            facets: self.filters.facets.clone(),
            sort_by: self.filters.sort_by,
            sort_order: self.filters.sort_order,
        }
    }

    pub fn stats_query(&self) -> StatsQuery {
        match self.scope {
            StatsScope::Filtered => StatsQuery {
                search: self.filters.search.clone(),
                facets: self.filters.facets.clone(),
            },
            StatsScope::All => StatsQuery::default(),
        }
    }
}
