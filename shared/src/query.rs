//! Sales query types
//!
//! Filter vocabulary (facets, sort) and the query-string encoding the sales
//! API expects: multi-valued facets go out as repeated keys
//! (`region=North&region=South`), never comma-joined or indexed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Fixed page size of the sales list
pub const PAGE_SIZE: u32 = 10;

/// Error parsing a filter keyword
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseKeywordError {
    pub kind: &'static str,
    pub value: String,
}

// =============================================================================
// Facets
// =============================================================================

/// Multi-valued filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Region,
    Gender,
    Category,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Region, Facet::Gender, Facet::Category];

    /// Query parameter name
    pub fn param(self) -> &'static str {
        match self {
            Facet::Region => "region",
            Facet::Gender => "gender",
            Facet::Category => "category",
        }
    }

    /// Values offered by the filter dropdowns
    ///
    /// Selections are not restricted to this list.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Facet::Region => &["North", "South", "East", "West"],
            Facet::Gender => &["Male", "Female"],
            Facet::Category => &["Electronics", "Clothing", "Home", "Beauty"],
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl FromStr for Facet {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "region" => Ok(Facet::Region),
            "gender" => Ok(Facet::Gender),
            "category" => Ok(Facet::Category),
            _ => Err(ParseKeywordError {
                kind: "facet",
                value: s.to_string(),
            }),
        }
    }
}

/// Selected values per facet
///
/// An empty set means "no restriction", never "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelections {
    #[serde(default)]
    pub region: BTreeSet<String>,
    #[serde(default)]
    pub gender: BTreeSet<String>,
    #[serde(default)]
    pub category: BTreeSet<String>,
}

impl FacetSelections {
    pub fn get(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Region => &self.region,
            Facet::Gender => &self.gender,
            Facet::Category => &self.category,
        }
    }

    fn get_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Region => &mut self.region,
            Facet::Gender => &mut self.gender,
            Facet::Category => &mut self.category,
        }
    }

    /// Adds `value` if absent, removes it if present
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, facet: Facet, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = self.get_mut(facet);
        if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        }
    }

    /// Adds `value`; selecting an already selected value is a no-op
    pub fn insert(&mut self, facet: Facet, value: impl Into<String>) {
        self.get_mut(facet).insert(value.into());
    }

    /// Replaces the selection with exactly `value`
    pub fn select_only(&mut self, facet: Facet, value: impl Into<String>) {
        let set = self.get_mut(facet);
        set.clear();
        set.insert(value.into());
    }

    pub fn clear(&mut self, facet: Facet) {
        self.get_mut(facet).clear();
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.get(facet).contains(value)
    }

    /// True when no facet restricts the result set
    pub fn is_unrestricted(&self) -> bool {
        Facet::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Repeated `(param, value)` pairs in facet order; empty facets emit nothing
    pub fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        for facet in Facet::ALL {
            for value in self.get(facet) {
                pairs.push((facet.param(), value.clone()));
            }
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sortable sale fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    TotalAmount,
    Quantity,
    CustomerName,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::TotalAmount => "total_amount",
            SortField::Quantity => "quantity",
            SortField::CustomerName => "customer_name",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "total_amount" | "amount" => Ok(SortField::TotalAmount),
            "quantity" | "qty" => Ok(SortField::Quantity),
            "customer_name" | "name" => Ok(SortField::CustomerName),
            _ => Err(ParseKeywordError {
                kind: "sort field",
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ParseKeywordError {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// `GET /sales` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub facets: FacetSelections,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for SalesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            search: String::new(),
            facets: FacetSelections::default(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl SalesQuery {
    /// Ordered parameter pairs
    ///
    /// `page, limit, search, region*, gender*, category*, sort_by, sort_order`.
    /// An empty search is omitted, as are empty facets.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        self.facets.push_pairs(&mut pairs);
        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        pairs
    }
}

/// `GET /sales/stats` parameters
///
/// `StatsQuery::default()` requests the statistics over all records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    pub search: String,
    pub facets: FacetSelections,
}

impl StatsQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        self.facets.push_pairs(&mut pairs);
        pairs
    }
}

/// Percent-encodes `pairs` into a query string (without the leading `?`)
pub fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends an encoded query to `path`; no `?` for an empty query
pub fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encode_query(pairs))
    }
}
