//! Sales API Handlers

use axum::{
    Json,
    extract::{Query, RawQuery, State},
    http::StatusCode,
};
use shared::{Facet, PAGE_SIZE, Prediction, Sale, SalesPage, SalesStats, SortField, SortOrder};

use crate::state::MockState;
use crate::store::{self, Filter};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Repeated-key query pairs, in order
type Pairs = Vec<(String, String)>;

fn unprocessable(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, msg.into())
}

async fn begin(
    state: &MockState,
    method: &str,
    path: &str,
    raw: Option<String>,
) -> Result<(), (StatusCode, String)> {
    let line = match raw.filter(|q| !q.is_empty()) {
        Some(q) => format!("{} {}?{}", method, path, q),
        None => format!("{} {}", method, path),
    };
    tracing::debug!(request = %line, "mock request");
    state.record_request(line).await;

    if state.is_failing() {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "injected failure".to_string()));
    }
    Ok(())
}

fn parse_filter(pairs: &Pairs) -> Filter {
    let mut filter = Filter::default();
    for (key, value) in pairs {
        match key.as_str() {
            "search" => filter.search = Some(value.clone()),
            other => {
                if let Ok(facet) = other.parse::<Facet>() {
                    filter.facets.insert(facet, value.clone());
                }
            }
        }
    }
    filter
}

fn parse_u32(pairs: &Pairs, key: &str, default: u32) -> Result<u32, (StatusCode, String)> {
    match pairs.iter().rev().find(|(k, _)| k == key) {
        Some((_, v)) => v
            .parse()
            .map_err(|_| unprocessable(format!("{} must be a non-negative integer", key))),
        None => Ok(default),
    }
}

/// GET /sales - paginated, filtered list
pub async fn list(
    State(state): State<MockState>,
    RawQuery(raw): RawQuery,
    Query(pairs): Query<Pairs>,
) -> ApiResult<SalesPage> {
    begin(&state, "GET", "/sales", raw).await?;

    let page = parse_u32(&pairs, "page", 1)?.max(1);
    let limit = parse_u32(&pairs, "limit", PAGE_SIZE)?;
    let mut sort_by = SortField::default();
    let mut sort_order = SortOrder::default();
    for (key, value) in &pairs {
        match key.as_str() {
            "sort_by" => sort_by = value.parse().map_err(|e| unprocessable(format!("{}", e)))?,
            "sort_order" => {
                sort_order = value.parse().map_err(|e| unprocessable(format!("{}", e)))?
            }
            _ => {}
        }
    }

    let filter = parse_filter(&pairs);
    let sales = state.read_sales().await;
    Ok(Json(store::list(&sales, &filter, sort_by, sort_order, page, limit)))
}

/// GET /sales/stats - aggregate figures over the filtered records
pub async fn stats(
    State(state): State<MockState>,
    RawQuery(raw): RawQuery,
    Query(pairs): Query<Pairs>,
) -> ApiResult<SalesStats> {
    begin(&state, "GET", "/sales/stats", raw).await?;

    let filter = parse_filter(&pairs);
    let sales = state.read_sales().await;
    Ok(Json(store::stats(&sales, &filter)))
}

/// POST /sales - store a record, assigning its id
pub async fn create(
    State(state): State<MockState>,
    Json(mut sale): Json<Sale>,
) -> ApiResult<Sale> {
    begin(&state, "POST", "/sales", None).await?;

    sale.id = Some(uuid::Uuid::new_v4().simple().to_string());
    state.insert(sale.clone()).await;
    tracing::info!(id = ?sale.id, customer = %sale.customer_name, "sale created");
    Ok(Json(sale))
}

/// GET /sales/predict?quantity= - revenue forecast
pub async fn predict(
    State(state): State<MockState>,
    RawQuery(raw): RawQuery,
    Query(pairs): Query<Pairs>,
) -> ApiResult<Prediction> {
    begin(&state, "GET", "/sales/predict", raw).await?;

    if !pairs.iter().any(|(k, _)| k == "quantity") {
        return Err(unprocessable("quantity is required"));
    }
    let quantity = parse_u32(&pairs, "quantity", 0)?;
    let sales = state.read_sales().await;
    Ok(Json(Prediction {
        quantity: Some(quantity),
        predicted_total_revenue: store::predict(&sales, quantity),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Pairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_facet_value_stays_selected() {
        let filter = parse_filter(&pairs(&[("region", "North"), ("region", "North")]));
        assert!(filter.facets.contains(Facet::Region, "North"));
        assert_eq!(filter.facets.get(Facet::Region).len(), 1);

        let sales = store::sample_sales(40);
        let page = store::list(&sales, &filter, SortField::Date, SortOrder::Desc, 1, 100);
        assert_eq!(page.total, 10);
        assert!(page.data.iter().all(|s| s.region == "North"));
    }

    #[test]
    fn test_parse_filter_ignores_unknown_keys() {
        let filter = parse_filter(&pairs(&[
            ("search", "ann"),
            ("gender", "Female"),
            ("page", "2"),
            ("colour", "red"),
        ]));
        assert_eq!(filter.search.as_deref(), Some("ann"));
        assert!(filter.facets.contains(Facet::Gender, "Female"));
        assert!(filter.facets.region.is_empty());
    }
}
