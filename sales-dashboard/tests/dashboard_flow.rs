// sales-dashboard/tests/dashboard_flow.rs
// Dashboard driven through the in-process client against the mock API

use chrono::Utc;
use sales_api_mock::{MockState, router, sample_sales};
use sales_client::{Facet, OneshotHttpClient, Sale, SalesApi, SortField};
use sales_dashboard::console::{self, Command};
use sales_dashboard::{Dashboard, DashboardConfig, StatsScope};

fn dashboard_for(state: &MockState, scope: StatsScope) -> Dashboard<OneshotHttpClient> {
    let api = SalesApi::new(OneshotHttpClient::new(router(state.clone())));
    Dashboard::new(api, scope)
}

async fn started(sales: usize, scope: StatsScope) -> (MockState, Dashboard<OneshotHttpClient>) {
    let state = MockState::with_sales(sample_sales(sales));
    let dashboard = dashboard_for(&state, scope);
    dashboard.start().await;
    (state, dashboard)
}

#[tokio::test]
async fn test_start_loads_list_and_stats() {
    let (state, dashboard) = started(25, StatsScope::Filtered).await;

    let mut requests = state.requests().await;
    requests.sort();
    assert_eq!(
        requests,
        vec![
            "GET /sales/stats",
            "GET /sales?page=1&limit=10&sort_by=date&sort_order=desc",
        ]
    );

    let snap = dashboard.snapshot().await;
    assert_eq!(snap.sales.len(), 10);
    assert_eq!(snap.stats.total_orders, 25);
    assert_eq!(snap.query.pagination().total, 25);
    assert_eq!(snap.query.pagination().pages, 3);
    assert!(!snap.loading);
    assert!(snap.list_error.is_none());
}

#[tokio::test]
async fn test_search_then_region_issues_filtered_requests() {
    let (state, dashboard) = started(40, StatsScope::Filtered).await;

    dashboard.set_search_text("John").await;
    state.clear_requests().await;
    dashboard.toggle_facet(Facet::Region, "North").await;

    let requests = state.requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests.contains(
        &"GET /sales?page=1&limit=10&search=John&region=North&sort_by=date&sort_order=desc"
            .to_string()
    ));
    assert!(requests.contains(&"GET /sales/stats?search=John&region=North".to_string()));

    let snap = dashboard.snapshot().await;
    assert!(!snap.sales.is_empty());
    assert!(snap.sales.iter().all(|s| s.region == "North"));
    assert!(snap.sales.iter().all(|s| s.customer_name.contains("John")));
    assert_eq!(snap.stats.total_orders, snap.query.pagination().total);
}

#[tokio::test]
async fn test_filter_change_resets_page() {
    let (state, dashboard) = started(60, StatsScope::Filtered).await;

    dashboard.go_to_page(4).await;
    assert_eq!(dashboard.snapshot().await.query.pagination().page, 4);

    state.clear_requests().await;
    dashboard.toggle_facet(Facet::Gender, "Female").await;

    assert_eq!(dashboard.snapshot().await.query.pagination().page, 1);
    let requests = state.requests().await;
    assert!(requests.contains(
        &"GET /sales?page=1&limit=10&gender=Female&sort_by=date&sort_order=desc".to_string()
    ));
}

#[tokio::test]
async fn test_sort_and_page_refetch_list_only() {
    let (state, dashboard) = started(30, StatsScope::Filtered).await;

    state.clear_requests().await;
    dashboard.set_sort_field(SortField::TotalAmount).await;
    dashboard.toggle_sort_direction().await;
    dashboard.next_page().await;

    let requests = state.requests().await;
    assert_eq!(
        requests,
        vec![
            "GET /sales?page=1&limit=10&sort_by=total_amount&sort_order=desc",
            "GET /sales?page=1&limit=10&sort_by=total_amount&sort_order=asc",
            "GET /sales?page=2&limit=10&sort_by=total_amount&sort_order=asc",
        ]
    );
}

#[tokio::test]
async fn test_unfiltered_scope_keeps_global_stats() {
    let (state, dashboard) = started(30, StatsScope::All).await;

    state.clear_requests().await;
    dashboard.select_only(Facet::Category, "Home").await;

    let requests = state.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /sales?"));

    let snap = dashboard.snapshot().await;
    assert_eq!(snap.stats.total_orders, 30);
    assert!(snap.query.pagination().total < 30);
}

#[tokio::test]
async fn test_failure_yields_empty_state() {
    let (state, dashboard) = started(30, StatsScope::Filtered).await;

    state.set_failing(true);
    dashboard.set_search_text("Priya").await;

    let snap = dashboard.snapshot().await;
    assert!(snap.sales.is_empty());
    assert!(!snap.loading);
    assert!(snap.list_error.is_some());
    assert!(snap.stats_error.is_some());
    assert_eq!(snap.stats.total_orders, 0);
    assert_eq!(snap.query.pagination().total, 0);

    state.set_failing(false);
    dashboard.set_search_text("Priya").await;
    let snap = dashboard.snapshot().await;
    assert!(!snap.sales.is_empty());
    assert!(snap.list_error.is_none());
}

#[tokio::test]
async fn test_create_refreshes_list_and_stats() {
    let (state, dashboard) = started(12, StatsScope::Filtered).await;

    let mut sale = Sale::template(Utc::now());
    sale.customer_name = "Zora".to_string();
    sale.phone_number = "5550199".to_string();
    sale.product_name = "Desk Lamp".to_string();

    let created = dashboard.create_sale(&sale).await;
    assert!(created.as_ref().is_some_and(|s| s.id.is_some()));

    let snap = dashboard.snapshot().await;
    assert_eq!(snap.sales[0].customer_name, "Zora");
    assert_eq!(snap.sales[0].product_name, "Desk Lamp");
    assert_eq!(snap.stats.total_orders, 13);
    assert_eq!(state.sales().await.len(), 13);
}

#[tokio::test]
async fn test_page_navigation_is_clamped() {
    let (state, dashboard) = started(25, StatsScope::Filtered).await;

    dashboard.go_to_page(99).await;
    assert_eq!(dashboard.snapshot().await.query.pagination().page, 3);

    dashboard.next_page().await;
    assert_eq!(dashboard.snapshot().await.query.pagination().page, 3);

    dashboard.go_to_page(1).await;
    dashboard.prev_page().await;
    assert_eq!(dashboard.snapshot().await.query.pagination().page, 1);

    let requests = state.requests().await;
    assert!(requests.iter().all(|r| !r.contains("page=0") && !r.contains("page=99")));
}

#[tokio::test]
async fn test_console_commands() {
    let (_state, dashboard) = started(20, StatsScope::Filtered).await;

    let cmd: Command = "toggle region North".parse().unwrap();
    let out = console::execute(&dashboard, cmd).await;
    assert!(out.contains("region: North"));
    assert!(out.contains("Page 1 of"));

    let out = console::execute(&dashboard, "search nobody-matches".parse().unwrap()).await;
    assert!(out.contains("No records found."));

    let out = console::execute(&dashboard, "predict 3".parse().unwrap()).await;
    assert!(out.starts_with("predicted revenue for 3 units: $"));
}

#[tokio::test]
async fn test_console_add_sets_product() {
    let (state, dashboard) = started(5, StatsScope::Filtered).await;

    let cmd: Command = "add Zora 5550199 Headphones 2 240".parse().unwrap();
    let out = console::execute(&dashboard, cmd).await;
    assert!(out.starts_with("created #"));

    let stored = state.sales().await;
    let created = stored
        .iter()
        .find(|s| s.customer_name == "Zora")
        .expect("created sale stored");
    assert_eq!(created.product_name, "Headphones");
    assert_eq!(created.quantity, 2);
    assert_eq!(created.total_amount, 240.0);
}

#[tokio::test]
async fn test_from_config_applies_scope() {
    let config = DashboardConfig {
        stats_scope: StatsScope::All,
        ..Default::default()
    };
    let dashboard = Dashboard::from_config(&config).unwrap();

    assert_eq!(dashboard.api().http().base_url(), "http://localhost:8000/api");
    assert_eq!(dashboard.snapshot().await.query.scope(), StatsScope::All);
}
