// sales-dashboard/tests/offsetless_dates.rs
// List responses whose timestamps carry no UTC offset

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sales_client::{ClientError, ClientResult, HttpClient, SalesApi};
use sales_dashboard::{Dashboard, StatsScope};
use serde::de::DeserializeOwned;

const PAGE: &str = r#"{
    "data": [
        {
            "_id": "65a1b2c3d4e5f6a7b8c9d0e1",
            "customer_id": "CUST_0007",
            "customer_name": "Priya Nair",
            "phone_number": "9810000259",
            "gender": "Female",
            "age": 34,
            "region": "East",
            "product_id": "PROD_004",
            "product_name": "Serum",
            "category": "Beauty",
            "tags": ["beauty"],
            "quantity": 2,
            "total_amount": 251.5,
            "date": "2024-03-01T12:30:00",
            "payment_method": "UPI",
            "order_status": "Completed"
        },
        {
            "_id": "65a1b2c3d4e5f6a7b8c9d0e2",
            "customer_id": "CUST_0008",
            "customer_name": "John Mills",
            "phone_number": "9810000296",
            "gender": "Male",
            "age": 51,
            "region": "West",
            "product_id": "PROD_001",
            "product_name": "Headphones",
            "category": "Electronics",
            "tags": [],
            "quantity": 1,
            "total_amount": 120.0,
            "date": "2024-03-02T08:15:30.482000",
            "payment_method": "Cash",
            "order_status": "Completed"
        }
    ],
    "total": 2,
    "page": 1,
    "pages": 1
}"#;

const STATS: &str = r#"{"total_revenue": 371.5, "total_orders": 2, "avg_order_value": 185.75}"#;

/// Serves fixed bodies in the shape the store writes them
#[derive(Clone)]
struct StoreBodies;

#[async_trait]
impl HttpClient for StoreBodies {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = if path.starts_with("sales/stats") { STATS } else { PAGE };
        Ok(serde_json::from_str(body)?)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        _path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        Err(ClientError::Internal("not scripted".to_string()))
    }
}

#[tokio::test]
async fn test_offsetless_dates_are_read_as_utc() {
    let dashboard = Dashboard::new(SalesApi::new(StoreBodies), StatsScope::Filtered);
    dashboard.start().await;

    let snap = dashboard.snapshot().await;
    assert!(snap.list_error.is_none());
    assert_eq!(snap.sales.len(), 2);
    assert_eq!(
        snap.sales[0].date,
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    );
    assert_eq!(snap.sales[1].date.timestamp_subsec_millis(), 482);
    assert_eq!(snap.query.pagination().total, 2);
    assert_eq!(snap.stats.total_orders, 2);
}
