//! Aggregate statistics and prediction models

use serde::{Deserialize, Serialize};

/// Server-computed summary over the (optionally filtered) sales
///
/// `Default` is the all-zero value used when the fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub avg_order_value: f64,
}

/// Revenue forecast for a quantity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub predicted_total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_is_zero() {
        let stats = SalesStats::default();
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.avg_order_value, 0.0);
    }

    #[test]
    fn test_prediction_without_quantity() {
        let p: Prediction = serde_json::from_str(r#"{"predicted_total_revenue": 512.25}"#).unwrap();
        assert_eq!(p.quantity, None);
        assert_eq!(p.predicted_total_revenue, 512.25);
    }
}
