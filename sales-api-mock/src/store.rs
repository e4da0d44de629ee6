//! In-memory sales store
//!
//! Filtering, sorting, paging and aggregation over a `Vec<Sale>`, matching
//! what the real sales API answers for the same parameters.

use std::cmp::Ordering;

use chrono::{Duration, TimeZone, Utc};
use shared::{FacetSelections, Sale, SalesPage, SalesStats, SortField, SortOrder};

/// Search text and facet restrictions
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub search: Option<String>,
    pub facets: FacetSelections,
}

impl Filter {
    /// Case-insensitive substring match on customer name or phone number,
    /// then set membership per non-empty facet
    pub fn matches(&self, sale: &Sale) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !sale.customer_name.to_lowercase().contains(&needle)
                && !sale.phone_number.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if self.facets.is_unrestricted() {
            return true;
        }

        let in_facet = |set: &std::collections::BTreeSet<String>, value: &str| {
            set.is_empty() || set.contains(value)
        };

        in_facet(&self.facets.region, &sale.region)
            && in_facet(&self.facets.gender, &sale.gender)
            && in_facet(&self.facets.category, &sale.category)
    }
}

fn compare(a: &Sale, b: &Sale, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::TotalAmount => a
            .total_amount
            .partial_cmp(&b.total_amount)
            .unwrap_or(Ordering::Equal),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One page of the filtered, sorted records
pub fn list(
    sales: &[Sale],
    filter: &Filter,
    sort_by: SortField,
    sort_order: SortOrder,
    page: u32,
    limit: u32,
) -> SalesPage {
    let mut matched: Vec<&Sale> = sales.iter().filter(|s| filter.matches(s)).collect();
    matched.sort_by(|a, b| {
        let ord = compare(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    let total = matched.len() as u64;
    let skip = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    let data = matched
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .cloned()
        .collect();

    SalesPage::new(data, total, page, limit)
}

/// Revenue, order count and average order value, rounded to cents
pub fn stats(sales: &[Sale], filter: &Filter) -> SalesStats {
    let amounts: Vec<f64> = sales
        .iter()
        .filter(|s| filter.matches(s))
        .map(|s| s.total_amount)
        .collect();

    if amounts.is_empty() {
        return SalesStats::default();
    }

    let total: f64 = amounts.iter().sum();
    SalesStats {
        total_revenue: round2(total),
        total_orders: amounts.len() as u64,
        avg_order_value: round2(total / amounts.len() as f64),
    }
}

/// Least-squares fit of `total_amount` on `quantity`
///
/// Falls back to 100 per unit while the data cannot support a fit (fewer
/// than two distinct quantities).
pub fn predict(sales: &[Sale], quantity: u32) -> f64 {
    let n = sales.len() as f64;
    let mean_x = sales.iter().map(|s| s.quantity as f64).sum::<f64>() / n;
    let mean_y = sales.iter().map(|s| s.total_amount).sum::<f64>() / n;

    let sxx: f64 = sales
        .iter()
        .map(|s| (s.quantity as f64 - mean_x).powi(2))
        .sum();
    if sales.len() < 2 || sxx == 0.0 {
        return quantity as f64 * 100.0;
    }

    let sxy: f64 = sales
        .iter()
        .map(|s| (s.quantity as f64 - mean_x) * (s.total_amount - mean_y))
        .sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    round2(intercept + slope * quantity as f64)
}

/// Deterministic sample data set for demos and tests
pub fn sample_sales(count: usize) -> Vec<Sale> {
    const NAMES: [&str; 8] = [
        "John Carter",
        "Priya Nair",
        "Liam O'Brien",
        "Sofia Rossi",
        "Kenji Watanabe",
        "Amara Okafor",
        "John Mills",
        "Elena Petrova",
    ];
    const PRODUCTS: [(&str, &str); 4] = [
        ("Electronics", "Headphones"),
        ("Clothing", "Jacket"),
        ("Home", "Lamp"),
        ("Beauty", "Serum"),
    ];
    const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
    const PAYMENTS: [&str; 3] = ["Credit Card", "Cash", "UPI"];

    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default();

    (0..count)
        .map(|i| {
            let (category, product) = PRODUCTS[i % PRODUCTS.len()];
            let quantity = (i % 5) as u32 + 1;
            Sale {
                id: Some(format!("{:024x}", 0x65a0_0000_u64 + i as u64)),
                customer_id: format!("CUST_{:04}", i % 50),
                customer_name: NAMES[i % NAMES.len()].to_string(),
                phone_number: format!("98{:08}", 10_000 + i * 37),
                gender: if i % 2 == 0 { "Male" } else { "Female" }.to_string(),
                age: 18 + (i % 47) as u32,
                region: REGIONS[(i / 2) % REGIONS.len()].to_string(),
                product_id: format!("PROD_{:03}", i % 20),
                product_name: product.to_string(),
                category: category.to_string(),
                tags: vec![category.to_lowercase()],
                quantity,
                total_amount: quantity as f64 * 120.0 + (i % 7) as f64 * 5.5,
                date: start + Duration::hours(i as i64 * 7),
                payment_method: PAYMENTS[i % PAYMENTS.len()].to_string(),
                order_status: "Completed".to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Facet;

    #[test]
    fn test_list_pages_and_totals() {
        let sales = sample_sales(25);
        let page = list(&sales, &Filter::default(), SortField::Date, SortOrder::Asc, 3, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].id, sales[20].id);
    }

    #[test]
    fn test_list_sort_desc() {
        let sales = sample_sales(12);
        let page = list(&sales, &Filter::default(), SortField::Date, SortOrder::Desc, 1, 10);
        assert_eq!(page.data[0].id, sales[11].id);
    }

    #[test]
    fn test_filter_search_and_facets() {
        let sales = sample_sales(40);
        let mut filter = Filter {
            search: Some("john".to_string()),
            ..Default::default()
        };
        assert!(
            sales
                .iter()
                .filter(|s| filter.matches(s))
                .all(|s| s.customer_name.contains("John"))
        );

        filter.facets.toggle(Facet::Region, "North");
        let matched: Vec<_> = sales.iter().filter(|s| filter.matches(s)).collect();
        assert!(matched.iter().all(|s| s.region == "North"));
    }

    #[test]
    fn test_empty_facet_is_unrestricted() {
        let sales = sample_sales(16);
        let page = list(&sales, &Filter::default(), SortField::Date, SortOrder::Asc, 1, 100);
        assert_eq!(page.total, 16);
    }

    #[test]
    fn test_stats_rounding_and_empty() {
        let sales = sample_sales(3);
        let s = stats(&sales, &Filter::default());
        assert_eq!(s.total_orders, 3);
        assert_eq!(s.total_revenue, 120.0 + 245.5 + 371.0);

        assert_eq!(stats(&[], &Filter::default()), SalesStats::default());
    }

    #[test]
    fn test_predict_fallback_and_fit() {
        assert_eq!(predict(&[], 4), 400.0);

        let mut sales = sample_sales(2);
        sales[0].quantity = 1;
        sales[0].total_amount = 100.0;
        sales[1].quantity = 3;
        sales[1].total_amount = 300.0;
        assert_eq!(predict(&sales, 5), 500.0);
    }
}
