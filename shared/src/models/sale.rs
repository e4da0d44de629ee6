//! Sale Model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sale transaction record
///
/// The same shape is returned by `GET /sales` and submitted to `POST /sales`.
/// The store assigns `_id`; submissions may leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: u32,
    pub region: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub quantity: u32,
    pub total_amount: f64,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    pub payment_method: String,
    pub order_status: String,
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC
///
/// The store writes timestamps without an offset.
fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl Sale {
    /// New-sale template with the defaults of the "Add Sale" form
    pub fn template(date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            customer_id: "CUST_NEW".to_string(),
            customer_name: String::new(),
            phone_number: String::new(),
            gender: "Male".to_string(),
            age: 25,
            region: "North".to_string(),
            product_id: "PROD_NEW".to_string(),
            product_name: String::new(),
            category: "Electronics".to_string(),
            tags: vec!["New".to_string()],
            quantity: 1,
            total_amount: 0.0,
            date,
            payment_method: "Credit Card".to_string(),
            order_status: "Completed".to_string(),
        }
    }

    /// Short transaction id for table rows: `#` + last six chars, upper-cased
    ///
    /// Returns `None` for records the store has not assigned an id yet.
    pub fn display_id(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        let chars: Vec<char> = id.chars().collect();
        let start = chars.len().saturating_sub(6);
        let tail: String = chars[start..].iter().collect();
        Some(format!("#{}", tail.to_uppercase()))
    }

    /// Returns true if every client-supplied field matches `other`
    ///
    /// Identifiers are ignored; timestamps compare to the second because the
    /// store may truncate sub-second precision.
    pub fn same_fields(&self, other: &Sale) -> bool {
        self.customer_id == other.customer_id
            && self.customer_name == other.customer_name
            && self.phone_number == other.phone_number
            && self.gender == other.gender
            && self.age == other.age
            && self.region == other.region
            && self.product_id == other.product_id
            && self.product_name == other.product_name
            && self.category == other.category
            && self.tags == other.tags
            && self.quantity == other.quantity
            && (self.total_amount - other.total_amount).abs() < f64::EPSILON
            && self.date.timestamp() == other.date.timestamp()
            && self.payment_method == other.payment_method
            && self.order_status == other.order_status
    }
}
