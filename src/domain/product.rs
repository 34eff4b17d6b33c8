use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A catalogue product, as listed to admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Older records only carry this field.
    #[serde(default)]
    pub date_created: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            vendor_id: None,
            created_at: None,
            date_created: None,
        }
    }

    /// Creation time in epoch milliseconds.
    ///
    /// Uses `createdAt`, falling back to `dateCreated` when `createdAt` is
    /// missing or blank. Neither field, or an unparseable one, counts as epoch 0.
    pub fn created_millis(&self) -> i64 {
        [&self.created_at, &self.date_created]
            .into_iter()
            .flatten()
            .map(|raw| raw.trim())
            .find(|raw| !raw.is_empty())
            .and_then(parse_timestamp)
            .unwrap_or(0)
    }
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Newest first. Stable, so products with equal timestamps keep their order.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by_key(|product| std::cmp::Reverse(product.created_millis()));
}
