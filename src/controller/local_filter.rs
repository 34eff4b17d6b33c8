use crate::domain::{FeeConfig, Material, Order, TaxHistoryEntry, User, Vendor};

/// Text fields a row offers to the in-page search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring search over an already loaded page.
///
/// A blank needle keeps every item. The server is not consulted, so this
/// only narrows what the current page shows.
pub fn filter_local<'a, T: Searchable>(items: &'a [T], needle: &str) -> Vec<&'a T> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.reference(), self.customer_name()];
        if let Some(email) = self.customer_info.as_ref().and_then(|c| c.email.as_deref()) {
            fields.push(email);
        }
        fields
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        [self.store_name.as_deref(), self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        [
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Searchable for Material {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.weight_category.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Searchable for FeeConfig {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.level.as_str(), self.fee_type.as_str(), self.target()];
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Searchable for TaxHistoryEntry {
    fn search_fields(&self) -> Vec<&str> {
        [self.description.as_deref(), self.changed_at.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(id: &str, store: &str, email: &str) -> Vendor {
        serde_json::from_value(serde_json::json!({
            "_id": id, "storeName": store, "email": email, "status": "APPROVED"
        }))
        .unwrap()
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let vendors = vec![
            vendor("v1", "Adire House", "hello@adire.test"),
            vendor("v2", "Kente Co", "sales@kente.test"),
        ];
        let hits = filter_local(&vendors, "KENTE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "v2");

        assert_eq!(filter_local(&vendors, "@adire").len(), 1);
        assert!(filter_local(&vendors, "batik").is_empty());
    }

    #[test]
    fn blank_needle_keeps_everything() {
        let vendors = vec![vendor("v1", "Adire House", "a@b.test")];
        assert_eq!(filter_local(&vendors, "   ").len(), 1);
    }
}
