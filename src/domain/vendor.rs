use serde::{Deserialize, Serialize};

use super::Address;

wire_enum! {
    VendorStatus {
        Pending => "PENDING" | "pending",
        Approved => "APPROVED" | "approved",
        Suspended => "SUSPENDED" | "suspended",
        Deactivated => "DEACTIVATED" | "deactivated",
    }
}

/// A vendor's store profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: VendorStatus,
    #[serde(default)]
    pub pickup_address: Option<Address>,
    #[serde(default, alias = "reliability")]
    pub metrics: Option<VendorMetrics>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reliability metrics the backend computes per vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetrics {
    #[serde(default)]
    pub reliability_score: Option<f64>,
    #[serde(default)]
    pub fulfilled_orders: Option<u64>,
    #[serde(default)]
    pub cancelled_orders: Option<u64>,
    #[serde(default)]
    pub on_time_rate: Option<f64>,
}

impl Vendor {
    pub fn display_name(&self) -> &str {
        self.store_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    pub fn reliability_label(&self) -> String {
        match self.metrics.as_ref().and_then(|m| m.reliability_score) {
            Some(score) => format!("{score:.1}"),
            None => "-".to_string(),
        }
    }
}

/// Body of `PUT /api/admin/vendors/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorStatusUpdate {
    pub status: VendorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_vendor_with_reliability_alias() {
        let vendor: Vendor = serde_json::from_str(
            r#"{"_id":"v1","storeName":"Adire House","status":"approved",
                "pickupAddress":{"city":"Abeokuta"},"reliability":{"reliabilityScore":4.26}}"#,
        )
        .unwrap();
        assert_eq!(vendor.status, VendorStatus::Approved);
        assert_eq!(vendor.display_name(), "Adire House");
        assert_eq!(vendor.reliability_label(), "4.3");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let vendor: Vendor = serde_json::from_str(r#"{"id":"v2","status":"PENDING"}"#).unwrap();
        assert_eq!(vendor.display_name(), "v2");
        assert_eq!(vendor.reliability_label(), "-");
    }
}
