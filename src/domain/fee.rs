use serde::{Deserialize, Serialize};

use super::AdminRef;

wire_enum! {
    /// Scope at which a platform fee applies.
    FeeLevel {
        Global => "GLOBAL" | "global",
        Vendor => "VENDOR" | "vendor",
        Product => "PRODUCT" | "product",
    }
}

wire_enum! {
    FeeType {
        Fixed => "FIXED" | "fixed",
        Percentage => "PERCENTAGE" | "percentage",
    }
}

/// A platform fee configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    #[serde(alias = "_id")]
    pub id: String,
    pub level: FeeLevel,
    pub fee_type: FeeType,
    pub fee_value: f64,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_by_admin: Option<AdminRef>,
    #[serde(default)]
    pub updated_by_admin: Option<AdminRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl FeeConfig {
    /// `"5.00%"` for percentage fees, `"150.00"` for fixed ones.
    pub fn display_value(&self) -> String {
        format_fee_value(self.fee_type, self.fee_value)
    }

    /// What the fee is attached to: the vendor or product id, or `GLOBAL`.
    pub fn target(&self) -> &str {
        match self.level {
            FeeLevel::Vendor => self.vendor_id.as_deref().unwrap_or("-"),
            FeeLevel::Product => self.product_id.as_deref().unwrap_or("-"),
            _ => "GLOBAL",
        }
    }
}

pub fn format_fee_value(fee_type: FeeType, value: f64) -> String {
    match fee_type {
        FeeType::Percentage => format!("{value:.2}%"),
        _ => format!("{value:.2}"),
    }
}

/// Payload for creating a fee configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCreate {
    pub level: FeeLevel,
    pub fee_type: FeeType,
    pub fee_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FeeCreate {
    /// Client-side checks mirroring what the form enforces before submit.
    pub fn validate(&self) -> Result<(), String> {
        validate_fee_value(self.fee_type, self.fee_value)?;
        match self.level {
            FeeLevel::Vendor if is_blank(&self.vendor_id) => {
                Err("vendorId is required for VENDOR level fees".to_string())
            }
            FeeLevel::Product if is_blank(&self.product_id) => {
                Err("productId is required for PRODUCT level fees".to_string())
            }
            FeeLevel::Unknown => Err("fee level is required".to_string()),
            _ => Ok(()),
        }
    }
}

/// Partial update of a fee configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_type: Option<FeeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn validate_fee_value(fee_type: FeeType, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err("feeValue must be a non-negative number".to_string());
    }
    if fee_type == FeeType::Percentage && value > 100.0 {
        return Err("percentage fees cannot exceed 100".to_string());
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
