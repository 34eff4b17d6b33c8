use serde::{Deserialize, Serialize};

use super::AdminRef;

/// The platform-wide tax configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub tax_rate: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub history: Vec<TaxHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxHistoryEntry {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub tax_rate: f64,
    #[serde(default)]
    pub previous_rate: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub changed_by: Option<AdminRef>,
    #[serde(default, alias = "createdAt")]
    pub changed_at: Option<String>,
}

/// Body of `PUT /api/admin/tax`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxUpdate {
    pub tax_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaxUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if !self.tax_rate.is_finite() || !(0.0..=100.0).contains(&self.tax_rate) {
            return Err("taxRate must be between 0 and 100".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tax_with_history() {
        let tax: TaxConfig = serde_json::from_str(
            r#"{"taxRate":7.5,"isActive":true,"history":[
                {"taxRate":7.5,"previousRate":5,"changedBy":"adm_1","createdAt":"2024-01-02T00:00:00Z"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(tax.tax_rate, 7.5);
        assert_eq!(tax.history.len(), 1);
        assert_eq!(tax.history[0].previous_rate, Some(5.0));
        assert_eq!(tax.history[0].changed_at.as_deref(), Some("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn rate_must_be_a_percentage() {
        assert!(TaxUpdate { tax_rate: 7.5, description: None }.validate().is_ok());
        assert!(TaxUpdate { tax_rate: -1.0, description: None }.validate().is_err());
        assert!(TaxUpdate { tax_rate: 101.0, description: None }.validate().is_err());
    }
}
