use serde::{Deserialize, Serialize};

wire_enum! {
    /// Fabric weight band used for shipping estimates.
    WeightCategory {
        Light => "LIGHT" | "light",
        Medium => "MEDIUM" | "medium",
        Heavy => "HEAVY" | "heavy",
        ExtraHeavy => "EXTRA_HEAVY" | "extra_heavy",
    }
}

/// A fabric material offered to vendors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weight_per_yard: f64,
    #[serde(default)]
    pub height_per_yard: Option<f64>,
    pub weight_category: WeightCategory,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCreate {
    pub name: String,
    pub weight_per_yard: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_per_yard: Option<f64>,
    pub weight_category: WeightCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MaterialCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if !(self.weight_per_yard.is_finite() && self.weight_per_yard > 0.0) {
            return Err("weightPerYard must be greater than zero".to_string());
        }
        if matches!(self.height_per_yard, Some(h) if !(h.is_finite() && h > 0.0)) {
            return Err("heightPerYard must be greater than zero".to_string());
        }
        if self.weight_category == WeightCategory::Unknown {
            return Err("weightCategory is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_per_yard: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_per_yard: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_category: Option<WeightCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_material() {
        let material: Material = serde_json::from_str(
            r#"{"_id":"m1","name":"Aso Oke","weightPerYard":0.45,"heightPerYard":0.9,
                "weightCategory":"HEAVY","isActive":true}"#,
        )
        .unwrap();
        assert_eq!(material.weight_category, WeightCategory::Heavy);
        assert_eq!(material.height_per_yard, Some(0.9));
    }

    #[test]
    fn create_requires_name_and_positive_weight() {
        let mut create = MaterialCreate {
            name: "Chiffon".into(),
            weight_per_yard: 0.1,
            height_per_yard: None,
            weight_category: WeightCategory::Light,
            description: None,
            is_active: None,
        };
        assert!(create.validate().is_ok());

        create.weight_per_yard = 0.0;
        assert!(create.validate().is_err());

        create.weight_per_yard = 0.1;
        create.name = " ".into();
        assert!(create.validate().is_err());
    }
}
