use super::options;
use crate::domain::{AdminRef, FeeConfig, FeeLevel, FeeType};
use crate::ui::{Column, FilterBar, FilterField, Form, FormField, Modal, Table};

pub fn fee_filters() -> FilterBar {
    FilterBar::new(vec![
        FilterField::select_values("level", "Level", &options(FeeLevel::ALL, FeeLevel::as_str)),
        FilterField::select_values("feeType", "Type", &options(FeeType::ALL, FeeType::as_str)),
        FilterField::select("isActive", "Status", &[("true", "Active"), ("false", "Inactive")]),
    ])
}

pub fn fee_table() -> Table<FeeConfig> {
    Table::new(
        vec![
            Column::field("level", "Level"),
            Column::custom("target", "Applies to", |f: &FeeConfig| f.target().to_string()),
            Column::field("feeType", "Type"),
            Column::custom("feeValue", "Value", FeeConfig::display_value),
            Column::field("isActive", "Active"),
            Column::field("description", "Description"),
        ],
        |f| f.id.clone(),
    )
    .with_detail(|f: &FeeConfig| {
        let by = |admin: &Option<AdminRef>| {
            admin.as_ref().map(|a| a.display_name()).unwrap_or_else(|| "-".to_string())
        };
        format!(
            "Created by {} on {}\nUpdated by {} on {}",
            by(&f.created_by_admin),
            f.created_at.as_deref().unwrap_or("-"),
            by(&f.updated_by_admin),
            f.updated_at.as_deref().unwrap_or("-"),
        )
    })
    .with_empty_text("No fees configured")
}

/// Create dialog. Decodes into [`FeeCreate`](crate::domain::FeeCreate).
pub fn create_fee_modal() -> Modal {
    Modal::new(
        "New fee",
        Form::new(vec![
            FormField::select("level", "Level", &options(FeeLevel::ALL, FeeLevel::as_str)).required(),
            FormField::select("feeType", "Type", &options(FeeType::ALL, FeeType::as_str)).required(),
            FormField::number("feeValue", "Value").required(),
            FormField::text("vendorId", "Vendor id"),
            FormField::text("productId", "Product id"),
            FormField::textarea("description", "Description"),
            FormField::checkbox("isActive", "Active").initially("true"),
        ]),
    )
}

/// Edit dialog. Decodes into [`FeePatch`](crate::domain::FeePatch).
pub fn edit_fee_modal(fee: &FeeConfig) -> Modal {
    let mut form = Form::new(vec![
        FormField::select("feeType", "Type", &options(FeeType::ALL, FeeType::as_str)),
        FormField::number("feeValue", "Value"),
        FormField::textarea("description", "Description"),
        FormField::checkbox("isActive", "Active"),
    ]);
    if let Ok(record) = serde_json::to_value(fee) {
        form.fill_from(&record);
    }
    Modal::new("Edit fee", form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeCreate, FeePatch};
    use serde_json::json;

    fn fee() -> FeeConfig {
        serde_json::from_value(json!({
            "_id": "f1", "level": "VENDOR", "feeType": "PERCENTAGE", "feeValue": 5, "vendorId": "v1",
            "isActive": true, "createdByAdmin": {"firstName": "Kemi", "lastName": "Ade"}
        }))
        .unwrap()
    }

    #[test]
    fn rows_show_target_and_formatted_value() {
        let rows = fee_table().rows(&[fee()]);
        assert_eq!(rows[0][..5], ["VENDOR", "v1", "PERCENTAGE", "5.00%", "Yes"]);
    }

    #[test]
    fn create_form_decodes_into_payload() {
        let mut modal = create_fee_modal();
        modal.form.set("level", "PRODUCT").unwrap();
        modal.form.set("feeType", "FIXED").unwrap();
        modal.form.set("feeValue", "150").unwrap();
        modal.form.set("productId", "p7").unwrap();

        let payload: FeeCreate = modal.form.payload().unwrap();
        assert_eq!(payload.level, FeeLevel::Product);
        assert_eq!(payload.fee_value, 150.0);
        assert_eq!(payload.product_id.as_deref(), Some("p7"));
        assert_eq!(payload.is_active, Some(true));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn edit_form_is_prefilled() {
        let modal = edit_fee_modal(&fee());
        assert_eq!(modal.form.value("feeValue"), Some("5.0"));
        let patch: FeePatch = modal.form.payload().unwrap();
        assert_eq!(patch.fee_value, Some(5.0));
        assert_eq!(patch.is_active, Some(true));
    }
}
