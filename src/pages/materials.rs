use super::options;
use crate::domain::{Material, WeightCategory};
use crate::ui::{Column, FilterBar, FilterField, Form, FormField, Modal, Table};

pub fn material_filters() -> FilterBar {
    FilterBar::new(vec![
        FilterField::select_values(
            "weightCategory",
            "Weight",
            &options(WeightCategory::ALL, WeightCategory::as_str),
        ),
        FilterField::select("isActive", "Status", &[("true", "Active"), ("false", "Inactive")]),
        FilterField::text("search", "Search"),
    ])
}

pub fn material_table() -> Table<Material> {
    Table::new(
        vec![
            Column::field("name", "Name"),
            Column::field("weightCategory", "Weight"),
            Column::custom("weightPerYard", "kg/yd", |m: &Material| format!("{:.2}", m.weight_per_yard)),
            Column::custom("heightPerYard", "Height/yd", |m: &Material| {
                m.height_per_yard.map(|h| format!("{h:.2}")).unwrap_or_else(|| "-".to_string())
            }),
            Column::field("isActive", "Active"),
        ],
        |m| m.id.clone(),
    )
    .with_detail(|m: &Material| m.description.clone().unwrap_or_else(|| "No description".to_string()))
    .with_empty_text("No materials found")
}

fn material_form() -> Form {
    Form::new(vec![
        FormField::text("name", "Name").required(),
        FormField::number("weightPerYard", "Weight per yard").required(),
        FormField::number("heightPerYard", "Height per yard"),
        FormField::select("weightCategory", "Weight category", &options(WeightCategory::ALL, WeightCategory::as_str))
            .required(),
        FormField::textarea("description", "Description"),
        FormField::checkbox("isActive", "Active").initially("true"),
    ])
}

/// Create dialog. Decodes into [`MaterialCreate`](crate::domain::MaterialCreate).
pub fn create_material_modal() -> Modal {
    Modal::new("New material", material_form())
}

/// Edit dialog. Decodes into [`MaterialPatch`](crate::domain::MaterialPatch).
pub fn edit_material_modal(material: &Material) -> Modal {
    let mut form = material_form();
    if let Ok(record) = serde_json::to_value(material) {
        form.fill_from(&record);
    }
    Modal::new("Edit material", form)
}
