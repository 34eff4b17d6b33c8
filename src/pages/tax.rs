use crate::domain::{TaxConfig, TaxHistoryEntry};
use crate::ui::{Column, Form, FormField, Modal, Table};

pub fn tax_summary(tax: &TaxConfig) -> String {
    let state = if tax.is_active { "active" } else { "inactive" };
    let mut summary = format!("Tax rate: {:.2}% ({state})", tax.tax_rate);
    if let Some(description) = tax.description.as_deref().filter(|d| !d.trim().is_empty()) {
        summary.push_str(&format!("\n{description}"));
    }
    if let Some(updated) = &tax.updated_at {
        summary.push_str(&format!("\nLast updated {updated}"));
    }
    summary
}

pub fn history_table() -> Table<TaxHistoryEntry> {
    Table::new(
        vec![
            Column::custom("previousRate", "From", |h: &TaxHistoryEntry| {
                h.previous_rate.map(|r| format!("{r:.2}%")).unwrap_or_else(|| "-".to_string())
            }),
            Column::custom("taxRate", "To", |h: &TaxHistoryEntry| format!("{:.2}%", h.tax_rate)),
            Column::custom("changedBy", "Changed by", |h: &TaxHistoryEntry| {
                h.changed_by.as_ref().map(|a| a.display_name()).unwrap_or_else(|| "-".to_string())
            }),
            Column::field("changedAt", "When"),
            Column::field("description", "Note"),
        ],
        |h| h.id.clone().unwrap_or_else(|| h.changed_at.clone().unwrap_or_default()),
    )
    .with_empty_text("No tax changes yet")
}

/// Decodes into [`TaxUpdate`](crate::domain::TaxUpdate).
pub fn update_tax_modal(current: Option<&TaxConfig>) -> Modal {
    let mut form = Form::new(vec![
        FormField::number("taxRate", "Tax rate (%)").required(),
        FormField::textarea("description", "Description"),
    ]);
    if let Some(record) = current.and_then(|tax| serde_json::to_value(tax).ok()) {
        form.fill_from(&record);
    }
    Modal::new("Update tax rate", form)
}
