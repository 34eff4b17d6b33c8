use super::options;
use crate::domain::{Vendor, VendorStatus};
use crate::ui::{Column, FilterBar, FilterField, Form, FormField, Modal, Table};

pub fn vendor_filters() -> FilterBar {
    FilterBar::new(vec![
        FilterField::select_values("status", "Status", &options(VendorStatus::ALL, VendorStatus::as_str)),
        FilterField::text("search", "Search"),
    ])
}

pub fn vendor_table() -> Table<Vendor> {
    Table::new(
        vec![
            Column::custom("storeName", "Store", |v: &Vendor| v.display_name().to_string()),
            Column::field("email", "Email"),
            Column::field("phone", "Phone"),
            Column::field("status", "Status"),
            Column::custom("reliability", "Reliability", Vendor::reliability_label),
            Column::field("createdAt", "Joined"),
        ],
        |v| v.id.clone(),
    )
    .with_detail(vendor_detail)
    .with_empty_text("No vendors found")
}

fn vendor_detail(vendor: &Vendor) -> String {
    let mut lines = Vec::new();
    if let Some(address) = &vendor.pickup_address {
        lines.push(format!("Pickup: {}", address.one_line()));
    }
    if let Some(metrics) = &vendor.metrics {
        let count = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "Fulfilled: {}  Cancelled: {}",
            count(metrics.fulfilled_orders),
            count(metrics.cancelled_orders)
        ));
        if let Some(rate) = metrics.on_time_rate {
            lines.push(format!("On time: {:.0}%", rate * 100.0));
        }
    }
    if lines.is_empty() {
        lines.push("No details".to_string());
    }
    lines.join("\n")
}

/// Approve, suspend or deactivate. Decodes into `{status, reason}`.
pub fn status_modal() -> Modal {
    Modal::new(
        "Change vendor status",
        Form::new(vec![
            FormField::select("status", "Status", &options(VendorStatus::ALL, VendorStatus::as_str)).required(),
            FormField::textarea("reason", "Reason"),
        ]),
    )
}
