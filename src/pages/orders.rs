use super::{money, options};
use crate::domain::{Order, OrderStats, OrderStatus, PaymentStatus};
use crate::ui::{Column, FilterBar, FilterField, Form, FormField, Modal, Table};

pub fn order_filters() -> FilterBar {
    FilterBar::new(vec![
        FilterField::select_values("status", "Status", &options(OrderStatus::ALL, OrderStatus::as_str)),
        FilterField::select_values("paymentStatus", "Payment", &options(PaymentStatus::ALL, PaymentStatus::as_str)),
        FilterField::date("startDate", "From"),
        FilterField::date("endDate", "To"),
        FilterField::text("search", "Search"),
    ])
}

pub fn order_table() -> Table<Order> {
    Table::new(
        vec![
            Column::custom("orderNumber", "Order", |o: &Order| o.reference().to_string()),
            Column::custom("customer", "Customer", |o: &Order| o.customer_name().to_string()),
            Column::custom("items", "Items", |o: &Order| o.item_count().to_string()),
            Column::custom("totalAmount", "Total", |o: &Order| money(o.total_amount)),
            Column::field("status", "Status"),
            Column::field("paymentStatus", "Payment"),
            Column::field("createdAt", "Placed"),
        ],
        |o| o.id.clone(),
    )
    .with_detail(order_detail)
    .with_empty_text("No orders found")
}

/// Full order view: customer, shipping address and line items.
pub fn order_detail(order: &Order) -> String {
    let mut lines = vec![format!("Order {} ({})", order.reference(), order.status)];
    if let Some(customer) = &order.customer_info {
        let contact = [customer.email.as_deref(), customer.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Customer: {} {}", order.customer_name(), contact).trim_end().to_string());
    }
    if let Some(address) = &order.shipping_address {
        lines.push(format!("Ship to: {}", address.one_line()));
    }
    for item in &order.items {
        lines.push(format!(
            "- {} x{} @ {}",
            item.name.as_deref().or(item.product_id.as_deref()).unwrap_or("item"),
            item.quantity,
            money(item.price)
        ));
    }
    lines.push(format!("Total: {}", money(order.total_amount)));
    lines.join("\n")
}

pub fn order_stats_summary(stats: &OrderStats) -> String {
    let mut lines = vec![
        format!("Orders: {}", stats.total_orders),
        format!("Revenue: {}", money(stats.total_revenue)),
    ];
    lines.extend(stats.by_status.iter().map(|(status, count)| format!("{status}: {count}")));
    lines.join("\n")
}

pub fn status_modal() -> Modal {
    Modal::new(
        "Update order status",
        Form::new(vec![
            FormField::select("status", "Status", &options(OrderStatus::ALL, OrderStatus::as_str)).required(),
            FormField::textarea("note", "Note"),
        ]),
    )
}

pub fn cancel_modal() -> Modal {
    Modal::new("Cancel order", Form::new(vec![FormField::textarea("reason", "Reason")]))
}
