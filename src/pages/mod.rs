//! Per-resource page definitions: which columns, filters and forms each
//! admin page shows, plus the layout every list page shares.

pub mod fees;
pub mod materials;
pub mod orders;
pub mod tax;
pub mod users;
pub mod vendors;

use serde::Serialize;

use crate::controller::{ListState, LoadState};
use crate::ui::{error_banner, FilterBar, PaginationView, Table};

/// Wire values of a backend enum, for select options.
pub(crate) fn options<E>(all: &'static [E], as_str: fn(&E) -> &'static str) -> Vec<&'static str> {
    all.iter().map(as_str).collect()
}

pub(crate) fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Title, filters, error banners, the table and the pager, top to bottom.
pub fn render_list_page<T: Serialize>(title: &str, filters: &FilterBar, table: &Table<T>, state: &ListState<T>) -> String {
    let mut sections = vec![format!("# {title}"), filters.render()];
    sections.extend(error_banner(state.error.as_deref()));
    sections.extend(error_banner(state.action_error.as_deref()));
    match state.load {
        LoadState::Idle | LoadState::Loading if state.items.is_empty() => sections.push("Loading...".to_string()),
        _ => sections.push(table.render(&state.items)),
    }
    sections.push(PaginationView::from(&state.pagination).render());
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeConfig, Pagination};
    use crate::http::Filters;

    #[test]
    fn list_page_shows_banner_and_table() {
        let fee: FeeConfig = serde_json::from_value(serde_json::json!({
            "_id": "f1", "level": "GLOBAL", "feeType": "FIXED", "feeValue": 150, "isActive": true
        }))
        .unwrap();
        let state = ListState {
            items: vec![fee],
            filters: Filters::new(),
            pagination: Pagination::default(),
            load: LoadState::Error,
            error: Some("Request failed with status 502".into()),
            action_error: None,
            generation: 2,
        };

        let page = render_list_page("Fees", &fees::fee_filters(), &fees::fee_table(), &state);
        assert!(page.starts_with("# Fees"));
        assert!(page.contains("! Request failed with status 502"));
        assert!(page.contains("150.00"));
        assert!(page.ends_with("( Prev ) Page 1 of 1 ( Next )"));
    }
}
