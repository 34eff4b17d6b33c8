use crate::domain::Pagination;

/// Pager under a list. Button state comes straight from the server's
/// `hasNextPage`/`hasPrevPage`; nothing is computed from item counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub total_items: Option<u64>,
}

impl From<&Pagination> for PaginationView {
    fn from(p: &Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            prev_disabled: !p.has_prev_page,
            next_disabled: !p.has_next_page,
            total_items: p.total_items,
        }
    }
}

impl PaginationView {
    /// Page a click on next (`forward`) or previous would load, if enabled.
    pub fn target_page(&self, forward: bool) -> Option<u32> {
        match forward {
            true if !self.next_disabled => Some(self.current_page.saturating_add(1)),
            false if !self.prev_disabled => Some(self.current_page.saturating_sub(1).max(1)),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        let prev = if self.prev_disabled { "( Prev )" } else { "[< Prev]" };
        let next = if self.next_disabled { "( Next )" } else { "[Next >]" };
        let total = self.total_items.map(|n| format!(" ({n} total)")).unwrap_or_default();
        format!("{prev} Page {} of {}{total} {next}", self.current_page, self.total_pages)
    }
}
