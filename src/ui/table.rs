use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

pub type RenderFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// One table column.
///
/// A field column reads the item's serialized key (e.g. `storeName`); a
/// custom column formats the whole item itself.
pub struct Column<T> {
    pub key: String,
    pub header: String,
    render: Option<RenderFn<T>>,
}

impl<T: Serialize> Column<T> {
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self { key: key.into(), header: header.into(), render: None }
    }

    pub fn custom(
        key: impl Into<String>,
        header: impl Into<String>,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { key: key.into(), header: header.into(), render: Some(Box::new(render)) }
    }

    pub fn cell(&self, item: &T) -> String {
        match &self.render {
            Some(render) => render(item),
            None => field_text(item, &self.key),
        }
    }
}

fn field_text<T: Serialize>(item: &T, key: &str) -> String {
    match serde_json::to_value(item) {
        Ok(Value::Object(map)) => map.get(key).map(value_text).unwrap_or_else(|| "-".to_string()),
        _ => "-".to_string(),
    }
}

/// Plain-text form of a JSON value as a table cell shows it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) if s.trim().is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(values) if values.is_empty() => "-".to_string(),
        Value::Array(values) => values.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Rows with an optional expandable detail line per item.
pub struct Table<T> {
    columns: Vec<Column<T>>,
    row_key: Box<dyn Fn(&T) -> String + Send + Sync>,
    detail: Option<RenderFn<T>>,
    expanded: BTreeSet<String>,
    empty_text: String,
}

impl<T: Serialize> Table<T> {
    pub fn new(columns: Vec<Column<T>>, row_key: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            columns,
            row_key: Box::new(row_key),
            detail: None,
            expanded: BTreeSet::new(),
            empty_text: "No records found".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.detail = Some(Box::new(detail));
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Opens or closes the detail row for `key`. Returns whether it is now open.
    pub fn toggle_expanded(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn rows(&self, items: &[T]) -> Vec<Vec<String>> {
        items
            .iter()
            .map(|item| self.columns.iter().map(|column| column.cell(item)).collect())
            .collect()
    }

    pub fn render(&self, items: &[T]) -> String {
        let rows = self.rows(items);
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.header.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut out = vec![format_row(&headers, &widths)];
        out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));

        if items.is_empty() {
            out.push(self.empty_text.clone());
        }
        for (item, row) in items.iter().zip(&rows) {
            out.push(format_row(row, &widths));
            if let Some(detail) = &self.detail {
                if self.is_expanded(&(self.row_key)(item)) {
                    out.extend(detail(item).lines().map(|line| format!("    {line}")));
                }
            }
        }
        out.join("\n")
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
