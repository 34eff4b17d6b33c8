use chrono::NaiveDate;

use super::error::FilterError;
use crate::http::Filters;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    /// `(value, label)` pairs. The empty value means "all".
    Select { options: Vec<(String, String)> },
    Date,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
}

impl FilterField {
    pub fn select(key: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect();
        Self { key: key.to_string(), label: label.to_string(), kind: FilterKind::Select { options } }
    }

    /// A select whose options are the wire values themselves.
    pub fn select_values(key: &str, label: &str, values: &[&str]) -> Self {
        let options = values.iter().map(|v| (v.to_string(), v.to_string())).collect();
        Self { key: key.to_string(), label: label.to_string(), kind: FilterKind::Select { options } }
    }

    pub fn date(key: &str, label: &str) -> Self {
        Self { key: key.to_string(), label: label.to_string(), kind: FilterKind::Date }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self { key: key.to_string(), label: label.to_string(), kind: FilterKind::Text }
    }
}

/// The filter inputs above a list.
///
/// [`change`](FilterBar::change) checks a new value against the field and
/// returns the `(key, value)` event a list controller consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBar {
    fields: Vec<FilterField>,
    values: Filters,
}

impl FilterBar {
    pub fn new(fields: Vec<FilterField>) -> Self {
        Self { fields, values: Filters::new() }
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn values(&self) -> &Filters {
        &self.values
    }

    pub fn change(&mut self, key: &str, value: &str) -> Result<(String, String), FilterError> {
        let field = self
            .fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| FilterError::UnknownFilter(key.to_string()))?;
        let value = value.trim();

        if !value.is_empty() {
            match &field.kind {
                FilterKind::Select { options } => {
                    if !options.iter().any(|(option, _)| option == value) {
                        return Err(FilterError::InvalidOption { key: key.to_string(), value: value.to_string() });
                    }
                }
                FilterKind::Date => {
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| FilterError::InvalidDate { key: key.to_string(), value: value.to_string() })?;
                }
                FilterKind::Text => {}
            }
        }

        self.values.set(key, value);
        Ok((key.to_string(), value.to_string()))
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Mirrors the filters a controller is actually using.
    pub fn sync(&mut self, filters: &Filters) {
        self.values = filters.clone();
    }

    pub fn render(&self) -> String {
        self.fields
            .iter()
            .map(|field| {
                let value = self.values.get(&field.key).unwrap_or("");
                let shown = match &field.kind {
                    FilterKind::Select { options } => options
                        .iter()
                        .find(|(option, _)| option == value)
                        .map(|(_, label)| label.as_str())
                        .unwrap_or("All"),
                    _ if value.is_empty() => "-",
                    _ => value,
                };
                format!("{}: [{}]", field.label, shown)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
