use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::DEFAULT_PAGE_LIMIT;
use crate::error::ApiError;

/// Flat filter state of a list page. Setting a key to an empty value removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    values: BTreeMap<String, String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builds a URL query string, dropping empty and absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.push((key.to_string(), value));
        }
        self
    }

    pub fn opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn filters(self, filters: &Filters) -> Self {
        filters.iter().fold(self, |query, (key, value)| query.param(key, value))
    }

    /// Adds every field of a flat serializable filter struct or map.
    ///
    /// `null` and `""` are skipped, arrays become comma-separated lists and
    /// nested objects are rejected.
    pub fn serialized<T: Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        let object = match serde_json::to_value(value)? {
            Value::Object(object) => object,
            Value::Null => return Ok(self),
            other => {
                return Err(ApiError::Validation(format!(
                    "query filters must be an object, got {other}"
                )))
            }
        };
        for (key, value) in object {
            if let Some(rendered) = render_scalar(&key, &value)? {
                self = self.param(&key, rendered);
            }
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encoded `key=value&...` without a leading `?`.
    pub fn build(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn render_scalar(key: &str, value: &Value) -> Result<Option<String>, ApiError> {
    Ok(match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| render_scalar(key, item))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        Value::Object(_) => {
            return Err(ApiError::Validation(format!(
                "query filter `{key}` must be a scalar value"
            )))
        }
    })
}

/// What a list page asks the backend for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: Filters,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_LIMIT, filters: Filters::default() }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit, filters: Filters::default() }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .param("page", self.page)
            .param("limit", self.limit)
            .filters(&self.filters)
    }
}
