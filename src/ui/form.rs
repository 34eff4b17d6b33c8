use std::collections::BTreeMap;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use super::error::FormError;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    /// `(value, label)` pairs.
    Select { options: Vec<(String, String)> },
    TextArea,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Value the field holds when the form opens or is cleared.
    pub initial: Option<String>,
}

impl FormField {
    fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self { key: key.to_string(), label: label.to_string(), kind, required: false, initial: None }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn select(key: &str, label: &str, values: &[&str]) -> Self {
        let options = values.iter().map(|v| (v.to_string(), v.to_string())).collect();
        Self::new(key, label, FieldKind::Select { options })
    }

    pub fn textarea(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::TextArea)
    }

    pub fn checkbox(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Checkbox)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn initially(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }
}

/// A controlled-input form. Values are kept as the raw text a user typed
/// and only converted to JSON by [`validate`](Form::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    fields: Vec<FormField>,
    values: BTreeMap<String, String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self { fields, values: BTreeMap::new() };
        form.clear();
        form
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.fields.iter().any(|f| f.key == key) {
            return Err(FormError::UnknownField(key.to_string()));
        }
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Prefills the form from an existing record's JSON, for edit dialogs.
    pub fn fill_from(&mut self, record: &Value) {
        for field in &self.fields {
            let text = match record.get(&field.key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => continue,
            };
            self.values.insert(field.key.clone(), text);
        }
    }

    /// Drops typed input and restores each field's initial value.
    pub fn clear(&mut self) {
        self.values = self
            .fields
            .iter()
            .filter_map(|f| f.initial.clone().map(|value| (f.key.clone(), value)))
            .collect();
    }

    /// Converts the inputs to a JSON object. Blank optional fields are left
    /// out; an unchecked checkbox is `false`.
    pub fn validate(&self) -> Result<Map<String, Value>, FormError> {
        let mut body = Map::new();
        for field in &self.fields {
            let raw = self.values.get(&field.key).map(|v| v.trim()).unwrap_or("");

            if let FieldKind::Checkbox = field.kind {
                let checked = matches!(raw.to_ascii_lowercase().as_str(), "true" | "on" | "yes" | "1");
                body.insert(field.key.clone(), Value::Bool(checked));
                continue;
            }
            if raw.is_empty() {
                if field.required {
                    return Err(FormError::Required(field.label.clone()));
                }
                continue;
            }

            let value = match &field.kind {
                FieldKind::Number => parse_number(raw).ok_or_else(|| FormError::InvalidNumber {
                    label: field.label.clone(),
                })?,
                FieldKind::Select { options } => {
                    if !options.iter().any(|(option, _)| option == raw) {
                        return Err(FormError::InvalidOption { label: field.label.clone(), value: raw.to_string() });
                    }
                    Value::String(raw.to_string())
                }
                _ => Value::String(raw.to_string()),
            };
            body.insert(field.key.clone(), value);
        }
        Ok(body)
    }

    /// Validates and decodes the inputs into a request body type.
    pub fn payload<P: DeserializeOwned>(&self) -> Result<P, FormError> {
        let body = self.validate()?;
        serde_json::from_value(Value::Object(body)).map_err(|e| FormError::Payload(e.to_string()))
    }

    /// Validates, then hands the typed payload to `handler`.
    pub async fn submit<P, R, F, Fut>(&self, handler: F) -> Result<R, FormError>
    where
        P: DeserializeOwned,
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let payload = self.payload::<P>().map_err(|e| {
            warn!(error = %e, "Form rejected");
            e
        })?;
        debug!("Submitting form");
        Ok(handler(payload).await?)
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}
