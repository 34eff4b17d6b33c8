use std::future::Future;

use serde::de::DeserializeOwned;

use super::error::FormError;
use super::form::Form;
use crate::error::ApiError;

/// A dialog around a [`Form`]. Closes after a successful submit and keeps
/// the error on screen otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub title: String,
    pub form: Form,
    open: bool,
    error: Option<String>,
}

impl Modal {
    pub fn new(title: impl Into<String>, form: Form) -> Self {
        Self { title: title.into(), form, open: false, error: None }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
        self.form.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit<P, R, F, Fut>(&mut self, handler: F) -> Result<R, FormError>
    where
        P: DeserializeOwned,
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        match self.form.submit(handler).await {
            Ok(result) => {
                self.close();
                Ok(result)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        if !self.open {
            return String::new();
        }
        let mut lines = vec![format!("== {} ==", self.title)];
        for field in self.form.fields() {
            let marker = if field.required { "*" } else { "" };
            let value = self.form.value(&field.key).unwrap_or("");
            lines.push(format!("{}{marker}: {value}", field.label));
        }
        if let Some(error) = &self.error {
            lines.push(format!("! {error}"));
        }
        lines.join("\n")
    }
}
