use thiserror::Error;

use crate::error::ApiError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("{value:?} is not an option for {key}")]
    InvalidOption { key: String, value: String },

    #[error("{key} expects a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { key: String, value: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{0} is required")]
    Required(String),

    #[error("{label} must be a number")]
    InvalidNumber { label: String },

    #[error("{value:?} is not an option for {label}")]
    InvalidOption { label: String, value: String },

    #[error("Form does not match the request body: {0}")]
    Payload(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
