//! Headless view models for the admin pages.
//!
//! Each component holds the state a widget needs and renders it as plain
//! text, so pages can be driven from the CLI and asserted on in tests.

pub mod error;
pub mod filter_bar;
pub mod form;
pub mod modal;
pub mod pagination;
pub mod table;

pub use error::*;
pub use filter_bar::*;
pub use form::*;
pub use modal::*;
pub use pagination::*;
pub use table::*;

/// The error banner shown above a list. Nothing when there is no error.
pub fn error_banner(error: Option<&str>) -> Option<String> {
    error
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(|message| format!("! {message}"))
}
