//! Page-level state for resource lists.
//!
//! A [`ListController`] is an actor that owns one list page: its filters,
//! pagination and the last fetched items. Views talk to it through a
//! [`ListHandle`] and observe it through a `watch` channel of [`ListState`].

pub mod list_controller;
pub mod local_filter;
pub mod messages;
pub mod source;

pub use list_controller::*;
pub use local_filter::*;
pub use messages::*;
pub use source::*;
