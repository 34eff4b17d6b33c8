//! Admin back-office client for a multi-vendor marketplace REST API.
//!
//! Services in [`services`] wrap the admin endpoints. List pages are driven by
//! [`controller::ListController`] actors, one per open page, and rendered as
//! text by [`pages`] using the widgets in [`ui`].

pub mod app_system;
pub mod controller;
pub mod domain;
pub mod error;
pub mod http;
pub mod pages;
pub mod resource_framework;
pub mod services;
pub mod session;
pub mod ui;
pub mod variant;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
