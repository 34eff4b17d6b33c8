//! System wiring, configuration and startup logic.

pub mod admin_system;
pub mod config;
pub mod tracing;

pub use admin_system::*;
pub use config::*;
pub use self::tracing::*;
