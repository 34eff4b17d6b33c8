//! Typed wrappers over each admin endpoint family.

#[macro_use]
mod macros;

pub mod fee_service;
pub mod material_service;
pub mod order_service;
pub mod tax_service;
pub mod user_service;
pub mod vendor_service;

pub use fee_service::*;
pub use material_service::*;
pub use order_service::*;
pub use tax_service::*;
pub use user_service::*;
pub use vendor_service::*;
