//! HTTP plumbing shared by every resource service: the transport seam, the
//! authenticated client, query-string building and response decoding.

pub mod client;
pub mod envelope;
pub mod query;
pub mod transport;

pub use client::*;
pub use envelope::*;
pub use query::*;
pub use transport::*;
