//! Marketplace backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, validation, services and
//! ports; [`inbound`] and [`outbound`] hold the adapters around them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
