//! Club membership backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, policies,
//! services, and the ports they speak through; `inbound` adapts HTTP traffic
//! onto those ports; `outbound` implements the ports against PostgreSQL and
//! other infrastructure; `middleware` carries cross-cutting request concerns.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped correlation identifier.
pub use domain::TraceId;
/// Trace middleware re-export for server wiring.
pub use middleware::trace::Trace;
