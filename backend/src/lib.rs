//! Angry Pros backend library.
//!
//! Hexagonal layout: `domain` holds entities, ports, and services;
//! `inbound::http` adapts actix-web requests onto the driving ports;
//! `outbound` implements the driven ports over PostgreSQL, memory, and the
//! identity provider.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
