//! HTTP submission gateway for careboard.
//!
//! This crate implements the `careboard-core` gateway seam against a FHIR
//! record server over HTTP. It owns:
//! - [`ServerConfig`]: connection settings resolved once at startup
//! - [`FhirServerGateway`]: the POST-a-resource implementation
//!
//! Nothing here inspects form state; the crate only ships finished records.

pub mod config;
pub mod gateway;

pub use config::{ConfigError, ServerConfig};
pub use gateway::FhirServerGateway;
