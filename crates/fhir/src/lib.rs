//! FHIR wire/boundary support for careboard.
//!
//! This crate provides **wire models** and **format/translation helpers** for
//! the FHIR resources careboard submits to a clinical record server:
//! - JSON resource bodies (for example Goal creation payloads)
//!
//! This crate focuses on:
//! - FHIR semantic alignment (without FHIR REST transport)
//! - serialisation/deserialisation
//! - translation between domain primitives and wire structs
//!
//! Transport belongs elsewhere: HTTP submission lives in `careboard-client`
//! and never reaches into the wire structs directly.

pub mod datatypes;
pub mod goal;

// Re-export facades
pub use goal::Goal;

// Re-export public domain-level types
pub use datatypes::{CodeableConcept, Coding, GoalTarget, Reference};
pub use goal::{GoalData, LifecycleStatus};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Render an instant the way the goal form serialises dates: RFC 3339 with
/// millisecond precision and a `Z` suffix, e.g. `2024-01-01T00:00:00.000Z`.
pub fn format_instant(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
