//! Submission gateway seam.
//!
//! The goal entry component does not know how records reach the server; it
//! hands a finished record to whatever [`ResourceGateway`] the caller wired
//! in. `careboard-client` provides the HTTP implementation; tests use
//! in-memory doubles.

use async_trait::async_trait;
use fhir::GoalData;

/// Errors a gateway can report back to the submit flow.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to serialise resource: {0}")]
    Serialisation(String),
    #[error("failed to reach record server: {0}")]
    Transport(String),
    #[error("record server rejected resource: HTTP {status}")]
    Rejected { status: u16 },
}

/// Persists completed records on behalf of the form.
///
/// The create operation reports success or failure explicitly; the submit
/// flow decides what to do with the outcome.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Create a Goal resource on the record server.
    async fn create_goal(&self, goal: &GoalData) -> Result<(), GatewayError>;
}
