//! FHIR server gateway implementation.
//!
//! Renders a finished record to its wire form and POSTs it to the record
//! server. The outcome is reported back to the caller; there is no retry or
//! queueing here.

use crate::config::ServerConfig;
use async_trait::async_trait;
use careboard_core::{GatewayError, ResourceGateway};
use fhir::{Goal, GoalData};
use reqwest::header::CONTENT_TYPE;

/// FHIR JSON media type sent with create requests.
const FHIR_JSON: &str = "application/fhir+json";

/// Submits resources to a FHIR record server over HTTP.
pub struct FhirServerGateway {
    http: reqwest::Client,
    config: ServerConfig,
}

impl FhirServerGateway {
    /// Build a gateway from resolved connection settings.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ResourceGateway for FhirServerGateway {
    async fn create_goal(&self, goal: &GoalData) -> Result<(), GatewayError> {
        let body =
            Goal::render(goal).map_err(|e| GatewayError::Serialisation(e.to_string()))?;
        let url = self.config.create_url("Goal");

        let mut request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, FHIR_JSON)
            .body(body);
        if let Some(token) = self.config.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "record server rejected goal");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(%url, status = status.as_u16(), "created Goal resource");
        Ok(())
    }
}
