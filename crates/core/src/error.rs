use crate::gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum GoalFormError {
    #[error("no subject reference available for this goal")]
    MissingSubject,
    #[error("FHIR boundary error: {0}")]
    Fhir(#[from] fhir::FhirError),
    #[error("submission failed: {0}")]
    Gateway(#[from] GatewayError),
}

pub type GoalFormResult<T> = std::result::Result<T, GoalFormError>;
