//! FHIR-aligned goal wire models and translation helpers.
//!
//! A Goal captures a patient health objective: what should change, by when,
//! and who stated it.
//!
//! Responsibilities:
//! - Define public domain-level types for goal construction and inspection
//! - Define a strict wire model for serialisation/deserialisation
//! - Provide translation helpers between domain types and the wire model
//! - Validate goal structure and enforce required fields
//!
//! Notes:
//! - Goal payloads are submitted to the record server and never stored locally
//! - The wire model covers the subset of the Goal resource careboard produces

use crate::datatypes::{
    concept_from_wire, concept_to_wire, reference_from_wire, reference_to_wire, target_from_wire,
    target_to_wire, CodeableConceptWire, GoalTargetWire, ReferenceWire,
};
use crate::{format_instant, CodeableConcept, Coding, FhirError, GoalTarget, Reference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminology system for goal achievement codes.
pub const GOAL_ACHIEVEMENT_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/goal-achievement";

/// The fixed achievement status stamped on every newly entered goal.
pub fn achievement_in_progress() -> CodeableConcept {
    CodeableConcept {
        coding: vec![Coding {
            system: GOAL_ACHIEVEMENT_SYSTEM.to_owned(),
            code: "in-progress".to_owned(),
            display: Some("In Progress".to_owned()),
        }],
        text: Some("In Progress".to_owned()),
    }
}

// ============================================================================
// Public domain-level types
// ============================================================================

/// Goal lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleStatus {
    /// Goal has been suggested but not yet agreed.
    Proposed,
    /// Goal is intended but not yet started.
    Planned,
    /// Goal has been accepted by all parties.
    Accepted,
    /// Goal is being actively pursued.
    Active,
    /// Goal is temporarily suspended.
    OnHold,
    /// Goal has been met or is no longer pursued.
    Completed,
    /// Goal was abandoned before completion.
    Cancelled,
    /// Goal was recorded in error.
    EnteredInError,
    /// Goal was declined.
    Rejected,
}

impl LifecycleStatus {
    /// Convert to FHIR wire format string.
    fn to_wire(self) -> &'static str {
        match self {
            LifecycleStatus::Proposed => "proposed",
            LifecycleStatus::Planned => "planned",
            LifecycleStatus::Accepted => "accepted",
            LifecycleStatus::Active => "active",
            LifecycleStatus::OnHold => "on-hold",
            LifecycleStatus::Completed => "completed",
            LifecycleStatus::Cancelled => "cancelled",
            LifecycleStatus::EnteredInError => "entered-in-error",
            LifecycleStatus::Rejected => "rejected",
        }
    }

    /// Parse from FHIR wire format string.
    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(LifecycleStatus::Proposed),
            "planned" => Some(LifecycleStatus::Planned),
            "accepted" => Some(LifecycleStatus::Accepted),
            "active" => Some(LifecycleStatus::Active),
            "on-hold" => Some(LifecycleStatus::OnHold),
            "completed" => Some(LifecycleStatus::Completed),
            "cancelled" => Some(LifecycleStatus::Cancelled),
            "entered-in-error" => Some(LifecycleStatus::EnteredInError),
            "rejected" => Some(LifecycleStatus::Rejected),
            _ => None,
        }
    }
}

/// Domain-level carrier for goal data (flat structure).
///
/// The wire format nests the description inside a codeable concept; this flat
/// structure carries the description text directly, since careboard only ever
/// writes text descriptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalData {
    /// Lifecycle state of the goal.
    pub lifecycle_status: LifecycleStatus,

    /// Coded progress indicator.
    pub achievement_status: Option<CodeableConcept>,

    /// Free-text description of the objective.
    pub description_text: String,

    /// The patient this goal belongs to.
    pub subject: Reference,

    /// Who stated the goal, when known.
    pub expressed_by: Option<Reference>,

    /// When pursuit of the goal begins.
    pub start_date: Option<DateTime<Utc>>,

    /// Intended milestones. An empty list is omitted from the wire form.
    pub targets: Vec<GoalTarget>,
}

// ============================================================================
// Public Goal operations
// ============================================================================

/// Goal resource operations.
///
/// This is a zero-sized type used for namespacing goal-related operations.
/// All methods are associated functions.
pub struct Goal;

impl Goal {
    /// Parse a goal resource from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `target.0.dueDate`) to the failing field when the JSON does not match
    /// the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not represent a valid goal resource,
    /// - any field has an unexpected type,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - resourceType is not "Goal".
    pub fn parse(json_text: &str) -> Result<GoalData, FhirError> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, GoalWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "Goal schema mismatch at {path}: {source}"
                )));
            }
        };

        // Validate resourceType
        if wire.resource_type != "Goal" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Goal', got '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }

    /// Render a goal resource as JSON text.
    ///
    /// This converts domain-level [`GoalData`] into wire format and serialises
    /// to compact JSON, the shape submitted to the record server.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if serialisation fails.
    pub fn render(data: &GoalData) -> Result<String, FhirError> {
        let wire = domain_to_wire(data);
        serde_json::to_string(&wire)
            .map_err(|e| FhirError::Translation(format!("Failed to serialise goal: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a goal resource as submitted to the server.
///
/// This is the exact structure that will be serialised to/from JSON.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct GoalWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(rename = "lifecycleStatus")]
    pub lifecycle_status: String,

    #[serde(rename = "achievementStatus", skip_serializing_if = "Option::is_none")]
    pub achievement_status: Option<CodeableConceptWire>,

    pub description: CodeableConceptWire,

    pub subject: ReferenceWire,

    #[serde(rename = "expressedBy", skip_serializing_if = "Option::is_none")]
    pub expressed_by: Option<ReferenceWire>,

    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<GoalTargetWire>>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert wire format goal to flat domain type.
fn wire_to_domain(wire: GoalWire) -> Result<GoalData, FhirError> {
    let lifecycle_status = LifecycleStatus::from_wire(&wire.lifecycle_status).ok_or_else(|| {
        FhirError::Translation(format!(
            "unknown lifecycleStatus '{}'",
            wire.lifecycle_status
        ))
    })?;

    let description_text = wire
        .description
        .text
        .clone()
        .ok_or_else(|| FhirError::Translation("Goal description has no text".into()))?;

    let start_date = wire
        .start_date
        .map(|s| {
            s.parse::<DateTime<Utc>>()
                .map_err(|e| FhirError::Translation(format!("invalid startDate: {e}")))
        })
        .transpose()?;

    let targets = wire
        .target
        .unwrap_or_default()
        .into_iter()
        .map(target_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GoalData {
        lifecycle_status,
        achievement_status: wire.achievement_status.map(concept_from_wire),
        description_text,
        subject: reference_from_wire(wire.subject)?,
        expressed_by: wire.expressed_by.map(reference_from_wire).transpose()?,
        start_date,
        targets,
    })
}

/// Convert flat domain type to wire format goal.
fn domain_to_wire(data: &GoalData) -> GoalWire {
    let target = if data.targets.is_empty() {
        None
    } else {
        Some(data.targets.iter().map(target_to_wire).collect())
    };

    GoalWire {
        resource_type: "Goal".to_string(),
        lifecycle_status: data.lifecycle_status.to_wire().to_string(),
        achievement_status: data.achievement_status.as_ref().map(concept_to_wire),
        description: concept_to_wire(&CodeableConcept::text_only(data.description_text.clone())),
        subject: reference_to_wire(&data.subject),
        expressed_by: data.expressed_by.as_ref().map(reference_to_wire),
        start_date: data.start_date.map(format_instant),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careboard_types::NonEmptyText;

    fn sample_goal() -> GoalData {
        let start = "2024-01-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");
        let due = "2024-06-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");

        GoalData {
            lifecycle_status: LifecycleStatus::Active,
            achievement_status: Some(achievement_in_progress()),
            description_text: "Lose 5kg".to_string(),
            subject: Reference::relative(
                "Patient",
                "123",
                Some(NonEmptyText::new("Sarah Williams").expect("valid name")),
            ),
            expressed_by: None,
            start_date: Some(start),
            targets: vec![GoalTarget {
                due_date: Some(due),
            }],
        }
    }

    #[test]
    fn round_trips_sample_goal() {
        let goal = sample_goal();
        let json = Goal::render(&goal).expect("render goal");
        let reparsed = Goal::parse(&json).expect("reparse goal");
        assert_eq!(goal, reparsed);
    }

    #[test]
    fn renders_expected_wire_fields() {
        let json = Goal::render(&sample_goal()).expect("render goal");

        assert!(json.contains("\"resourceType\":\"Goal\""));
        assert!(json.contains("\"lifecycleStatus\":\"active\""));
        assert!(json.contains("\"code\":\"in-progress\""));
        assert!(json.contains("\"display\":\"In Progress\""));
        assert!(json.contains("\"description\":{\"text\":\"Lose 5kg\"}"));
        assert!(json.contains("\"reference\":\"Patient/123\""));
        assert!(json.contains("\"display\":\"Sarah Williams\""));
        assert!(json.contains("\"startDate\":\"2024-01-01T00:00:00.000Z\""));
        assert!(json.contains("\"target\":[{\"dueDate\":\"2024-06-01T00:00:00.000Z\"}]"));
    }

    #[test]
    fn omits_absent_optional_fields() {
        let mut goal = sample_goal();
        goal.achievement_status = None;
        goal.start_date = None;
        goal.targets.clear();

        let json = Goal::render(&goal).expect("render goal");
        assert!(!json.contains("achievementStatus"));
        assert!(!json.contains("startDate"));
        assert!(!json.contains("target"));
        assert!(!json.contains("expressedBy"));
    }

    #[test]
    fn dateless_target_renders_as_empty_entry() {
        let mut goal = sample_goal();
        goal.targets = vec![GoalTarget::default()];

        let json = Goal::render(&goal).expect("render goal");
        assert!(json.contains("\"target\":[{}]"));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"{
            "resourceType": "Goal",
            "lifecycleStatus": "active",
            "description": {"text": "Walk daily"},
            "subject": {"reference": "Patient/123"},
            "unexpectedKey": "should fail"
        }"#;

        let err = Goal::parse(input).expect_err("should reject unknown key");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("unexpectedKey")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn reports_path_to_mistyped_field() {
        let input = r#"{
            "resourceType": "Goal",
            "lifecycleStatus": "active",
            "description": {"text": "Walk daily"},
            "subject": {"reference": "Patient/123"},
            "target": [{"dueDate": 42}]
        }"#;

        let err = Goal::parse(input).expect_err("should reject wrong type");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("target")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let input = r#"{
            "resourceType": "Observation",
            "lifecycleStatus": "active",
            "description": {"text": "Walk daily"},
            "subject": {"reference": "Patient/123"}
        }"#;

        let err = Goal::parse(input).expect_err("should reject invalid resourceType");
        match err {
            FhirError::InvalidInput(msg) => {
                assert!(msg.contains("Goal"));
                assert!(msg.contains("Observation"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_lifecycle_status() {
        let input = r#"{
            "resourceType": "Goal",
            "lifecycleStatus": "thriving",
            "description": {"text": "Walk daily"},
            "subject": {"reference": "Patient/123"}
        }"#;

        let err = Goal::parse(input).expect_err("should reject unknown status");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("thriving")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn parses_minimal_valid_goal() {
        let input = r#"{
            "resourceType": "Goal",
            "lifecycleStatus": "active",
            "description": {"text": "Walk daily"},
            "subject": {"reference": "Patient/123"}
        }"#;

        let result = Goal::parse(input).expect("should parse minimal goal");
        assert_eq!(result.lifecycle_status, LifecycleStatus::Active);
        assert_eq!(result.description_text, "Walk daily");
        assert_eq!(result.subject.reference, "Patient/123");
        assert!(result.subject.display.is_none());
        assert!(result.achievement_status.is_none());
        assert!(result.expressed_by.is_none());
        assert!(result.start_date.is_none());
        assert!(result.targets.is_empty());
    }
}
