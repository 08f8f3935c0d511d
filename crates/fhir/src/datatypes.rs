//! Shared FHIR datatypes and their wire forms.
//!
//! These are the general-purpose building blocks (references, codings,
//! codeable concepts, goal targets) used by the resource modules. Each type
//! comes in two flavours:
//! - a public domain-level struct for use in services and builders
//! - a strict wire struct (crate-private) for serialisation
//!
//! Wire structs use `#[serde(deny_unknown_fields)]` so that unexpected server
//! payloads fail loudly instead of being silently dropped.

use crate::{format_instant, FhirError};
use careboard_types::NonEmptyText;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// A literal reference to another resource, for example `Patient/123`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Relative reference string in `<ResourceKind>/<id>` form.
    pub reference: String,

    /// Human-readable label for the referenced resource.
    pub display: Option<NonEmptyText>,
}

impl Reference {
    /// Build a relative reference from a resource kind and logical id.
    pub fn relative(resource_kind: &str, id: &str, display: Option<NonEmptyText>) -> Self {
        Self {
            reference: format!("{resource_kind}/{id}"),
            display,
        }
    }
}

/// A single code drawn from a terminology system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coding {
    /// Terminology system URI.
    pub system: String,

    /// Code within the system.
    pub code: String,

    /// Human-readable label for the code.
    pub display: Option<String>,
}

/// A concept expressed as zero or more codings plus free text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeableConcept {
    /// Codings for the concept, possibly empty.
    pub coding: Vec<Coding>,

    /// Free-text rendering of the concept.
    pub text: Option<String>,
}

impl CodeableConcept {
    /// A concept carrying only free text, the shape the goal form produces
    /// for descriptions.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }
}

/// An intended objective milestone with an optional due date.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GoalTarget {
    /// When the target should be met, if a date was chosen.
    pub due_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Wire types (crate-private)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReferenceWire {
    pub reference: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct CodingWire {
    pub system: String,

    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct CodeableConceptWire {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<CodingWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct GoalTargetWire {
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

// ============================================================================
// Translation helpers (crate-private)
// ============================================================================

pub(crate) fn reference_to_wire(reference: &Reference) -> ReferenceWire {
    ReferenceWire {
        reference: reference.reference.clone(),
        display: reference.display.as_ref().map(|d| d.as_str().to_owned()),
    }
}

pub(crate) fn reference_from_wire(wire: ReferenceWire) -> Result<Reference, FhirError> {
    let display = wire
        .display
        .map(|d| {
            NonEmptyText::new(&d)
                .map_err(|_| FhirError::Translation("reference display cannot be empty".into()))
        })
        .transpose()?;

    Ok(Reference {
        reference: wire.reference,
        display,
    })
}

pub(crate) fn concept_to_wire(concept: &CodeableConcept) -> CodeableConceptWire {
    CodeableConceptWire {
        coding: concept
            .coding
            .iter()
            .map(|c| CodingWire {
                system: c.system.clone(),
                code: c.code.clone(),
                display: c.display.clone(),
            })
            .collect(),
        text: concept.text.clone(),
    }
}

pub(crate) fn concept_from_wire(wire: CodeableConceptWire) -> CodeableConcept {
    CodeableConcept {
        coding: wire
            .coding
            .into_iter()
            .map(|c| Coding {
                system: c.system,
                code: c.code,
                display: c.display,
            })
            .collect(),
        text: wire.text,
    }
}

pub(crate) fn target_to_wire(target: &GoalTarget) -> GoalTargetWire {
    GoalTargetWire {
        due_date: target.due_date.map(format_instant),
    }
}

pub(crate) fn target_from_wire(wire: GoalTargetWire) -> Result<GoalTarget, FhirError> {
    let due_date = wire
        .due_date
        .map(|s| {
            s.parse::<DateTime<Utc>>()
                .map_err(|e| FhirError::Translation(format!("invalid target dueDate: {e}")))
        })
        .transpose()?;

    Ok(GoalTarget { due_date })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_reference_joins_kind_and_id() {
        let display = NonEmptyText::new("Sarah Williams").expect("valid name");
        let reference = Reference::relative("Patient", "123", Some(display));
        assert_eq!(reference.reference, "Patient/123");
        assert_eq!(
            reference.display.as_ref().map(NonEmptyText::as_str),
            Some("Sarah Williams")
        );
    }

    #[test]
    fn empty_reference_display_is_rejected_on_translation() {
        let wire = ReferenceWire {
            reference: "Patient/123".into(),
            display: Some("  ".into()),
        };

        let err = reference_from_wire(wire).expect_err("should reject blank display");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("display")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn target_round_trips_due_date() {
        let due = "2024-06-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");
        let wire = target_to_wire(&GoalTarget {
            due_date: Some(due),
        });
        assert_eq!(wire.due_date.as_deref(), Some("2024-06-01T00:00:00.000Z"));

        let back = target_from_wire(wire).expect("translate back");
        assert_eq!(back.due_date, Some(due));
    }

    #[test]
    fn dateless_target_serialises_as_empty_object() {
        let wire = target_to_wire(&GoalTarget::default());
        let json = serde_json::to_string(&wire).expect("serialise target");
        assert_eq!(json, "{}");
    }
}
