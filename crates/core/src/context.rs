//! Injected context for the goal entry screen.
//!
//! The enclosing application resolves who is editing and on whose behalf
//! before the screen opens. This module carries that context and derives the
//! two resource references a new goal needs: the subject (the patient the
//! goal belongs to) and the expressed-by party (who stated it).

use careboard_types::NonEmptyText;
use fhir::Reference;

/// The patient whose record is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientContext {
    /// Logical id of the patient resource on the record server.
    pub id: String,

    /// The patient's full name, when the summary has one.
    pub full_name: Option<NonEmptyText>,
}

/// The authenticated user entering the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    /// Logical id of the user's resource on the record server.
    pub id: String,

    /// Resource kind of the user, e.g. `Patient`, `Practitioner`,
    /// `RelatedPerson`.
    pub resource_kind: String,
}

/// Everything the goal form needs from the enclosing application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditContext {
    /// The patient whose record is open, if one is resolved.
    pub patient: Option<PatientContext>,

    /// The authenticated user, if one is resolved.
    pub user: Option<UserContext>,

    /// Display name of the caregiver acting for the patient, if any.
    pub caregiver_name: Option<NonEmptyText>,
}

impl EditContext {
    /// The subject reference for a new goal.
    ///
    /// Present only when a patient id is resolved; the display name is the
    /// patient's full name when known.
    pub fn subject_reference(&self) -> Option<Reference> {
        self.patient
            .as_ref()
            .map(|p| Reference::relative("Patient", &p.id, p.full_name.clone()))
    }

    /// The expressed-by reference for a new goal.
    ///
    /// Present only when a user id is resolved. The display name falls back
    /// from the caregiver name to the patient's full name.
    pub fn expressed_by_reference(&self) -> Option<Reference> {
        self.user.as_ref().map(|u| {
            let display = self
                .caregiver_name
                .clone()
                .or_else(|| self.patient.as_ref().and_then(|p| p.full_name.clone()));
            Reference::relative(&u.resource_kind, &u.id, display)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> PatientContext {
        PatientContext {
            id: "123".into(),
            full_name: Some(NonEmptyText::new("Sarah Williams").expect("valid name")),
        }
    }

    #[test]
    fn subject_reference_requires_a_patient() {
        let context = EditContext::default();
        assert!(context.subject_reference().is_none());
    }

    #[test]
    fn subject_reference_uses_patient_id_and_name() {
        let context = EditContext {
            patient: Some(patient()),
            ..EditContext::default()
        };

        let subject = context.subject_reference().expect("subject present");
        assert_eq!(subject.reference, "Patient/123");
        assert_eq!(
            subject.display.as_ref().map(NonEmptyText::as_str),
            Some("Sarah Williams")
        );
    }

    #[test]
    fn expressed_by_requires_a_user() {
        let context = EditContext {
            patient: Some(patient()),
            ..EditContext::default()
        };
        assert!(context.expressed_by_reference().is_none());
    }

    #[test]
    fn expressed_by_prefers_caregiver_name() {
        let context = EditContext {
            patient: Some(patient()),
            user: Some(UserContext {
                id: "77".into(),
                resource_kind: "RelatedPerson".into(),
            }),
            caregiver_name: Some(NonEmptyText::new("Tom Williams").expect("valid name")),
        };

        let expressed_by = context.expressed_by_reference().expect("user present");
        assert_eq!(expressed_by.reference, "RelatedPerson/77");
        assert_eq!(
            expressed_by.display.as_ref().map(NonEmptyText::as_str),
            Some("Tom Williams")
        );
    }

    #[test]
    fn expressed_by_falls_back_to_patient_name() {
        let context = EditContext {
            patient: Some(patient()),
            user: Some(UserContext {
                id: "123".into(),
                resource_kind: "Patient".into(),
            }),
            caregiver_name: None,
        };

        let expressed_by = context.expressed_by_reference().expect("user present");
        assert_eq!(expressed_by.reference, "Patient/123");
        assert_eq!(
            expressed_by.display.as_ref().map(NonEmptyText::as_str),
            Some("Sarah Williams")
        );
    }
}
