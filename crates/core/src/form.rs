//! Form state for the goal entry screen.
//!
//! The screen has exactly three inputs, each backed by its own cell. Setters
//! replace the cell value synchronously; there is no cross-field validation
//! and no derived state.

use chrono::{DateTime, Utc};

/// Mutable state behind the goal entry form.
///
/// The description starts as an empty string (the text field is present but
/// untouched), the start date starts as "now", and the due date starts unset.
/// A date cell can return to unset when its picker is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalFormState {
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
}

impl GoalFormState {
    /// Fresh form state. `now` becomes the initial start date; it is passed
    /// in rather than read from the clock so callers and tests control it.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            description: Some(String::new()),
            start_date: Some(now),
            due_date: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Replace the description cell with the field's current text.
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = Some(text.into());
    }

    /// Replace the start date cell. `None` means the picker was cleared.
    pub fn set_start_date(&mut self, value: Option<DateTime<Utc>>) {
        self.start_date = value;
    }

    /// Replace the due date cell. `None` means the picker was cleared.
    pub fn set_due_date(&mut self, value: Option<DateTime<Utc>>) {
        self.due_date = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime")
    }

    #[test]
    fn fresh_form_defaults() {
        let form = GoalFormState::new(now());
        assert_eq!(form.description(), Some(""));
        assert_eq!(form.start_date(), Some(now()));
        assert_eq!(form.due_date(), None);
    }

    #[test]
    fn setters_replace_cells_independently() {
        let mut form = GoalFormState::new(now());

        form.set_description("Lose 5kg");
        assert_eq!(form.description(), Some("Lose 5kg"));
        assert_eq!(form.start_date(), Some(now()));

        let due = "2024-06-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");
        form.set_due_date(Some(due));
        assert_eq!(form.due_date(), Some(due));

        form.set_start_date(None);
        assert_eq!(form.start_date(), None);
        assert_eq!(form.description(), Some("Lose 5kg"));
    }
}
