//! Goal resource construction.
//!
//! A pure transformation from current form state plus injected context into a
//! Goal record ready for submission. Nothing here talks to the network or
//! mutates state; the record is built fresh on every call.

use crate::context::EditContext;
use crate::error::{GoalFormError, GoalFormResult};
use crate::form::GoalFormState;
use fhir::goal::achievement_in_progress;
use fhir::{Goal, GoalData, GoalTarget, LifecycleStatus};

/// Placeholder description for a goal whose description cell was never set.
///
/// Note: the form initialises the cell to an empty string, so under normal
/// typing the cell is never unset and an empty description passes through
/// as-is. Whether blank descriptions should also get the placeholder is an
/// open product question; the current behaviour matches the shipped form.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Build a Goal record from the current form state and context.
///
/// The record always carries lifecycle status `active` and the fixed
/// `in-progress` achievement coding. One target entry is always included;
/// its due date is set only when the due date cell holds a value.
///
/// # Errors
///
/// Returns [`GoalFormError::MissingSubject`] when no patient is resolved in
/// the context; no record is built in that case.
pub fn build_goal(state: &GoalFormState, context: &EditContext) -> GoalFormResult<GoalData> {
    let subject = context
        .subject_reference()
        .ok_or(GoalFormError::MissingSubject)?;

    let description_text = state
        .description()
        .map(str::to_owned)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());

    let goal = GoalData {
        lifecycle_status: LifecycleStatus::Active,
        achievement_status: Some(achievement_in_progress()),
        description_text,
        subject,
        expressed_by: context.expressed_by_reference(),
        start_date: state.start_date(),
        targets: vec![GoalTarget {
            due_date: state.due_date(),
        }],
    };

    if let Ok(json) = Goal::render(&goal) {
        tracing::debug!(goal = %json, "built goal resource");
    }

    Ok(goal)
}
