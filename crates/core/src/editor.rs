//! The goal entry component.
//!
//! [`GoalEditor`] ties the form state and edit context together and exposes
//! the screen's two user-visible transitions: **submit** (build record, hand
//! it to the gateway, navigate back) and **cancel** (navigate back only).
//! There is no submitted or error state; the component stays in editing until
//! the caller drops it.

use crate::builder::build_goal;
use crate::context::EditContext;
use crate::error::{GoalFormError, GoalFormResult};
use crate::form::GoalFormState;
use crate::gateway::ResourceGateway;
use crate::nav::Navigator;
use chrono::{DateTime, Utc};

/// What happened when the user pressed save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was created and the user was navigated back.
    Created,
    /// No subject was resolvable; nothing was built, sent, or navigated.
    NotSubmitted,
}

/// Owns the form state for one goal entry session.
pub struct GoalEditor {
    form: GoalFormState,
    context: EditContext,
}

impl GoalEditor {
    /// Open a fresh editing session. `now` seeds the start date cell.
    pub fn new(context: EditContext, now: DateTime<Utc>) -> Self {
        Self {
            form: GoalFormState::new(now),
            context,
        }
    }

    pub fn form(&self) -> &GoalFormState {
        &self.form
    }

    /// The form cells, for field change handlers to write into.
    pub fn form_mut(&mut self) -> &mut GoalFormState {
        &mut self.form
    }

    pub fn context(&self) -> &EditContext {
        &self.context
    }

    /// Save the goal.
    ///
    /// With no resolvable subject this is a quiet no-op: the outcome is
    /// [`SubmitOutcome::NotSubmitted`] and neither collaborator is touched.
    /// Otherwise the built record goes to the gateway; navigation happens
    /// only once the gateway reports success.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures as [`GoalFormError::Gateway`]. The user
    /// stays on the screen in that case.
    pub async fn submit(
        &self,
        gateway: &dyn ResourceGateway,
        navigator: &mut dyn Navigator,
    ) -> GoalFormResult<SubmitOutcome> {
        let goal = match build_goal(&self.form, &self.context) {
            Ok(goal) => goal,
            Err(GoalFormError::MissingSubject) => {
                tracing::warn!("goal not submitted: no subject reference in context");
                return Ok(SubmitOutcome::NotSubmitted);
            }
            Err(e) => return Err(e),
        };

        gateway.create_goal(&goal).await?;
        tracing::info!(subject = %goal.subject.reference, "goal created");

        navigator.go_back();
        Ok(SubmitOutcome::Created)
    }

    /// Discard the entry and return to the previous view.
    pub fn cancel(&self, navigator: &mut dyn Navigator) {
        navigator.go_back();
    }
}
