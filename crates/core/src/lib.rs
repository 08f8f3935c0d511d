//! # Careboard Core
//!
//! Core goal-entry logic for the careboard health-records client.
//!
//! This crate contains the pure component behind the "add a health goal"
//! screen:
//! - Form state with three independent cells (description, start date, due date)
//! - Resource building from form state plus injected patient/user context
//! - The submit/cancel flow against injected gateway and navigation seams
//!
//! **No transport concerns**: HTTP submission belongs in `careboard-client`;
//! argument parsing and wiring belong in `careboard-cli`.

pub mod builder;
pub mod context;
pub mod editor;
pub mod error;
pub mod form;
pub mod gateway;
pub mod nav;

pub use builder::{build_goal, DEFAULT_DESCRIPTION};
pub use context::{EditContext, PatientContext, UserContext};
pub use editor::{GoalEditor, SubmitOutcome};
pub use error::{GoalFormError, GoalFormResult};
pub use form::GoalFormState;
pub use gateway::{GatewayError, ResourceGateway};
pub use nav::Navigator;
