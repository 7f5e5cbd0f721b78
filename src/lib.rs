//! Task outcome submission for workflow instance forms.
//!
//! A [`FormDefinition`] declares the outcomes a task offers. The
//! [`TaskOutcomeSubmitter`] resolves one by name, checks the submitter and the
//! form, saves pending edits and carries the outcome out through an
//! [`InstanceMutationService`].

pub mod config;
pub mod error;
pub mod form;
pub mod instance_type;
pub mod mutation;
pub mod submitter;
pub mod user;

pub use error::{SubmitError, SubmitFailureReason};
pub use form::{FormDefinition, OutcomeDescriptor, OutcomeKind};
pub use instance_type::InstanceTypeDescriptor;
pub use mutation::{
    CompletionResult, GraphQlClient, InstanceDataSaver, InstanceMutationService, MutationError,
    PendingEdits,
};
pub use submitter::{SubmissionReceipt, SubmitOptions, SubmitOutcome, TaskOutcomeSubmitter};
pub use user::CurrentUser;
