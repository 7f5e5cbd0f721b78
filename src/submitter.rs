use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{SubmitError, SubmitFailureReason};
use crate::form::{FormDefinition, OutcomeDescriptor, OutcomeKind};
use crate::instance_type::InstanceTypeDescriptor;
use crate::mutation::{CompletionResult, InstanceDataSaver, InstanceMutationService};
use crate::user::{CurrentUser, is_validated_submitter};

/// Per-call inputs that come from the caller's context rather than the form.
#[derive(Default, Clone, Copy)]
pub struct SubmitOptions<'a> {
    /// The signed-in user, or `None` when unauthenticated.
    pub current_user: Option<&'a CurrentUser>,
    /// Local form validation. Returns `false` when the form is invalid.
    pub validate_form: Option<&'a (dyn Fn() -> bool + Sync)>,
}

/// The result of a submission that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The outcome was carried out. `state` is what was sent with it.
    Submitted {
        outcome: OutcomeDescriptor,
        state: Map<String, Value>,
    },
    /// The submission was turned away; nothing further was sent.
    Failed(SubmitFailureReason),
}

/// Submits task outcomes for one workflow instance.
///
/// Outcome resolution always happens before any side effect. For `Complete`
/// outcomes every local check runs before the first network call, and pending
/// edits are always saved before the outcome-specific mutation.
pub struct TaskOutcomeSubmitter<'a, M, D> {
    instance_id: String,
    form: &'a FormDefinition,
    instance_type: &'a InstanceTypeDescriptor,
    mutations: &'a M,
    saver: &'a D,
}

impl<'a, M, D> TaskOutcomeSubmitter<'a, M, D>
where
    M: InstanceMutationService,
    D: InstanceDataSaver,
{
    pub fn new(
        instance_id: impl Into<String>,
        form: &'a FormDefinition,
        instance_type: &'a InstanceTypeDescriptor,
        mutations: &'a M,
        saver: &'a D,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            form,
            instance_type,
            mutations,
            saver,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Resolves `outcome_type` on the form and carries it out.
    ///
    /// - `Complete` checks the submitter and the form, saves pending edits,
    ///   then completes the task with the filtered state.
    /// - `Destroy` destroys the instance with the filtered state. It applies
    ///   no submitter or form checks.
    /// - `Save` only saves pending edits and never carries state.
    ///
    /// An unknown outcome type is an error and nothing is sent.
    pub async fn submit(
        &self,
        task_id: &str,
        outcome_type: &str,
        options: SubmitOptions<'_>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self
            .form
            .find_matching_outcome(outcome_type)
            .ok_or_else(|| SubmitError::OutcomeNotFound(outcome_type.to_string()))?;

        debug!(
            form = %self.form.name,
            outcome = %outcome.outcome_type,
            result = %outcome.result,
            "Resolved outcome"
        );

        match outcome.result {
            OutcomeKind::Complete => self.complete(task_id, outcome, options).await,
            OutcomeKind::Destroy => self.destroy(outcome).await,
            OutcomeKind::Save => self.save(outcome).await,
        }
    }

    async fn complete(
        &self,
        task_id: &str,
        outcome: &OutcomeDescriptor,
        options: SubmitOptions<'_>,
    ) -> Result<SubmitOutcome, SubmitError> {
        if outcome.requires_validated_submitter && !is_validated_submitter(options.current_user) {
            return Ok(Self::fail(SubmitFailureReason::RequiresValidatedSubmitter));
        }

        if !outcome.skip_validations
            && let Some(validate) = options.validate_form
            && !validate()
        {
            return Ok(Self::fail(SubmitFailureReason::FormValidationFailed));
        }

        let state = self.filtered_state(outcome);

        self.saver.save_instance_data().await?;

        info!(
            instance = %self.instance_id,
            task = task_id,
            outcome = %outcome.outcome_type,
            "Completing task"
        );
        let result = self
            .mutations
            .complete_task(
                &self.instance_id,
                &self.instance_type.name,
                task_id,
                &self.form.name,
                &outcome.outcome_type,
                &state,
            )
            .await?;

        Ok(match result {
            // The server enforces the validated-email requirement too.
            CompletionResult::ValidatedEmailRequired => {
                Self::fail(SubmitFailureReason::RequiresValidatedSubmitter)
            }
            CompletionResult::Success => SubmitOutcome::Submitted {
                outcome: outcome.clone(),
                state,
            },
            CompletionResult::ValidationFailed => {
                Self::fail(SubmitFailureReason::FormValidationFailed)
            }
        })
    }

    async fn destroy(&self, outcome: &OutcomeDescriptor) -> Result<SubmitOutcome, SubmitError> {
        let state = self.filtered_state(outcome);

        info!(instance = %self.instance_id, outcome = %outcome.outcome_type, "Destroying instance");
        self.mutations
            .destroy_instance(&self.instance_id, &self.instance_type.name, &state)
            .await?;

        Ok(SubmitOutcome::Submitted {
            outcome: outcome.clone(),
            state,
        })
    }

    async fn save(&self, outcome: &OutcomeDescriptor) -> Result<SubmitOutcome, SubmitError> {
        info!(instance = %self.instance_id, outcome = %outcome.outcome_type, "Saving instance");
        self.saver.save_instance_data().await?;

        // Save never carries state changes, whatever the outcome declares.
        Ok(SubmitOutcome::Submitted {
            outcome: outcome.clone(),
            state: Map::new(),
        })
    }

    fn filtered_state(&self, outcome: &OutcomeDescriptor) -> Map<String, Value> {
        self.instance_type
            .filter_object_to_state_variables(&outcome.state)
    }

    fn fail(reason: SubmitFailureReason) -> SubmitOutcome {
        warn!(reason = %reason, "Submission turned away");
        SubmitOutcome::Failed(reason)
    }
}

/// Record of one submission, printed by the CLI after it finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub instance_id: String,
    pub task_id: String,
    pub form: String,
    pub outcome_type: String,
    pub result: Option<OutcomeKind>,
    pub failure: Option<SubmitFailureReason>,
    pub state: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new(
        instance_id: &str,
        task_id: &str,
        form: &str,
        outcome_type: &str,
        outcome: &SubmitOutcome,
    ) -> Self {
        let (result, failure, state) = match outcome {
            SubmitOutcome::Submitted { outcome, state } => (Some(outcome.result), None, state.clone()),
            SubmitOutcome::Failed(reason) => (None, Some(*reason), Map::new()),
        };
        Self {
            instance_id: instance_id.to_string(),
            task_id: task_id.to_string(),
            form: form.to_string(),
            outcome_type: outcome_type.to_string(),
            result,
            failure,
            state,
            submitted_at: Utc::now(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}
