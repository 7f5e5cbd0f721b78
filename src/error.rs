use thiserror::Error;

use crate::mutation::MutationError;

/// Fatal submission errors. These are configuration or transport problems,
/// never something the submitting user can correct.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Unable to find matching outcome for outcome type ({0})")]
    OutcomeNotFound(String),

    #[error("Mutation failed: {0}")]
    Mutation(#[from] MutationError),
}

/// Why a submission was turned away, for the caller to show to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SubmitFailureReason {
    /// The outcome needs a signed-in submitter with a validated email address.
    RequiresValidatedSubmitter,
    /// The form, or the server's re-validation of it, rejected the data.
    FormValidationFailed,
}

impl std::fmt::Display for SubmitFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitFailureReason::RequiresValidatedSubmitter => write!(f, "RequiresValidatedSubmitter"),
            SubmitFailureReason::FormValidationFailed => write!(f, "FormValidationFailed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_not_found_display() {
        let err = SubmitError::OutcomeNotFound("publish".into());
        assert_eq!(
            err.to_string(),
            "Unable to find matching outcome for outcome type (publish)"
        );
    }

    #[test]
    fn mutation_error_converts() {
        let err: SubmitError = MutationError::GraphQl("denied".into()).into();
        assert!(matches!(err, SubmitError::Mutation(_)));
        assert_eq!(err.to_string(), "Mutation failed: GraphQL error: denied");
    }

    #[test]
    fn failure_reason_serializes_as_name() {
        let json = serde_json::to_string(&SubmitFailureReason::FormValidationFailed).unwrap();
        assert_eq!(json, r#""FormValidationFailed""#);
    }
}
