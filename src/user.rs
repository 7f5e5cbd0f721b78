use serde::{Deserialize, Serialize};

/// Snapshot of the authenticated user taken at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_is_validated: bool,
}

impl CurrentUser {
    pub fn validated(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            email_is_validated: true,
        }
    }

    pub fn unvalidated(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            email_is_validated: false,
        }
    }
}

/// True only when a user is signed in and their email address has been validated.
pub fn is_validated_submitter(user: Option<&CurrentUser>) -> bool {
    user.is_some_and(|u| u.email_is_validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_not_validated() {
        assert!(!is_validated_submitter(None));
    }

    #[test]
    fn unvalidated_email_is_not_validated() {
        let user = CurrentUser::unvalidated("a@example.org");
        assert!(!is_validated_submitter(Some(&user)));
    }

    #[test]
    fn validated_email_passes() {
        let user = CurrentUser::validated("a@example.org");
        assert!(is_validated_submitter(Some(&user)));
    }

    #[test]
    fn deserializes_camel_case() {
        let user: CurrentUser =
            serde_json::from_str(r#"{"email":"a@example.org","emailIsValidated":true}"#).unwrap();
        assert!(user.email_is_validated);
    }
}
