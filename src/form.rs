use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The terminal action an outcome performs on its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Complete,
    Destroy,
    Save,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Complete => write!(f, "Complete"),
            OutcomeKind::Destroy => write!(f, "Destroy"),
            OutcomeKind::Save => write!(f, "Save"),
        }
    }
}

/// A named, user-triggerable outcome declared by a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDescriptor {
    #[serde(rename = "type")]
    pub outcome_type: String,
    pub result: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub requires_validated_submitter: bool,
    #[serde(default)]
    pub skip_validations: bool,
    /// State changes requested alongside the outcome. Filtered down to the
    /// instance type's state variables before being sent anywhere.
    #[serde(default)]
    pub state: Map<String, Value>,
}

/// A task form: its name and the outcomes it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDescriptor>,
}

impl FormDefinition {
    /// Looks up the outcome declared with the given type name.
    pub fn find_matching_outcome(&self, outcome_type: &str) -> Option<&OutcomeDescriptor> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.outcome_type == outcome_type)
    }

    /// Parses a form definition document and checks that outcome types are unique.
    pub fn from_json(json: &str) -> Result<Self> {
        let form: FormDefinition = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for outcome in &form.outcomes {
            if !seen.insert(outcome.outcome_type.as_str()) {
                bail!(
                    "Form '{}' declares outcome type '{}' more than once",
                    form.name,
                    outcome.outcome_type
                );
            }
        }

        Ok(form)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
