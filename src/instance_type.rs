use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field of an instance type's model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field: String,
    /// Whether the field is tracked as workflow state rather than form data.
    #[serde(default)]
    pub state_variable: bool,
}

/// Describes an instance type (e.g. a submission) and which of its fields are state variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl InstanceTypeDescriptor {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Names of the fields marked as state variables, in declaration order.
    pub fn state_variables(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.state_variable)
            .map(|f| f.field.as_str())
    }

    pub fn is_state_variable(&self, field: &str) -> bool {
        self.state_variables().any(|name| name == field)
    }

    /// Returns the subset of `payload` whose keys are state variables of this type.
    pub fn filter_object_to_state_variables(&self, payload: &Map<String, Value>) -> Map<String, Value> {
        payload
            .iter()
            .filter(|(key, _)| self.is_state_variable(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
