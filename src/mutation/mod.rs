pub mod client;
pub mod edits;
pub mod error;
pub mod types;

use serde_json::{Map, Value};

pub use client::GraphQlClient;
pub use edits::PendingEdits;
pub use error::MutationError;
pub use types::CompletionResult;

/// Network-backed operations on workflow instances.
#[allow(async_fn_in_trait)]
pub trait InstanceMutationService {
    /// Completes `task_id` on the instance with the given outcome and state changes.
    async fn complete_task(
        &self,
        instance_id: &str,
        instance_type: &str,
        task_id: &str,
        form_name: &str,
        outcome_type: &str,
        state: &Map<String, Value>,
    ) -> Result<CompletionResult, MutationError>;

    async fn destroy_instance(
        &self,
        instance_id: &str,
        instance_type: &str,
        state: &Map<String, Value>,
    ) -> Result<(), MutationError>;

    /// Writes in-progress field edits back to the instance.
    async fn update_instance(
        &self,
        instance_id: &str,
        instance_type: &str,
        changes: &Map<String, Value>,
    ) -> Result<(), MutationError>;
}

/// Persists whatever edits the caller has made to the instance so far.
#[allow(async_fn_in_trait)]
pub trait InstanceDataSaver {
    async fn save_instance_data(&self) -> Result<(), MutationError>;
}
