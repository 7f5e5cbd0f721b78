use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::debug;

use super::error::MutationError;
use super::{InstanceDataSaver, InstanceMutationService};

/// Field edits made to one instance that have not been written back yet.
pub struct PendingEdits<'a, M> {
    service: &'a M,
    instance_id: String,
    instance_type: String,
    changes: Mutex<Map<String, Value>>,
}

impl<'a, M: InstanceMutationService> PendingEdits<'a, M> {
    pub fn new(service: &'a M, instance_id: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            service,
            instance_id: instance_id.into(),
            instance_type: instance_type.into(),
            changes: Mutex::new(Map::new()),
        }
    }

    pub fn set(&self, field: impl Into<String>, value: Value) {
        self.lock().insert(field.into(), value);
    }

    pub fn extend(&self, changes: Map<String, Value>) {
        self.lock().extend(changes);
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Map<String, Value>> {
        self.changes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<M: InstanceMutationService> InstanceDataSaver for PendingEdits<'_, M> {
    /// Sends the buffered edits. Edits that changed again while the request was
    /// in flight stay buffered for the next save.
    async fn save_instance_data(&self) -> Result<(), MutationError> {
        let sent = self.snapshot();
        if sent.is_empty() {
            return Ok(());
        }

        debug!(instance = %self.instance_id, fields = sent.len(), "Saving pending edits");
        self.service
            .update_instance(&self.instance_id, &self.instance_type, &sent)
            .await?;

        let mut changes = self.lock();
        for (field, value) in &sent {
            if changes.get(field) == Some(value) {
                changes.remove(field);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::CompletionResult;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingService {
        updates: Mutex<Vec<Map<String, Value>>>,
        fail: bool,
    }

    impl InstanceMutationService for RecordingService {
        async fn complete_task(
            &self,
            _instance_id: &str,
            _instance_type: &str,
            _task_id: &str,
            _form_name: &str,
            _outcome_type: &str,
            _state: &Map<String, Value>,
        ) -> Result<CompletionResult, MutationError> {
            Ok(CompletionResult::Success)
        }

        async fn destroy_instance(
            &self,
            _instance_id: &str,
            _instance_type: &str,
            _state: &Map<String, Value>,
        ) -> Result<(), MutationError> {
            Ok(())
        }

        async fn update_instance(
            &self,
            instance_id: &str,
            instance_type: &str,
            changes: &Map<String, Value>,
        ) -> Result<(), MutationError> {
            assert_eq!(instance_id, "inst-1");
            assert_eq!(instance_type, "Submission");
            if self.fail {
                return Err(MutationError::GraphQl("boom".into()));
            }
            self.updates.lock().unwrap().push(changes.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_buffer_saves_without_request() {
        let service = RecordingService::default();
        let edits = PendingEdits::new(&service, "inst-1", "Submission");

        edits.save_instance_data().await.unwrap();
        assert!(service.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_sends_changes_and_clears_buffer() {
        let service = RecordingService::default();
        let edits = PendingEdits::new(&service, "inst-1", "Submission");
        edits.set("title", json!("A model"));
        edits.set("authors", json!(["a", "b"]));

        edits.save_instance_data().await.unwrap();

        let updates = service.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].get("title"), Some(&json!("A model")));
        assert_eq!(updates[0].len(), 2);
        drop(updates);
        assert!(edits.is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_buffer() {
        let service = RecordingService {
            fail: true,
            ..Default::default()
        };
        let edits = PendingEdits::new(&service, "inst-1", "Submission");
        edits.set("title", json!("A model"));

        assert!(edits.save_instance_data().await.is_err());
        assert_eq!(edits.snapshot().get("title"), Some(&json!("A model")));
    }
}
