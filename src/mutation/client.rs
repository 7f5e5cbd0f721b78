use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::MutationError;
use super::types::{
    COMPLETE_INSTANCE_TASK, CompletionResult, DESTROY_INSTANCE, GraphQlRequest, GraphQlResponse,
    UPDATE_INSTANCE,
};
use super::InstanceMutationService;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`InstanceMutationService`] backed by a GraphQL endpoint.
pub struct GraphQlClient {
    endpoint: String,
    api_token: Option<String>,
    client: Client,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, MutationError> {
        Self::with_timeouts(endpoint, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    pub fn with_timeouts(
        endpoint: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, MutationError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_token: None,
            client,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request. An empty token is ignored.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs one mutation and returns its aliased `result` field, which may be absent or null.
    async fn execute(
        &self,
        operation_name: &str,
        query: &str,
        variables: Value,
    ) -> Result<Option<Value>, MutationError> {
        let request_id = Uuid::new_v4().to_string();
        debug!(operation = operation_name, request_id = %request_id, "Sending mutation");

        let body = GraphQlRequest {
            operation_name,
            query,
            variables,
        };
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("x-request-id", &request_id)
            .json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(operation = operation_name, status = status.as_u16(), "Mutation rejected");
            return Err(MutationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<GraphQlResponse>().await?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(MutationError::GraphQl(messages.join("; ")));
        }

        Ok(body.data.and_then(|data| data.result))
    }
}

impl InstanceMutationService for GraphQlClient {
    async fn complete_task(
        &self,
        instance_id: &str,
        instance_type: &str,
        task_id: &str,
        form_name: &str,
        outcome_type: &str,
        state: &Map<String, Value>,
    ) -> Result<CompletionResult, MutationError> {
        let variables = json!({
            "id": instance_id,
            "type": instance_type,
            "taskId": task_id,
            "form": form_name,
            "outcome": outcome_type,
            "state": serde_json::to_string(state)?,
        });
        let result = self
            .execute("CompleteInstanceTask", COMPLETE_INSTANCE_TASK, variables)
            .await?
            .ok_or_else(|| MutationError::MissingData("CompleteInstanceTask".to_string()))?;

        let result: CompletionResult = match result {
            Value::String(s) => s.parse()?,
            other => return Err(MutationError::UnexpectedResult(other.to_string())),
        };
        debug!(task = task_id, result = %result, "Task completion answered");
        Ok(result)
    }

    async fn destroy_instance(
        &self,
        instance_id: &str,
        instance_type: &str,
        state: &Map<String, Value>,
    ) -> Result<(), MutationError> {
        let variables = json!({
            "id": instance_id,
            "type": instance_type,
            "state": serde_json::to_string(state)?,
        });
        // Whatever the server returns, including null, is not inspected.
        self.execute("DestroyInstance", DESTROY_INSTANCE, variables)
            .await?;
        Ok(())
    }

    async fn update_instance(
        &self,
        instance_id: &str,
        instance_type: &str,
        changes: &Map<String, Value>,
    ) -> Result<(), MutationError> {
        let variables = json!({
            "id": instance_id,
            "type": instance_type,
            "changes": serde_json::to_string(changes)?,
        });
        self.execute("UpdateInstance", UPDATE_INSTANCE, variables)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_ignored() {
        let client = GraphQlClient::new("http://localhost/graphql")
            .unwrap()
            .with_api_token("");
        assert!(client.api_token.is_none());
    }

    #[test]
    fn token_is_kept() {
        let client = GraphQlClient::new("http://localhost/graphql")
            .unwrap()
            .with_api_token("secret");
        assert_eq!(client.api_token.as_deref(), Some("secret"));
        assert_eq!(client.endpoint(), "http://localhost/graphql");
    }
}
