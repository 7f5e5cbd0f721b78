//! Tipos de dados para requisições e respostas GraphQL das mutações de instância.
//!
//! O corpo segue o formato `{ "query": ..., "variables": ... }` e a resposta
//! `{ "data": { "result": ... }, "errors": [...] }`, com o campo da mutação
//! sempre apelidado como `result`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::MutationError;

pub const COMPLETE_INSTANCE_TASK: &str = "mutation CompleteInstanceTask($id: ID!, $type: String!, $taskId: String!, $form: String!, $outcome: String!, $state: String) {
  result: completeInstanceTask(id: $id, type: $type, taskId: $taskId, form: $form, outcome: $outcome, state: $state)
}";

pub const DESTROY_INSTANCE: &str = "mutation DestroyInstance($id: ID!, $type: String!, $state: String) {
  result: destroyInstance(id: $id, type: $type, state: $state)
}";

pub const UPDATE_INSTANCE: &str = "mutation UpdateInstance($id: ID!, $type: String!, $changes: String!) {
  result: updateInstance(id: $id, type: $type, changes: $changes)
}";

/// Corpo de uma requisição GraphQL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: Value,
}

/// Resposta GraphQL com o campo da mutação apelidado como `result`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    /// `None` quando a operação falhou antes de produzir dados.
    #[serde(default)]
    pub data: Option<ResultData>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultData {
    #[serde(default)]
    pub result: Option<Value>,
}

/// Uma entrada do array `errors` da resposta.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

/// Resultado de uma tentativa remota de concluir uma tarefa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionResult {
    Success,
    ValidationFailed,
    /// O servidor também exige um e-mail validado do submissor.
    ValidatedEmailRequired,
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionResult::Success => write!(f, "Success"),
            CompletionResult::ValidationFailed => write!(f, "ValidationFailed"),
            CompletionResult::ValidatedEmailRequired => write!(f, "ValidatedEmailRequired"),
        }
    }
}

impl FromStr for CompletionResult {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Success" => Ok(CompletionResult::Success),
            "ValidationFailed" => Ok(CompletionResult::ValidationFailed),
            "ValidatedEmailRequired" => Ok(CompletionResult::ValidatedEmailRequired),
            other => Err(MutationError::UnexpectedResult(other.to_string())),
        }
    }
}
