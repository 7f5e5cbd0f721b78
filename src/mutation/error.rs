//! Tipos de erro para o serviço de mutação de instâncias.
//!
//! Define [`MutationError`] com variantes para erros HTTP, erros GraphQL
//! e respostas inesperadas do servidor. Usa `thiserror` para derivar
//! `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao enviar uma mutação de instância ao servidor.
///
/// Nenhuma destas variantes é corrigível pelo usuário final: todas sobem
/// para quem chamou a submissão sem passar pelos motivos de falha.
#[derive(Debug, Error)]
pub enum MutationError {
    /// O servidor respondeu com um status HTTP de erro (4xx/5xx).
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A resposta GraphQL trouxe um array `errors` não vazio.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// A resposta não trouxe o campo `data.result` da operação.
    #[error("response to {0} carried no result")]
    MissingData(String),

    /// `completeInstanceTask` devolveu um resultado fora dos valores conhecidos.
    #[error("unexpected completion result: {0}")]
    UnexpectedResult(String),

    /// Falha ao serializar o estado enviado como variável.
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = MutationError::Api {
            status: 401,
            message: "Not authenticated".into(),
        };
        assert_eq!(err.to_string(), "API error (status 401): Not authenticated");
    }

    #[test]
    fn unexpected_result_display() {
        let err = MutationError::UnexpectedResult("Pending".into());
        assert_eq!(err.to_string(), "unexpected completion result: Pending");
    }

    #[test]
    fn missing_data_display() {
        let err = MutationError::MissingData("destroyInstance".into());
        assert_eq!(err.to_string(), "response to destroyInstance carried no result");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MutationError>();
    }
}
