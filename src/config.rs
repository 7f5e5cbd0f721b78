//! Configuração do taskform carregada a partir de `taskform.toml`.
//!
//! A struct [`TaskFormConfig`] contém o endpoint GraphQL, o token de acesso
//! e os timeouts do cliente HTTP. Valores ausentes no arquivo usam defaults.
//! As variáveis de ambiente `TASKFORM_ENDPOINT` e `TASKFORM_API_TOKEN` têm
//! precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "taskform.toml";

/// Configuração de nível superior carregada de `taskform.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskFormConfig {
    /// URL do endpoint GraphQL que recebe as mutações de instância.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Token enviado como `Authorization: Bearer`. Vazio desativa o cabeçalho.
    #[serde(default)]
    pub api_token: String,

    /// Timeout total de cada requisição, em segundos.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout de conexão, em segundos.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

// Endpoint padrão: servidor GraphQL local.
fn default_endpoint() -> String {
    "http://localhost:3000/graphql".to_string()
}

// Timeout padrão por requisição: 30s.
fn default_timeout_secs() -> u64 {
    30
}

// Timeout padrão de conexão: 10s.
fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for TaskFormConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl TaskFormConfig {
    /// Carrega a configuração de `taskform.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Carrega a configuração do caminho informado, aplicando as variáveis de ambiente.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<TaskFormConfig>(&contents)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            Self::default()
        };

        // Variáveis de ambiente têm precedência sobre o arquivo.
        if let Ok(endpoint) = std::env::var("TASKFORM_ENDPOINT")
            && !endpoint.is_empty()
        {
            config.endpoint = endpoint;
        }
        if let Ok(token) = std::env::var("TASKFORM_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = token;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = TaskFormConfig::default();
        assert_eq!(config.endpoint, "http://localhost:3000/graphql");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            endpoint = "https://models.example.org/graphql"
            timeout_secs = 5
        "#;
        let config: TaskFormConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint, "https://models.example.org/graphql");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn load_from_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskFormConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskform.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let err = TaskFormConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }
}
