//! Interface de linha de comando do taskform baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (outcomes, filter,
//! submit) e flags globais (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// taskform — Submete resultados de tarefas de formulários de workflow.
#[derive(Debug, Parser)]
#[command(name = "taskform", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do arquivo de configuração (padrão: ./taskform.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista os resultados (outcomes) declarados por uma definição de formulário.
    Outcomes {
        /// Arquivo JSON com a definição do formulário.
        #[arg(long)]
        form: PathBuf,
    },

    /// Mostra o subconjunto de um objeto JSON que são variáveis de estado.
    Filter {
        /// Arquivo JSON com a descrição do tipo de instância.
        #[arg(long)]
        instance_type: PathBuf,

        /// Objeto JSON a filtrar.
        #[arg(long)]
        state: String,
    },

    /// Submete um resultado de tarefa para uma instância.
    Submit {
        /// Arquivo JSON com a definição do formulário.
        #[arg(long)]
        form: PathBuf,

        /// Arquivo JSON com a descrição do tipo de instância.
        #[arg(long)]
        instance_type: PathBuf,

        /// Identificador da instância.
        #[arg(long)]
        instance: String,

        /// Identificador da tarefa.
        #[arg(long)]
        task: String,

        /// Tipo do resultado a submeter (ex.: "submit").
        #[arg(long)]
        outcome: String,

        /// E-mail do usuário que submete.
        #[arg(long)]
        email: Option<String>,

        /// Indica que o e-mail do usuário já foi validado.
        #[arg(long, default_value_t = false)]
        email_validated: bool,

        /// Edições pendentes (objeto JSON) a salvar antes do resultado.
        #[arg(long)]
        edits: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_submit_subcommand() {
        let cli = Cli::parse_from([
            "taskform",
            "submit",
            "--form",
            "form.json",
            "--instance-type",
            "submission.json",
            "--instance",
            "inst-1",
            "--task",
            "task-7",
            "--outcome",
            "submit",
            "--email",
            "a@example.org",
            "--email-validated",
        ]);
        match cli.command {
            Command::Submit {
                form,
                instance,
                outcome,
                email,
                email_validated,
                edits,
                ..
            } => {
                assert_eq!(form, PathBuf::from("form.json"));
                assert_eq!(instance, "inst-1");
                assert_eq!(outcome, "submit");
                assert_eq!(email.as_deref(), Some("a@example.org"));
                assert!(email_validated);
                assert!(edits.is_none());
            }
            _ => panic!("expected Submit command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "taskform",
            "--config",
            "other.toml",
            "--verbose",
            "outcomes",
            "--form",
            "form.json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert!(matches!(cli.command, Command::Outcomes { .. }));
    }

    #[test]
    fn cli_parses_filter_subcommand() {
        let cli = Cli::parse_from([
            "taskform",
            "filter",
            "--instance-type",
            "submission.json",
            "--state",
            r#"{"phase":"x"}"#,
        ]);
        match cli.command {
            Command::Filter { state, .. } => assert_eq!(state, r#"{"phase":"x"}"#),
            _ => panic!("expected Filter command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
