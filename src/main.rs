mod cli;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use taskform::config::TaskFormConfig;
use taskform::{
    CurrentUser, FormDefinition, GraphQlClient, InstanceTypeDescriptor, PendingEdits,
    SubmissionReceipt, SubmitOptions, SubmitOutcome, TaskOutcomeSubmitter,
};
use ui::SubmitProgress;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Outcomes { form } => {
            let form = FormDefinition::load(&form)
                .with_context(|| format!("loading form {}", form.display()))?;
            ui::print_outcomes(&form);
        }
        Command::Filter {
            instance_type,
            state,
        } => {
            let instance_type = InstanceTypeDescriptor::load(&instance_type)
                .with_context(|| format!("loading instance type {}", instance_type.display()))?;
            let payload = parse_object(&state, "--state")?;
            let filtered = instance_type.filter_object_to_state_variables(&payload);
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        Command::Submit {
            form,
            instance_type,
            instance,
            task,
            outcome,
            email,
            email_validated,
            edits,
        } => {
            let config = match &cli.config {
                Some(path) => TaskFormConfig::load_from(path)?,
                None => TaskFormConfig::load()?,
            };
            let form = FormDefinition::load(&form)
                .with_context(|| format!("loading form {}", form.display()))?;
            let instance_type = InstanceTypeDescriptor::load(&instance_type)
                .with_context(|| format!("loading instance type {}", instance_type.display()))?;

            let client = GraphQlClient::with_timeouts(
                &config.endpoint,
                config.connect_timeout(),
                config.timeout(),
            )?
            .with_api_token(config.api_token.clone());

            let pending = PendingEdits::new(&client, &instance, &instance_type.name);
            if let Some(edits) = edits {
                pending.extend(parse_object(&edits, "--edits")?);
            }

            let user = signed_in_user(email, email_validated);
            let options = SubmitOptions {
                current_user: user.as_ref(),
                validate_form: None,
            };

            let submitter =
                TaskOutcomeSubmitter::new(&instance, &form, &instance_type, &client, &pending);
            let progress = SubmitProgress::start(&outcome, submitter.instance_id());

            let result = match submitter.submit(&task, &outcome, options).await {
                Ok(result) => result,
                Err(e) => {
                    progress.abort(&e.to_string());
                    return Err(e.into());
                }
            };

            progress.complete(&result);
            let receipt = SubmissionReceipt::new(
                submitter.instance_id(),
                &task,
                &form.name,
                &outcome,
                &result,
            );
            progress.print_receipt(&receipt)?;

            if matches!(result, SubmitOutcome::Failed(_)) {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// No email means nobody is signed in.
fn signed_in_user(email: Option<String>, email_validated: bool) -> Option<CurrentUser> {
    email.map(|email| CurrentUser {
        email: Some(email),
        email_is_validated: email_validated,
    })
}

fn parse_object(json: &str, flag: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json).with_context(|| format!("parsing {flag}"))? {
        Value::Object(map) => Ok(map),
        other => bail!("{flag} must be a JSON object, got {other}"),
    }
}
