//! Interface de terminal do taskform — spinner e saída colorida.
//!
//! Usa `indicatif` para o spinner durante a submissão e `console` para
//! estilização com cores. O [`SubmitProgress`] acompanha visualmente
//! uma submissão no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use taskform::form::FormDefinition;
use taskform::submitter::{SubmissionReceipt, SubmitOutcome};

/// Indicador visual de progresso para uma submissão no terminal.
///
/// Exibe um spinner enquanto as mutações estão em andamento e mensagens
/// coloridas para sucesso (verde) e recusa (vermelho).
pub struct SubmitProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl SubmitProgress {
    /// Inicia o spinner com o tipo de resultado submetido.
    pub fn start(outcome_type: &str, instance_id: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{outcome_type} → {instance_id}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Finaliza o spinner e exibe o resultado da submissão.
    pub fn complete(&self, outcome: &SubmitOutcome) {
        self.pb.finish_and_clear();
        match outcome {
            SubmitOutcome::Submitted { outcome, .. } => {
                println!(
                    "  {} {} ({}) submitted",
                    self.green.apply_to("✓"),
                    outcome.outcome_type,
                    outcome.result
                );
            }
            SubmitOutcome::Failed(reason) => {
                println!("  {} Submission refused: {reason}", self.red.apply_to("✗"));
            }
        }
    }

    /// Finaliza o spinner após um erro fatal.
    pub fn abort(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }

    /// Imprime o recibo da submissão em JSON com estilo colorido.
    pub fn print_receipt(&self, receipt: &SubmissionReceipt) -> serde_json::Result<()> {
        let style = if receipt.succeeded() {
            &self.green
        } else {
            &self.yellow
        };
        println!();
        println!("{}", style.apply_to("─── Submission Receipt ───"));
        println!("{}", serde_json::to_string_pretty(receipt)?);
        Ok(())
    }
}

/// Lista os resultados de um formulário, um por linha.
pub fn print_outcomes(form: &FormDefinition) {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    println!("{}", bold.apply_to(&form.name));
    for outcome in &form.outcomes {
        let mut flags = Vec::new();
        if outcome.requires_validated_submitter {
            flags.push("validated submitter");
        }
        if outcome.skip_validations {
            flags.push("skips validation");
        }
        println!(
            "  {:<20} {:<9} {}",
            outcome.outcome_type,
            outcome.result.to_string(),
            dim.apply_to(flags.join(", "))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskform::SubmitFailureReason;

    #[test]
    fn print_receipt_handles_refused_submission() {
        let progress = SubmitProgress::start("submit", "inst-1");
        let receipt = SubmissionReceipt::new(
            "inst-1",
            "task-7",
            "submission-form",
            "submit",
            &SubmitOutcome::Failed(SubmitFailureReason::FormValidationFailed),
        );
        progress.complete(&SubmitOutcome::Failed(SubmitFailureReason::FormValidationFailed));
        assert!(progress.print_receipt(&receipt).is_ok());
    }
}
