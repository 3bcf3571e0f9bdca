//! Orchestrates one full user turn: agent run, SQL disclosure, audit
//! row, session update, and display.

use crate::agent::Agent;
use crate::audit::{AuditLog, AuditRecord, TurnStatus};
use crate::session::ChatSession;
use crate::transcript::{self, Step, NO_SQL_COMMAND};
use crate::ui;

/// Stored and shown in place of an answer when a turn fails partway.
pub const FALLBACK_ASSISTANT_REPLY: &str =
    "Sorry, something went wrong while processing that request. Please try again.";

pub struct TurnOptions {
    /// Whether to print the step transcript after the answer.
    pub show_steps: bool,
}

impl Default for TurnOptions {
    fn default() -> Self {
        Self { show_steps: true }
    }
}

/// Drive a single instruction through the agent and report how the turn
/// ended. The session always gains exactly one user and one assistant
/// message, whatever happens in between.
pub async fn run_turn(
    agent: &dyn Agent,
    audit: &AuditLog,
    session: &mut ChatSession,
    instruction: &str,
    options: &TurnOptions,
) -> TurnStatus {
    // History excludes the instruction itself; the agent receives that
    // separately.
    let history = session.messages().to_vec();
    session.push_user(instruction);

    match agent.run(instruction, &history).await {
        Ok(outcome) => {
            let sql = transcript::extract_sql_command(&outcome.steps);

            let mut answer = outcome.final_answer.clone();
            if sql != NO_SQL_COMMAND {
                answer.push_str(&format!("\n\nSQL command used: `{}`", sql));
            }

            let record = AuditRecord::new(instruction, TurnStatus::Finished, &answer, &sql);
            if let Err(err) = audit.record(&record) {
                ui::warn_audit_failure(&err);
            }

            session.push_assistant(&answer);
            ui::print_assistant(&answer);

            if options.show_steps && !outcome.steps.is_empty() {
                let mut steps = outcome.steps;
                steps.push(Step::Finish {
                    final_output: answer,
                });
                ui::print_transcript(&transcript::render_transcript(&steps));
            }

            TurnStatus::Finished
        }
        Err(err) => {
            ui::print_turn_error(&err);

            session.push_assistant(FALLBACK_ASSISTANT_REPLY);
            ui::print_assistant(FALLBACK_ASSISTANT_REPLY);

            let record = AuditRecord::new(
                instruction,
                TurnStatus::Error,
                FALLBACK_ASSISTANT_REPLY,
                NO_SQL_COMMAND,
            );
            if let Err(audit_err) = audit.record(&record) {
                ui::warn_audit_failure(&audit_err);
            }

            TurnStatus::Error
        }
    }
}
