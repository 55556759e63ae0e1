use crate::errors::{ActionRefused, ActionResult};
use crate::model::{AttackOutcome, StatusReport};
use serde_json::json;

/// Ordered record of everything the battle reported.
///
/// Lines are stored verbatim; when `echo` is set they are also printed to
/// stdout as they arrive.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    log: Vec<String>,
    echo: bool,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    fn record(&mut self, line: String) {
        if self.echo {
            println!("{line}");
        }
        self.log.push(line);
    }

    fn push(&mut self, line: String) {
        tracing::info!(target: "battle", "{}", line);
        self.record(line);
    }

    pub fn log_refusal(&mut self, refusal: &ActionRefused) {
        tracing::warn!(target: "battle", ?refusal, "action refused");
        self.record(refusal.to_string());
    }

    pub fn log_status(&mut self, status: &StatusReport) {
        for line in status.to_string().lines() {
            self.push(line.to_string());
        }
    }

    pub fn log_attack(&mut self, outcome: &AttackOutcome) {
        self.push(format!(
            "{} used {} and dealt {} damage to {}.",
            outcome.attacker, outcome.skill, outcome.damage, outcome.defender
        ));
        self.log_status(&outcome.attacker_status);
        self.log_status(&outcome.defender_status);
        if outcome.knocked_out {
            self.push(format!(
                "{} has been defeated! {} wins the battle!",
                outcome.defender, outcome.attacker
            ));
        }
    }

    pub fn log_attack_result(&mut self, result: &ActionResult<AttackOutcome>) {
        match result {
            Ok(outcome) => self.log_attack(outcome),
            Err(refusal) => self.log_refusal(refusal),
        }
    }

    pub fn log_regen(&mut self, name: &str, result: &ActionResult<u32>) {
        match result {
            Ok(amount) => self.push(format!("{name} regained {amount} magic.")),
            Err(refusal) => self.log_refusal(refusal),
        }
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "log": self.log })
    }
}
