//! Two-combatant skill battle: attack resolution, magic regeneration and
//! status reporting, plus a script driver that sequences the turns.
//!
//! The core lives in [`model::Combatant`]; [`battle::Duel`] seats two of them.

pub mod battle;
pub mod catalog;
pub mod errors;
pub mod model;
pub mod report;
pub mod script;

pub use crate::battle::{Duel, Side, Victory};
pub use crate::errors::{ActionRefused, ActionResult, SkillError};
pub use crate::model::{AttackOutcome, AttackSkill, Combatant, StatusReport};
pub use crate::report::BattleLog;
pub use crate::script::BattleScript;

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset, empty or unparsable.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Builds the log filter from `RUST_LOG`-style directives, falling back to
/// [`DEFAULT_LOG_DIRECTIVE`] only when none are usable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    /// Battle script; the bundled demo when absent.
    pub script_path: Option<PathBuf>,
    /// Overrides the script's own seed.
    pub seed: Option<u64>,
    pub log_json: Option<PathBuf>,
    pub quiet: bool,
}

pub fn load_script(path: &Path) -> anyhow::Result<BattleScript> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read battle script at {}", path.display()))?;
    BattleScript::from_json(&raw).with_context(|| format!("Invalid battle script {}", path.display()))
}

pub fn run(opts: CliOptions) -> anyhow::Result<Duel> {
    let script = match &opts.script_path {
        Some(path) => load_script(path)?,
        None => BattleScript::demo()?,
    };
    let seed = opts.seed.unwrap_or(script.seed);
    tracing::info!(
        side_a = %script.side_a.name,
        side_b = %script.side_b.name,
        turns = script.turns.len(),
        seed,
        "starting battle"
    );
    let duel = script.play(seed, !opts.quiet)?;

    let victories = duel.victories();
    if victories.is_empty() {
        tracing::info!("no winner after {} turns", duel.turns_taken());
    }
    for victory in &victories {
        tracing::info!(?victory, "victory observed");
    }

    if let Some(path) = &opts.log_json {
        let body = serde_json::to_string_pretty(&duel.to_json())?;
        std::fs::write(path, body + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(duel)
}
