//! JSON battle scripts: who fights, what they know, and the turns to replay.

use crate::battle::{Duel, Side};
use crate::catalog::{combatant_preset, preset_skill};
use crate::model::{AttackSkill, Combatant};
use anyhow::{anyhow, bail, Context};
use serde::Deserialize;

const DEMO_SCRIPT: &str = include_str!("../scripts/demo.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSpec {
    pub name: String,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub magic: Option<i32>,
    /// Skill names; when absent a preset combatant keeps its own list.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TurnSpec {
    Attack { actor: Side, skill: String },
    RegainMagic { actor: Side },
    Status { actor: Side },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleScript {
    #[serde(default)]
    pub seed: u64,
    /// Skills defined by the script; they shadow catalog entries of the same name.
    #[serde(default)]
    pub skills: Vec<AttackSkill>,
    pub side_a: CombatantSpec,
    pub side_b: CombatantSpec,
    #[serde(default)]
    pub turns: Vec<TurnSpec>,
}

impl BattleScript {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("Failed to parse battle script JSON")
    }

    /// Pikachu against Bulbasaur, six attacks, the last one after the knockout.
    pub fn demo() -> anyhow::Result<Self> {
        Self::from_json(DEMO_SCRIPT).context("Bundled demo script is invalid")
    }

    fn resolve_skill(&self, name: &str) -> anyhow::Result<AttackSkill> {
        self.skills
            .iter()
            .find(|skill| skill.matches(name))
            .cloned()
            .or_else(|| preset_skill(name))
            .ok_or_else(|| anyhow!("Unknown skill '{}' (not defined in script or catalog)", name))
    }

    fn resolve_combatant(&self, spec: &CombatantSpec) -> anyhow::Result<Combatant> {
        let preset = combatant_preset(&spec.name);
        let health = spec
            .health
            .or(preset.map(|p| p.health))
            .ok_or_else(|| anyhow!("Combatant '{}' needs a health value", spec.name))?;
        let magic = spec
            .magic
            .or(preset.map(|p| p.magic))
            .ok_or_else(|| anyhow!("Combatant '{}' needs a magic value", spec.name))?;

        let mut combatant = Combatant::new(spec.name.clone(), health, magic);
        match &spec.skills {
            Some(names) => {
                for name in names {
                    let skill = self
                        .resolve_skill(name)
                        .with_context(|| format!("While teaching {}", spec.name))?;
                    combatant.learn_skill(skill);
                }
            }
            None => {
                if let Some(preset) = preset {
                    for skill in preset.skills() {
                        combatant.learn_skill(skill);
                    }
                }
            }
        }
        Ok(combatant)
    }

    /// Builds the duel without replaying any turn.
    pub fn build_duel(&self, seed: u64) -> anyhow::Result<Duel> {
        if self.side_a.name.trim().is_empty() || self.side_b.name.trim().is_empty() {
            bail!("Both sides need a combatant name");
        }
        let side_a = self.resolve_combatant(&self.side_a)?;
        let side_b = self.resolve_combatant(&self.side_b)?;
        Ok(Duel::new(side_a, side_b, seed))
    }

    /// Replays every turn in order. Refused actions are logged and skipped.
    pub fn play(&self, seed: u64, echo: bool) -> anyhow::Result<Duel> {
        let mut duel = self.build_duel(seed)?.with_echo(echo);
        for (idx, turn) in self.turns.iter().enumerate() {
            tracing::debug!(turn = idx + 1, ?turn, "replaying turn");
            match turn {
                TurnSpec::Attack { actor, skill } => {
                    let _ = duel.attack(*actor, skill);
                }
                TurnSpec::RegainMagic { actor } => {
                    let _ = duel.regain_magic(*actor);
                }
                TurnSpec::Status { actor } => {
                    duel.show_status(*actor);
                }
            }
        }
        Ok(duel)
    }
}
