use crate::errors::{ActionRefused, ActionResult, SkillError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive) of a single magic regeneration.
pub const MAX_MAGIC_REGEN: u32 = 20;

/// Attack count above which a combatant is reported as having won.
pub const COUNTER_VICTORY_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSkill")]
pub struct AttackSkill {
    name: String,
    damage: u32,
    magic_cost: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkill {
    name: String,
    #[serde(default)]
    damage: i32,
    #[serde(default)]
    magic_cost: i32,
}

impl TryFrom<RawSkill> for AttackSkill {
    type Error = SkillError;

    fn try_from(raw: RawSkill) -> Result<Self, Self::Error> {
        AttackSkill::new(raw.name, raw.damage, raw.magic_cost)
    }
}

impl AttackSkill {
    pub fn new(name: impl Into<String>, damage: i32, magic_cost: i32) -> Result<Self, SkillError> {
        let name = name.into();
        if damage < 0 {
            return Err(SkillError::NegativeDamage {
                skill: name,
                damage,
            });
        }
        if magic_cost < 0 {
            return Err(SkillError::NegativeMagicCost {
                skill: name,
                magic_cost,
            });
        }
        Ok(Self {
            name,
            damage: damage as u32,
            magic_cost: magic_cost as u32,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn magic_cost(&self) -> u32 {
        self.magic_cost
    }

    /// Case-insensitive name comparison used for every skill lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Snapshot of a combatant as reported to the player.
///
/// Health and magic are clamped at zero. `counter_victory` is the display-time
/// win observation (`attack_count > 3`); it is not a state transition and is
/// independent of the knockout recorded by [`Combatant::attack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub name: String,
    pub health: u32,
    pub magic: u32,
    pub attack_count: u32,
    pub counter_victory: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has {} health and {} magic left.",
            self.name, self.health, self.magic
        )?;
        if self.counter_victory {
            write!(f, "\n{} has won the battle!", self.name)?;
        }
        Ok(())
    }
}

/// Everything a successful turn changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackOutcome {
    pub attacker: String,
    pub defender: String,
    /// Skill name as the caller spelled it.
    pub skill: String,
    /// Nominal damage of the skill.
    pub damage: u32,
    /// Health actually removed from the defender.
    pub health_lost: u32,
    pub magic_spent: u32,
    pub attacker_status: StatusReport,
    pub defender_status: StatusReport,
    pub knocked_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    name: String,
    health: i32,
    magic: i32,
    skills: Vec<AttackSkill>,
    attack_count: u32,
    defeated: bool,
}

impl Combatant {
    pub fn new(name: impl Into<String>, health: i32, magic: i32) -> Self {
        Self {
            name: name.into(),
            health,
            magic,
            skills: Vec::new(),
            attack_count: 0,
            defeated: false,
        }
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = AttackSkill>) -> Self {
        for skill in skills {
            self.learn_skill(skill);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn magic(&self) -> i32 {
        self.magic
    }

    pub fn skills(&self) -> &[AttackSkill] {
        &self.skills
    }

    pub fn attack_count(&self) -> u32 {
        self.attack_count
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Appends to the known skills; duplicates are kept in insertion order.
    pub fn learn_skill(&mut self, skill: AttackSkill) {
        self.skills.push(skill);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0 && !self.defeated
    }

    /// First known skill whose name matches, ignoring case.
    pub fn find_skill(&self, name: &str) -> Option<&AttackSkill> {
        self.skills.iter().find(|skill| skill.matches(name))
    }

    pub fn has_enough_magic(&self, skill_name: &str) -> bool {
        self.find_skill(skill_name)
            .map(|skill| i64::from(self.magic) >= i64::from(skill.magic_cost))
            .unwrap_or(false)
    }

    /// Checks, in order: self alive, skill known, magic sufficient, opponent alive.
    pub fn can_act(&self, skill_name: &str, opponent: &Combatant) -> ActionResult<&AttackSkill> {
        if !self.is_alive() {
            return Err(ActionRefused::AttackerDown {
                attacker: self.name.clone(),
            });
        }
        let skill = self
            .find_skill(skill_name)
            .ok_or_else(|| ActionRefused::UnknownSkill {
                attacker: self.name.clone(),
                skill: skill_name.to_string(),
            })?;
        if !self.has_enough_magic(skill_name) {
            return Err(ActionRefused::InsufficientMagic {
                attacker: self.name.clone(),
                skill: skill_name.to_string(),
            });
        }
        if !opponent.is_alive() {
            return Err(ActionRefused::TargetDown {
                target: opponent.name.clone(),
            });
        }
        Ok(skill)
    }

    /// Resolves one turn against `opponent`.
    ///
    /// Refusals leave both combatants untouched. On success the attacker pays the
    /// magic cost, the opponent loses up to `damage` health (floored at zero), the
    /// attack counter advances by one, and the opponent is flagged defeated when it
    /// is no longer alive.
    pub fn attack(&mut self, skill_name: &str, opponent: &mut Combatant) -> ActionResult<AttackOutcome> {
        if self.defeated || opponent.defeated {
            return Err(ActionRefused::BattleEnded);
        }
        let (damage, magic_cost) = {
            let skill = self.can_act(skill_name, opponent)?;
            (skill.damage, skill.magic_cost)
        };

        self.magic = (i64::from(self.magic) - i64::from(magic_cost)) as i32;
        let before = opponent.health;
        opponent.health = (i64::from(before) - i64::from(damage)).max(0) as i32;
        self.attack_count = self.attack_count.saturating_add(1);

        let attacker_status = self.show_status();
        let defender_status = opponent.show_status();
        let knocked_out = !opponent.is_alive();
        if knocked_out {
            opponent.defeated = true;
        }
        tracing::debug!(
            attacker = %self.name,
            defender = %opponent.name,
            skill = skill_name,
            damage,
            knocked_out,
            "attack resolved"
        );

        Ok(AttackOutcome {
            attacker: self.name.clone(),
            defender: opponent.name.clone(),
            skill: skill_name.to_string(),
            damage,
            health_lost: (before - opponent.health) as u32,
            magic_spent: magic_cost,
            attacker_status,
            defender_status,
            knocked_out,
        })
    }

    /// Regains between 0 and 20 magic (inclusive) while alive.
    pub fn get_magic<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ActionResult<u32> {
        if !self.is_alive() {
            return Err(ActionRefused::RegenRefused {
                combatant: self.name.clone(),
            });
        }
        let boost = rng.gen_range(0..=MAX_MAGIC_REGEN);
        self.magic = self.magic.saturating_add(boost as i32);
        Ok(boost)
    }

    pub fn show_status(&self) -> StatusReport {
        StatusReport {
            name: self.name.clone(),
            health: self.health.max(0) as u32,
            magic: self.magic.max(0) as u32,
            attack_count: self.attack_count,
            counter_victory: self.attack_count > COUNTER_VICTORY_THRESHOLD,
        }
    }
}
