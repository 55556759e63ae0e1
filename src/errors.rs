use std::fmt;

/// Rejected `AttackSkill` construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    /// Damage must be zero or more
    NegativeDamage { skill: String, damage: i32 },
    /// Magic cost must be zero or more
    NegativeMagicCost { skill: String, magic_cost: i32 },
}

/// Why a requested action did not happen.
///
/// A refusal never mutates either combatant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRefused {
    /// One of the two combatants is already flagged defeated
    BattleEnded,
    /// The acting combatant is not alive
    AttackerDown { attacker: String },
    /// The acting combatant does not know the requested skill
    UnknownSkill { attacker: String, skill: String },
    /// The acting combatant cannot pay the skill's magic cost
    InsufficientMagic { attacker: String, skill: String },
    /// The target is not alive
    TargetDown { target: String },
    /// Magic regeneration asked of a combatant that is not alive
    RegenRefused { combatant: String },
}

impl fmt::Display for SkillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillError::NegativeDamage { skill, damage } => {
                write!(f, "skill {} has negative damage {}", skill, damage)
            }
            SkillError::NegativeMagicCost { skill, magic_cost } => {
                write!(f, "skill {} has negative magic cost {}", skill, magic_cost)
            }
        }
    }
}

impl fmt::Display for ActionRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRefused::BattleEnded => write!(f, "The battle has already ended."),
            ActionRefused::AttackerDown { attacker } => {
                write!(f, "{} is defeated and can't attack.", attacker)
            }
            ActionRefused::UnknownSkill { attacker, skill } => {
                write!(f, "{} doesn't know the skill {}.", attacker, skill)
            }
            ActionRefused::InsufficientMagic { attacker, skill } => {
                write!(f, "{} doesn't have enough magic to use {}.", attacker, skill)
            }
            ActionRefused::TargetDown { target } => {
                write!(f, "{} is defeated and can't be attacked.", target)
            }
            ActionRefused::RegenRefused { combatant } => {
                write!(f, "{} cannot regain magic because it is defeated.", combatant)
            }
        }
    }
}

impl std::error::Error for SkillError {}
impl std::error::Error for ActionRefused {}

/// Type alias for the outcome of a combatant action
pub type ActionResult<T> = Result<T, ActionRefused>;
