use crate::errors::ActionResult;
use crate::model::{AttackOutcome, Combatant, StatusReport};
use crate::report::BattleLog;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "A")]
    A,
    #[serde(alias = "B")]
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// The two ways a side can be observed as the winner.
///
/// They are reported separately and never reconciled.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Victory {
    /// The opposing combatant was flagged defeated by an attack.
    Knockout { winner: Side },
    /// The side has landed more than three attacks.
    AttackCount { winner: Side },
}

/// Two combatants, the report log, and the RNG used for magic regeneration.
///
/// Turn order is up to the caller.
#[derive(Debug)]
pub struct Duel {
    side_a: Combatant,
    side_b: Combatant,
    log: BattleLog,
    rng: SmallRng,
    turns: u32,
}

impl Duel {
    pub fn new(side_a: Combatant, side_b: Combatant, seed: u64) -> Self {
        Self {
            side_a,
            side_b,
            log: BattleLog::new(),
            rng: SmallRng::seed_from_u64(seed),
            turns: 0,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.log.set_echo(echo);
        self
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        match side {
            Side::A => (&mut self.side_a, &mut self.side_b),
            Side::B => (&mut self.side_b, &mut self.side_a),
        }
    }

    pub fn attack(&mut self, side: Side, skill_name: &str) -> ActionResult<AttackOutcome> {
        self.turns += 1;
        let (attacker, defender) = self.pair_mut(side);
        let result = attacker.attack(skill_name, defender);
        self.log.log_attack_result(&result);
        result
    }

    pub fn regain_magic(&mut self, side: Side) -> ActionResult<u32> {
        self.turns += 1;
        let combatant = match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        };
        let result = combatant.get_magic(&mut self.rng);
        self.log.log_regen(combatant.name(), &result);
        result
    }

    pub fn show_status(&mut self, side: Side) -> StatusReport {
        let status = self.combatant(side).show_status();
        self.log.log_status(&status);
        status
    }

    /// Attacks and regenerations requested so far, refused ones included.
    pub fn turns_taken(&self) -> u32 {
        self.turns
    }

    pub fn victories(&self) -> Vec<Victory> {
        let mut victories = Vec::new();
        for side in [Side::A, Side::B] {
            if self.combatant(side.opponent()).is_defeated() {
                victories.push(Victory::Knockout { winner: side });
            }
        }
        for side in [Side::A, Side::B] {
            if self.combatant(side).show_status().counter_victory {
                victories.push(Victory::AttackCount { winner: side });
            }
        }
        victories
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn into_log(self) -> BattleLog {
        self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut value = self.log.to_json();
        value["victories"] = serde_json::to_value(self.victories()).unwrap_or_default();
        value["turns"] = self.turns.into();
        value
    }
}
