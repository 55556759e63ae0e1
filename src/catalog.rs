//! Built-in skills and combatants, keyed by lowercase name.

use crate::model::{AttackSkill, Combatant};
use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct SkillPreset {
    pub name: &'static str,
    pub damage: u32,
    pub magic_cost: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct CombatantPreset {
    pub name: &'static str,
    pub health: i32,
    pub magic: i32,
    pub skills: &'static [&'static str],
}

pub static SKILLS: phf::Map<&'static str, SkillPreset> = phf_map! {
    "lightning" => SkillPreset { name: "Lightning", damage: 40, magic_cost: 30 },
    "poison seed" => SkillPreset { name: "Poison Seed", damage: 20, magic_cost: 20 },
};

pub static COMBATANTS: phf::Map<&'static str, CombatantPreset> = phf_map! {
    "pikachu" => CombatantPreset {
        name: "Pikachu",
        health: 120,
        magic: 80,
        skills: &["lightning", "poison seed"],
    },
    "bulbasaur" => CombatantPreset {
        name: "Bulbasaur",
        health: 95,
        magic: 105,
        skills: &["lightning", "poison seed"],
    },
};

impl SkillPreset {
    pub fn to_skill(&self) -> Option<AttackSkill> {
        let damage = i32::try_from(self.damage).ok()?;
        let magic_cost = i32::try_from(self.magic_cost).ok()?;
        AttackSkill::new(self.name, damage, magic_cost).ok()
    }
}

impl CombatantPreset {
    pub fn skills(&self) -> impl Iterator<Item = AttackSkill> + '_ {
        self.skills.iter().filter_map(|name| preset_skill(name))
    }

    pub fn to_combatant(&self) -> Combatant {
        Combatant::new(self.name, self.health, self.magic).with_skills(self.skills())
    }
}

pub fn preset_skill(name: &str) -> Option<AttackSkill> {
    SKILLS
        .get(name.to_lowercase().as_str())
        .and_then(SkillPreset::to_skill)
}

pub fn combatant_preset(name: &str) -> Option<&'static CombatantPreset> {
    COMBATANTS.get(name.to_lowercase().as_str())
}

pub fn preset_combatant(name: &str) -> Option<Combatant> {
    combatant_preset(name).map(CombatantPreset::to_combatant)
}
