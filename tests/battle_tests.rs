use pokemon_skill_battle::battle::{Duel, Side, Victory};
use pokemon_skill_battle::errors::ActionRefused;
use pokemon_skill_battle::model::{AttackSkill, Combatant, MAX_MAGIC_REGEN};
use pokemon_skill_battle::script::BattleScript;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn make_skill(name: &str, damage: i32, magic_cost: i32) -> AttackSkill {
    AttackSkill::new(name, damage, magic_cost).expect("non-negative skill")
}

fn make_pair() -> (Combatant, Combatant) {
    let lightning = make_skill("Lightning", 40, 30);
    let poison_seed = make_skill("Poison Seed", 20, 20);
    let mut pikachu = Combatant::new("Pikachu", 120, 80);
    pikachu.learn_skill(lightning);
    let mut bulbasaur = Combatant::new("Bulbasaur", 95, 105);
    bulbasaur.learn_skill(poison_seed);
    (pikachu, bulbasaur)
}

#[test]
fn pikachu_and_bulbasaur_trade_blows() {
    let (mut pikachu, mut bulbasaur) = make_pair();

    pikachu
        .attack("Lightning", &mut bulbasaur)
        .expect("pikachu can attack");
    assert_eq!(pikachu.magic(), 50);
    assert_eq!(bulbasaur.health(), 55);
    assert_eq!(pikachu.attack_count(), 1);
    assert!(!bulbasaur.is_defeated());

    bulbasaur
        .attack("Poison Seed", &mut pikachu)
        .expect("bulbasaur can attack");
    assert_eq!(bulbasaur.magic(), 85);
    assert_eq!(pikachu.health(), 100);
}

#[test]
fn successful_attack_mutates_exactly_cost_damage_and_counter() {
    let mut attacker = Combatant::new("Machop", 60, 25).with_skills([make_skill("Karate Chop", 50, 25)]);
    let mut defender = Combatant::new("Rattata", 30, 5);
    let outcome = attacker
        .attack("karate chop", &mut defender)
        .expect("enough magic");
    assert_eq!(attacker.magic(), 0);
    assert_eq!(attacker.attack_count(), 1);
    assert_eq!(defender.health(), 0);
    assert_eq!(outcome.damage, 50);
    assert_eq!(outcome.health_lost, 30);
    assert_eq!(outcome.magic_spent, 25);
    assert!(outcome.knocked_out);
    assert!(defender.is_defeated());
    assert!(!defender.is_alive());
}

#[test]
fn insufficient_magic_changes_nothing() {
    let mut attacker = Combatant::new("Slowpoke", 90, 10).with_skills([make_skill("Psychic", 60, 11)]);
    let mut defender = Combatant::new("Pidgey", 40, 40);
    let before = (attacker.clone(), defender.clone());
    let refused = attacker.attack("Psychic", &mut defender);
    assert_eq!(
        refused,
        Err(ActionRefused::InsufficientMagic {
            attacker: "Slowpoke".to_string(),
            skill: "Psychic".to_string(),
        })
    );
    assert_eq!((attacker, defender), before);
}

#[test]
fn can_act_reports_first_failing_check() {
    let dead = Combatant::new("Zubat", 0, 0);
    let alive = Combatant::new("Geodude", 50, 0).with_skills([make_skill("Tackle", 5, 10)]);
    let target_down = Combatant::new("Weedle", -3, 0);

    // Self down is reported before the unknown skill.
    assert_eq!(
        dead.can_act("Nothing", &alive).unwrap_err(),
        ActionRefused::AttackerDown {
            attacker: "Zubat".to_string()
        }
    );
    // Unknown skill before the (also failing) target check.
    assert!(matches!(
        alive.can_act("Bite", &target_down),
        Err(ActionRefused::UnknownSkill { .. })
    ));
    // Magic before target.
    assert!(matches!(
        alive.can_act("tackle", &target_down),
        Err(ActionRefused::InsufficientMagic { .. })
    ));
    let rich = Combatant::new("Geodude", 50, 10).with_skills([make_skill("Tackle", 5, 10)]);
    assert_eq!(
        rich.can_act("TACKLE", &target_down).unwrap_err(),
        ActionRefused::TargetDown {
            target: "Weedle".to_string()
        }
    );
    assert_eq!(rich.can_act("Tackle", &alive).map(AttackSkill::name), Ok("Tackle"));
}

#[test]
fn target_with_no_health_is_refused_but_not_flagged() {
    let mut attacker = Combatant::new("Jigglypuff", 50, 50).with_skills([make_skill("Pound", 10, 0)]);
    let mut target = Combatant::new("Diglett", 0, 0);
    let refused = attacker.attack("Pound", &mut target);
    assert!(matches!(refused, Err(ActionRefused::TargetDown { .. })));
    assert!(!target.is_defeated());
    assert_eq!(attacker.attack_count(), 0);
}

#[test]
fn defeated_pair_only_reports_battle_ended() {
    let mut winner = Combatant::new("Gengar", 60, 100).with_skills([make_skill("Shadow Ball", 80, 10)]);
    let mut loser = Combatant::new("Paras", 35, 100).with_skills([make_skill("Scratch", 10, 0)]);
    winner.attack("Shadow Ball", &mut loser).expect("knockout");
    assert!(loser.is_defeated());

    let before = (winner.clone(), loser.clone());
    assert_eq!(winner.attack("Shadow Ball", &mut loser), Err(ActionRefused::BattleEnded));
    assert_eq!(loser.attack("Scratch", &mut winner), Err(ActionRefused::BattleEnded));
    assert_eq!((winner, loser), before);
}

#[test]
fn regain_magic_refused_when_down() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut fainted = Combatant::new("Voltorb", 0, 12);
    assert_eq!(
        fainted.get_magic(&mut rng),
        Err(ActionRefused::RegenRefused {
            combatant: "Voltorb".to_string()
        })
    );
    assert_eq!(fainted.magic(), 12);
}

#[test]
fn regain_magic_covers_whole_range_over_many_seeds() {
    let mut seen = [false; MAX_MAGIC_REGEN as usize + 1];
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut mon = Combatant::new("Clefairy", 70, 0);
        for _ in 0..20 {
            let gained = mon.get_magic(&mut rng).expect("alive");
            assert!(gained <= MAX_MAGIC_REGEN);
            seen[gained as usize] = true;
        }
    }
    assert!(seen.iter().all(|hit| *hit), "every amount in 0..=20 should appear");
}

#[test]
fn duel_regen_is_deterministic_for_seed() {
    let run = |seed| {
        let (a, b) = make_pair();
        let mut duel = Duel::new(a, b, seed);
        (0..5)
            .map(|_| duel.regain_magic(Side::B).expect("alive"))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn both_victory_rules_can_hold_at_once() {
    let a = Combatant::new("Scyther", 100, 0).with_skills([make_skill("Fury Cutter", 10, 0)]);
    let b = Combatant::new("Metapod", 40, 0);
    let mut duel = Duel::new(a, b, 0);
    for _ in 0..4 {
        duel.attack(Side::A, "Fury Cutter").expect("turn resolves");
    }
    assert_eq!(
        duel.victories(),
        vec![
            Victory::Knockout { winner: Side::A },
            Victory::AttackCount { winner: Side::A },
        ]
    );
}

#[test]
fn demo_script_ends_with_bulbasaur_defeated() {
    let script = BattleScript::demo().expect("bundled demo parses");
    for seed in [0, 1, 99] {
        let duel = script.play(seed, false).expect("demo resolves");
        let pikachu = duel.combatant(Side::A);
        let bulbasaur = duel.combatant(Side::B);
        assert!(bulbasaur.is_defeated());
        assert_eq!(bulbasaur.health(), 0);
        assert_eq!(pikachu.health(), 60);
        assert_eq!(pikachu.magic(), 0);
        assert_eq!(pikachu.attack_count(), 3);
        assert_eq!(duel.victories(), vec![Victory::Knockout { winner: Side::A }]);
        assert_eq!(
            duel.log().log_lines().last().map(String::as_str),
            Some("The battle has already ended.")
        );
    }
}

#[test]
fn unknown_script_skill_is_rejected() {
    let script = BattleScript::from_json(
        r#"{ "sideA": { "name": "Pikachu", "skills": ["Hyper Beam"] }, "sideB": { "name": "Bulbasaur" } }"#,
    )
    .expect("valid json");
    let err = script.build_duel(0).expect_err("unknown skill");
    assert!(format!("{err:#}").contains("Hyper Beam"));
}
