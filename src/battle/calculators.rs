use crate::battle::battler::BattlerId;
use crate::battle::modifiers::{HolderRole, MoveHook};
use crate::battle::state::{BattleContext, BattleRng};
use crate::battle::stats::effective_stat_at_stage;
use crate::pokemon::StatusCondition;
use schema::{BattleStat, CriticalOverride, MoveCategory, MoveData, PokemonType, StatKind};

/// Accumulator threaded through every registered damage modifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageMultipliers {
    pub power: f64,
    pub attack: f64,
    pub defense: f64,
    pub type_multiplier: f64,
    pub final_damage: f64,
}

impl Default for DamageMultipliers {
    fn default() -> Self {
        Self {
            power: 1.0,
            attack: 1.0,
            defense: 1.0,
            type_multiplier: 1.0,
            final_damage: 1.0,
        }
    }
}

/// Outcome of one damage computation, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageCalculation {
    pub damage: u32,
    pub critical: bool,
    pub multipliers: DamageMultipliers,
}

/// Product of the move type against every type of the target.
pub fn type_multiplier(ctx: &BattleContext, target: BattlerId, move_data: &MoveData) -> f64 {
    PokemonType::combined_effectiveness(move_data.move_type, ctx.battler(target).types()) as f64
}

/// Decide whether this hit is critical. Draws from `rng` only when the outcome is
/// not already fixed by the move, a crit guard, or a guaranteed ratio.
pub fn roll_critical_hit(
    ctx: &BattleContext,
    user: BattlerId,
    target: BattlerId,
    move_data: &'static MoveData,
    target_count: usize,
    rng: &mut BattleRng,
) -> bool {
    let attacker = ctx.battler(user);
    let defender = ctx.battler(target);

    let mut stage = move_data.critical_stages as u32;
    for (role, modifier) in ctx.registry.for_move(ctx, attacker, defender) {
        let hook = MoveHook {
            ctx,
            user: attacker,
            target: defender,
            move_data,
            role,
            target_count,
        };
        if modifier.blocks_critical_hits(&hook) {
            return false;
        }
        stage += modifier.critical_stage_bonus(&hook);
    }

    match move_data.critical_override {
        CriticalOverride::Always => true,
        CriticalOverride::Never => false,
        CriticalOverride::Normal => {
            let ratio = ctx.settings.critical_ratio(stage);
            ratio <= 1 || rng.next_below(ratio, "critical hit") == 0
        }
    }
}

/// Compute damage for one hit. `critical` comes from [`roll_critical_hit`]; the
/// variance roll is the only draw made here.
pub fn calculate_damage(
    ctx: &BattleContext,
    user: BattlerId,
    target: BattlerId,
    move_data: &'static MoveData,
    target_count: usize,
    critical: bool,
    rng: &mut BattleRng,
) -> DamageCalculation {
    let attacker = ctx.battler(user);
    let defender = ctx.battler(target);
    let settings = &ctx.settings;

    let mut multipliers = DamageMultipliers {
        type_multiplier: type_multiplier(ctx, target, move_data),
        ..DamageMultipliers::default()
    };
    for (role, modifier) in ctx.registry.for_move(ctx, attacker, defender) {
        let hook = MoveHook {
            ctx,
            user: attacker,
            target: defender,
            move_data,
            role,
            target_count,
        };
        modifier.modify_damage(&hook, &mut multipliers);
    }

    let (attack_kind, defense_kind) = match move_data.category {
        MoveCategory::Special => (StatKind::SpecialAttack, StatKind::SpecialDefense),
        _ => (StatKind::Attack, StatKind::Defense),
    };
    let mut attack_stage = stage_for(ctx, user, attack_kind);
    let mut defense_stage = stage_for(ctx, target, defense_kind);
    if critical {
        attack_stage = attack_stage.max(0);
        defense_stage = defense_stage.min(0);
    }

    let mut attack = effective_stat_at_stage(ctx, user, attack_kind, attack_stage) * multipliers.attack;
    let defense =
        (effective_stat_at_stage(ctx, target, defense_kind, defense_stage) * multipliers.defense).max(1.0);
    if move_data.category == MoveCategory::Physical
        && matches!(attacker.status_condition(), Some(StatusCondition::Burn))
    {
        attack *= 0.5;
    }

    let power = move_data.power.unwrap_or(0) as f64 * multipliers.power;
    let level = attacker.level() as f64;
    let mut damage = ((2.0 * level / 5.0).floor() + 2.0) * power * attack / defense / 50.0 + 2.0;

    if attacker.has_type(move_data.move_type) {
        damage *= settings.stab_multiplier;
    }
    damage *= multipliers.type_multiplier;
    if critical {
        damage *= settings.critical_hit_multiplier;
    }

    let roll = rng.next_below(settings.damage_roll_span(), "damage variance");
    damage *= (settings.damage_roll_floor + roll) as f64 / 100.0;

    damage *= multipliers.final_damage;
    if target_count > 1 {
        damage *= settings.spread_move_multiplier;
    }

    let damage = if multipliers.type_multiplier == 0.0 || power == 0.0 {
        0
    } else {
        (damage.floor() as u32).max(1)
    };

    DamageCalculation {
        damage,
        critical,
        multipliers,
    }
}

fn stage_for(ctx: &BattleContext, id: BattlerId, kind: StatKind) -> i8 {
    BattleStat::from_stat_kind(kind)
        .map(|stat| ctx.battler(id).stat_stages.get(stat))
        .unwrap_or(0)
}

/// Additional effect chance after user and target modifiers, clamped to 100.
pub fn additional_effect_chance(
    ctx: &BattleContext,
    user: BattlerId,
    target: BattlerId,
    move_data: &'static MoveData,
    target_count: usize,
) -> u32 {
    let Some(additional) = move_data.additional_effect else {
        return 0;
    };
    let attacker = ctx.battler(user);
    let defender = ctx.battler(target);

    let mut chance = additional.chance as f64;
    for (role, modifier) in ctx.registry.for_move(ctx, attacker, defender) {
        if role == HolderRole::Field {
            continue;
        }
        let hook = MoveHook {
            ctx,
            user: attacker,
            target: defender,
            move_data,
            role,
            target_count,
        };
        chance *= modifier.additional_effect_multiplier(&hook);
    }
    chance.clamp(0.0, 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_context, glaceon_vs_garchomp, TestPokemonBuilder};
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_ice_fang_non_critical_damage() {
        let (ctx, glaceon, garchomp) = glaceon_vs_garchomp(None);
        let ice_fang = get_move_data("ICEFANG").unwrap();
        let mut rng = BattleRng::new_for_test(vec![15]);

        let result = calculate_damage(&ctx, glaceon, garchomp, ice_fang, 1, false, &mut rng);

        assert_eq!(result.damage, 200);
        assert_eq!(result.multipliers.type_multiplier, 4.0);
    }

    #[test]
    fn test_ice_fang_critical_damage_is_larger() {
        let (ctx, glaceon, garchomp) = glaceon_vs_garchomp(Some("SCOPELENS"));
        let ice_fang = get_move_data("ICEFANG").unwrap();
        let mut rng = BattleRng::new_for_test(vec![15]);

        let result = calculate_damage(&ctx, glaceon, garchomp, ice_fang, 1, true, &mut rng);

        assert_eq!(result.damage, 300);
        assert!(result.critical);
    }

    #[test]
    fn test_same_seed_gives_same_damage() {
        let (ctx, glaceon, garchomp) = glaceon_vs_garchomp(None);
        let ice_fang = get_move_data("ICEFANG").unwrap();

        let mut first = BattleRng::seeded(7);
        let mut second = BattleRng::seeded(7);
        let a = calculate_damage(&ctx, glaceon, garchomp, ice_fang, 1, false, &mut first);
        let b = calculate_damage(&ctx, glaceon, garchomp, ice_fang, 1, false, &mut second);

        assert_eq!(a, b);
    }

    #[test]
    fn test_scope_lens_raises_critical_stage() {
        let (ctx, glaceon, garchomp) = glaceon_vs_garchomp(Some("SCOPELENS"));
        let ice_fang = get_move_data("ICEFANG").unwrap();

        // Stage 1 is a 1-in-8 roll; 0 crits and 1 does not.
        let mut rng = BattleRng::new_for_test(vec![0]);
        assert!(roll_critical_hit(&ctx, glaceon, garchomp, ice_fang, 1, &mut rng));
        let mut rng = BattleRng::new_for_test(vec![1]);
        assert!(!roll_critical_hit(&ctx, glaceon, garchomp, ice_fang, 1, &mut rng));
    }

    #[test]
    fn test_battle_armor_blocks_guaranteed_crits() {
        let (ctx, user, target) = create_test_context(
            TestPokemonBuilder::new("GLACEON", 50).with_moves(&["FROSTBREATH"]),
            TestPokemonBuilder::new("DRAPION", 50).with_ability("BATTLEARMOR"),
        );
        let frost_breath = get_move_data("FROSTBREATH").unwrap();
        let mut rng = BattleRng::new_for_test(vec![]);

        assert!(!roll_critical_hit(&ctx, user, target, frost_breath, 1, &mut rng));
    }

    #[test]
    fn test_frost_breath_always_crits_without_drawing() {
        let (ctx, user, target) = create_test_context(
            TestPokemonBuilder::new("GLACEON", 50).with_moves(&["FROSTBREATH"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        let frost_breath = get_move_data("FROSTBREATH").unwrap();
        let mut rng = BattleRng::new_for_test(vec![]);

        assert!(roll_critical_hit(&ctx, user, target, frost_breath, 1, &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_critical_hit_ignores_defensive_boosts() {
        let (mut ctx, glaceon, garchomp) = glaceon_vs_garchomp(None);
        let ice_fang = get_move_data("ICEFANG").unwrap();
        ctx.battler_mut(garchomp).stat_stages.set(BattleStat::Defense, 2);

        let boosted = calculate_damage(
            &ctx,
            glaceon,
            garchomp,
            ice_fang,
            1,
            false,
            &mut BattleRng::new_for_test(vec![15]),
        );
        let critical = calculate_damage(
            &ctx,
            glaceon,
            garchomp,
            ice_fang,
            1,
            true,
            &mut BattleRng::new_for_test(vec![15]),
        );

        assert!(boosted.damage < 200);
        assert_eq!(critical.damage, 300);
    }

    #[test]
    fn test_immune_target_takes_no_damage() {
        let (ctx, user, target) = create_test_context(
            TestPokemonBuilder::new("GARCHOMP", 50).with_moves(&["EARTHQUAKE"]),
            TestPokemonBuilder::new("HONCHKROW", 50),
        );
        let earthquake = get_move_data("EARTHQUAKE").unwrap();
        let mut rng = BattleRng::new_for_test(vec![0]);

        let result = calculate_damage(&ctx, user, target, earthquake, 1, false, &mut rng);
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn test_spread_reduction_applies_to_multiple_targets() {
        let (ctx, user, target) = create_test_context(
            TestPokemonBuilder::new("TOGEKISS", 50).with_moves(&["DAZZLINGGLEAM"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        let gleam = get_move_data("DAZZLINGGLEAM").unwrap();

        let single = calculate_damage(&ctx, user, target, gleam, 1, false, &mut BattleRng::new_for_test(vec![15]));
        let spread = calculate_damage(&ctx, user, target, gleam, 2, false, &mut BattleRng::new_for_test(vec![15]));

        assert!(spread.damage < single.damage);
    }

    #[rstest]
    #[case("SERENEGRACE", "HONCHKROW", "INSOMNIA", 20)]
    #[case("SERENEGRACE", "RIBOMBEE", "SHIELDDUST", 0)]
    #[case("HUSTLE", "HONCHKROW", "INSOMNIA", 10)]
    fn test_additional_effect_chance(
        #[case] user_ability: &str,
        #[case] target_species: &str,
        #[case] target_ability: &str,
        #[case] expected: u32,
    ) {
        let (ctx, user, target) = create_test_context(
            TestPokemonBuilder::new("TOGEKISS", 50)
                .with_ability(user_ability)
                .with_moves(&["FIREBLAST"]),
            TestPokemonBuilder::new(target_species, 50).with_ability(target_ability),
        );
        let fire_blast = get_move_data("FIREBLAST").unwrap();

        assert_eq!(additional_effect_chance(&ctx, user, target, fire_blast, 1), expected);
    }
}
