//! Bridge between integer stat stages and the external attribute store.

use crate::battle::attributes::Attribute;
use crate::battle::battler::BattlerId;
use crate::battle::modifiers::{HolderRole, MoveHook};
use crate::battle::state::BattleContext;
use crate::pokemon::StatusCondition;
use schema::{BattleStat, MoveData, StatKind};

/// Result of a requested stage change after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub old_stage: i8,
    pub new_stage: i8,
}

impl StageChange {
    pub fn actual(&self) -> i8 {
        self.new_stage - self.old_stage
    }
}

/// Apply stat stage multipliers according to Pokemon formula
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn stage_multiplier(stage: i8) -> f64 {
    let clamped_stage = stage.clamp(-6, 6);
    if clamped_stage < 0 {
        2.0 / (2.0 + (-clamped_stage) as f64)
    } else {
        (2.0 + clamped_stage as f64) / 2.0
    }
}

/// Accuracy/evasion use a gentler curve than the other stats.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    match stage.clamp(-6, 6) {
        -6 => 3.0 / 9.0,
        -5 => 3.0 / 8.0,
        -4 => 3.0 / 7.0,
        -3 => 3.0 / 6.0,
        -2 => 3.0 / 5.0,
        -1 => 3.0 / 4.0,
        0 => 1.0,
        1 => 4.0 / 3.0,
        2 => 5.0 / 3.0,
        3 => 6.0 / 3.0,
        4 => 7.0 / 3.0,
        5 => 8.0 / 3.0,
        _ => 9.0 / 3.0,
    }
}

/// Publish a freshly added battler's numbers to the attribute store.
pub fn register_battler(ctx: &mut BattleContext, id: BattlerId) {
    let battler = ctx.battler(id);
    let max_hp = battler.max_hp() as f64;
    let current_hp = battler.current_hp as f64;
    let stats: Vec<(StatKind, f64)> = StatKind::all()
        .map(|kind| (kind, battler.pokemon.stat_block.stat(kind) as f64))
        .collect();

    ctx.attributes.set(id, Attribute::MaxHp, max_hp);
    ctx.attributes.set(id, Attribute::CurrentHp, current_hp);
    for (kind, value) in stats {
        ctx.attributes.set(id, Attribute::Stat(kind), value);
    }
    sync_hp(ctx, id);
}

pub fn base_stat(ctx: &BattleContext, id: BattlerId, kind: StatKind) -> f64 {
    ctx.attributes.get(id, Attribute::Stat(kind))
}

/// Base stat × stage multiplier × externally applied modifiers.
pub fn effective_stat(ctx: &BattleContext, id: BattlerId, kind: StatKind) -> f64 {
    let stage = BattleStat::from_stat_kind(kind)
        .map(|stat| ctx.battler(id).stat_stages.get(stat))
        .unwrap_or(0);
    effective_stat_at_stage(ctx, id, kind, stage)
}

/// Same as [`effective_stat`] with the stage supplied by the caller, e.g. when a
/// critical hit ignores part of it.
pub fn effective_stat_at_stage(ctx: &BattleContext, id: BattlerId, kind: StatKind, stage: i8) -> f64 {
    base_stat(ctx, id, kind)
        * stage_multiplier(stage)
        * ctx.attributes.get(id, Attribute::StatMultiplier(kind))
}

/// Speed used for turn order, including paralysis, held items and caller modifiers.
pub fn effective_speed(ctx: &BattleContext, id: BattlerId) -> f64 {
    let battler = ctx.battler(id);
    let mut speed = effective_stat(ctx, id, StatKind::Speed);

    if matches!(battler.status_condition(), Some(StatusCondition::Paralysis)) {
        speed *= 0.5;
    }
    for modifier in ctx.registry.held_by(battler) {
        speed *= modifier.speed_multiplier(battler);
    }
    for modifier in &ctx.field.speed_modifiers {
        if modifier.side.is_none_or(|side| side == battler.side) {
            speed *= modifier.multiplier;
        }
    }
    speed
}

/// Hit threshold out of 100 for `user`'s move against `target`; `None` when the
/// move cannot miss. The stage differential is clamped before lookup.
pub fn accuracy_threshold(
    ctx: &BattleContext,
    user: BattlerId,
    target: BattlerId,
    move_data: &'static MoveData,
    target_count: usize,
) -> Option<u32> {
    let base_accuracy = move_data.accuracy?;
    let attacker = ctx.battler(user);
    let defender = ctx.battler(target);

    let accuracy_stage = attacker.stat_stages.get(BattleStat::Accuracy);
    let evasion_stage = defender.stat_stages.get(BattleStat::Evasion);
    let adjusted_stage = (accuracy_stage - evasion_stage).clamp(-6, 6);

    let mut threshold = base_accuracy as f64 * accuracy_stage_multiplier(adjusted_stage);
    for (role, modifier) in ctx.registry.for_move(ctx, attacker, defender) {
        let hook = MoveHook {
            ctx,
            user: attacker,
            target: defender,
            move_data,
            role,
            target_count,
        };
        if role == HolderRole::User {
            threshold *= modifier.accuracy_multiplier(&hook);
        }
    }
    Some(threshold.round() as u32)
}

/// Copy the store's HP onto the battler, clamped into `[0, max HP]`.
pub fn sync_hp(ctx: &mut BattleContext, id: BattlerId) {
    let stored = ctx.attributes.get(id, Attribute::CurrentHp).round();
    let battler = ctx.battler_mut(id);
    let max_hp = battler.max_hp() as f64;
    battler.current_hp = stored.clamp(0.0, max_hp) as u32;
}

/// Apply every change the store reported since the last sync.
pub fn sync_pending(ctx: &mut BattleContext) {
    let limit = ctx.settings.stat_stage_limit;
    for change in ctx.attributes.drain_changes() {
        if ctx.try_battler(change.battler).is_none() {
            continue;
        }
        match change.attribute {
            Attribute::CurrentHp | Attribute::MaxHp => sync_hp(ctx, change.battler),
            Attribute::Stage(stat) => {
                let stage = (change.new_value.round() as i8).clamp(-limit, limit);
                ctx.battler_mut(change.battler).stat_stages.set(stat, stage);
            }
            Attribute::Stat(_) | Attribute::StatMultiplier(_) => {}
        }
    }
}

/// Request an HP change through the store and mirror the result. Returns the new HP.
pub fn apply_hp_change(ctx: &mut BattleContext, id: BattlerId, delta: i64) -> u32 {
    let current = ctx.attributes.get(id, Attribute::CurrentHp);
    ctx.attributes
        .set(id, Attribute::CurrentHp, current + delta as f64);
    sync_hp(ctx, id);
    ctx.battler(id).current_hp
}

/// Move a stat stage by `delta`, clamped to the configured limit.
pub fn change_stat_stage(ctx: &mut BattleContext, id: BattlerId, stat: BattleStat, delta: i8) -> StageChange {
    let limit = ctx.settings.stat_stage_limit;
    let battler = ctx.battler_mut(id);
    let old_stage = battler.stat_stages.get(stat);
    let new_stage = old_stage.saturating_add(delta).clamp(-limit, limit);
    battler.stat_stages.set(stat, new_stage);
    ctx.attributes
        .set(id, Attribute::Stage(stat), new_stage as f64);
    StageChange {
        old_stage,
        new_stage,
    }
}

/// Reset all stages to zero, e.g. when leaving the field.
pub fn reset_stat_stages(ctx: &mut BattleContext, id: BattlerId) {
    ctx.battler_mut(id).clear_volatile_state();
    for stat in BattleStat::all() {
        ctx.attributes.set(id, Attribute::Stage(stat), 0.0);
    }
}

/// Publish recalculated stats after a level up. Current HP rises by the max HP gained.
pub fn refresh_stats(ctx: &mut BattleContext, id: BattlerId) {
    let old_max = ctx.attributes.get(id, Attribute::MaxHp);
    let battler = ctx.battler(id);
    let new_max = battler.max_hp() as f64;
    let stats: Vec<(StatKind, f64)> = StatKind::all()
        .map(|kind| (kind, battler.pokemon.stat_block.stat(kind) as f64))
        .collect();

    ctx.attributes.set(id, Attribute::MaxHp, new_max);
    for (kind, value) in stats {
        ctx.attributes.set(id, Attribute::Stat(kind), value);
    }
    if new_max > old_max {
        let current = ctx.attributes.get(id, Attribute::CurrentHp);
        ctx.attributes
            .set(id, Attribute::CurrentHp, current + (new_max - old_max));
    }
    sync_hp(ctx, id);
}
