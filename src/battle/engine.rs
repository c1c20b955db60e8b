//! Resolution of a single action: the move execution pipeline plus switches and
//! bag items.
//!
//! A move runs `CostValidation → TargetResolution → per target { accuracy →
//! damage → effects }`. Every branch ends in an [`ActionResult`]; nothing here
//! returns an error to the scheduler.

use crate::battle::action_stack::{ActionKind, BagItem, BattleAction, TargetWithIndex};
use crate::battle::battler::BattlerId;
use crate::battle::calculators::{additional_effect_chance, calculate_damage, roll_critical_hit, type_multiplier};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::conditions::StatusEffectCoordinator;
use crate::battle::move_effects::{BattleMoveEffectExt, EffectContext};
use crate::battle::state::{
    ActionFailureReason, AdditionalEffectSkipReason, BattleContext, BattleEvent, BattleRng, EventBus,
};
use crate::battle::stats::{accuracy_threshold, reset_stat_stages};
use crate::pokemon::StatusCondition;
use schema::{EffectRecipient, MoveData, MoveEffect, TargetKind};
use serde::Serialize;

const THAW_CHANCE: u32 = 20;
const FULL_PARALYSIS_CHANCE: u32 = 25;

/// Terminal outcome of one action.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Applied,
    /// Sleep, freeze, paralysis or flinch stopped the battler before it paid any cost.
    Prevented(ActionFailureReason),
    CostFailure,
    NoValidTargets,
    Failed,
    Missed,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Hit { damage: u32, critical: bool },
    Missed,
    Unaffected,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub result: ActionResult,
    pub per_target: Vec<(BattlerId, TargetOutcome)>,
}

impl MoveOutcome {
    fn ended(result: ActionResult) -> Self {
        Self {
            result,
            per_target: Vec::new(),
        }
    }

    pub fn outcome_for(&self, target: BattlerId) -> Option<TargetOutcome> {
        self.per_target
            .iter()
            .find(|(battler, _)| *battler == target)
            .map(|(_, outcome)| *outcome)
    }
}

/// Execute one action. Panics when the acting battler is on neither roster.
pub fn execute_battle_action(
    action: &BattleAction,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> ActionResult {
    ctx.assert_on_roster(action.battler);
    match &action.kind {
        ActionKind::UseMove { move_slot, targets } => {
            execute_use_move(action.battler, *move_slot, targets, ctx, bus, rng).result
        }
        ActionKind::Switch { replacement } => execute_switch(action.battler, *replacement, ctx, bus),
        ActionKind::UseItem { item, target } => execute_item(action.battler, *item, *target, ctx, bus),
    }
}

/// Targets a move would pick with no explicit choice.
pub fn default_targets(ctx: &BattleContext, user: BattlerId, move_data: &MoveData) -> Vec<BattlerId> {
    match move_data.target {
        TargetKind::User => vec![user],
        TargetKind::AllOpponents => ctx.opponents_of(user),
        TargetKind::AllOthers => {
            let mut targets = ctx.opponents_of(user);
            targets.extend(ctx.allies_of(user));
            targets
        }
        TargetKind::SingleOther | TargetKind::SingleOpponent => {
            ctx.opponents_of(user).into_iter().take(1).collect()
        }
    }
}

pub fn execute_use_move(
    user: BattlerId,
    move_slot: usize,
    chosen_targets: &[TargetWithIndex],
    ctx: &mut BattleContext,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> MoveOutcome {
    ctx.assert_on_roster(user);

    if let Some(reason) = check_action_prevention(user, ctx, bus, rng) {
        bus.push(BattleEvent::ActionFailed {
            battler: user,
            reason,
        });
        return MoveOutcome::ended(ActionResult::Prevented(reason));
    }

    // CostValidation
    let Some(instance) = ctx.battler(user).move_slot(move_slot) else {
        tracing::warn!(%user, move_slot, "move slot is empty");
        return MoveOutcome::ended(ActionResult::CostFailure);
    };
    let move_data = instance.data;
    if instance.pp == 0 {
        bus.push(BattleEvent::ActionFailed {
            battler: user,
            reason: ActionFailureReason::NoPpRemaining,
        });
        return MoveOutcome::ended(ActionResult::CostFailure);
    }
    run_commands(
        vec![
            BattleCommand::DeductPp { user, move_slot },
            BattleCommand::EmitEvent(BattleEvent::MoveUsed {
                user,
                move_id: move_data.id,
            }),
        ],
        ctx,
        bus,
    );

    // TargetResolution
    let targets = resolve_targets(ctx, user, move_data, chosen_targets);
    if targets.is_empty() {
        bus.push(BattleEvent::NoTarget {
            user,
            move_id: move_data.id,
        });
        return MoveOutcome::ended(ActionResult::NoValidTargets);
    }
    for &target in &targets {
        if target != user {
            ctx.record_participation(target, user);
        }
    }

    let mut per_target = Vec::with_capacity(targets.len());
    let mut eligible = Vec::with_capacity(targets.len());
    let mut precondition_failed = false;
    for &target in &targets {
        if move_data.is_damaging() {
            if type_multiplier(ctx, target, move_data) == 0.0 {
                bus.push(BattleEvent::Unaffected {
                    target,
                    move_id: move_data.id,
                });
                per_target.push((target, TargetOutcome::Unaffected));
                continue;
            }
        } else if move_data
            .effect
            .fails_against(&EffectContext::new(user, target, move_data), ctx)
        {
            precondition_failed = true;
            per_target.push((target, TargetOutcome::Failed));
            continue;
        }
        eligible.push(target);
    }
    if eligible.is_empty() {
        if precondition_failed {
            bus.push(BattleEvent::MoveFailed {
                user,
                move_id: move_data.id,
                against_all_targets: move_data.target != TargetKind::User,
            });
        }
        return MoveOutcome {
            result: ActionResult::Failed,
            per_target,
        };
    }

    let target_count = eligible.len();
    let mut any_hit = false;
    for target in eligible {
        let outcome = resolve_against_target(user, target, move_data, target_count, ctx, bus, rng);
        any_hit |= matches!(outcome, TargetOutcome::Hit { .. });
        per_target.push((target, outcome));
    }

    // Self-inflicted effects of damaging moves happen once, after every target.
    if any_hit
        && move_data.is_damaging()
        && move_data.effect.recipient() == EffectRecipient::User
        && !ctx.battler(user).is_fainted()
    {
        let context = EffectContext::new(user, user, move_data);
        let commands = move_data.effect.apply(&context, ctx, rng);
        run_commands(commands, ctx, bus);
    }

    MoveOutcome {
        result: if any_hit {
            ActionResult::Applied
        } else {
            ActionResult::Missed
        },
        per_target,
    }
}

fn resolve_against_target(
    user: BattlerId,
    target: BattlerId,
    move_data: &'static MoveData,
    target_count: usize,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> TargetOutcome {
    // AccuracyCheck
    match accuracy_threshold(ctx, user, target, move_data, target_count) {
        None => bus.push(BattleEvent::AccuracyBypassed {
            target,
            move_id: move_data.id,
        }),
        Some(threshold) => {
            bus.push(BattleEvent::AccuracyThreshold {
                target,
                move_id: move_data.id,
                threshold,
            });
            if rng.next_below(100, "accuracy") >= threshold {
                bus.push(BattleEvent::MoveMissed {
                    user,
                    target,
                    move_id: move_data.id,
                });
                return TargetOutcome::Missed;
            }
        }
    }

    // DamageResolution
    let mut damage = 0;
    let mut critical = false;
    if move_data.is_damaging() {
        critical = roll_critical_hit(ctx, user, target, move_data, target_count, rng);
        let calculation = calculate_damage(ctx, user, target, move_data, target_count, critical, rng);
        damage = calculation.damage;

        let mut commands = vec![
            BattleCommand::EmitEvent(BattleEvent::DamageCalculated { target, damage }),
            BattleCommand::DealDamage {
                target,
                amount: damage,
            },
        ];
        if critical {
            commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit { target }));
        }
        commands.push(BattleCommand::EmitEvent(BattleEvent::TypeEffectiveness {
            target,
            multiplier: calculation.multipliers.type_multiplier as f32,
        }));
        run_commands(commands, ctx, bus);
    }

    // EffectApplication
    let context = EffectContext::new(user, target, move_data);
    let primary_on_target = !move_data.is_damaging() || move_data.effect.recipient() == EffectRecipient::Target;
    if primary_on_target && move_data.effect != MoveEffect::None && !ctx.battler(target).is_fainted() {
        let commands = move_data.effect.apply(&context, ctx, rng);
        run_commands(commands, ctx, bus);
    }

    if let Some(additional) = move_data.additional_effect {
        apply_additional_effect(&context, additional.effect, damage, target_count, ctx, bus, rng);
    }

    TargetOutcome::Hit { damage, critical }
}

fn apply_additional_effect(
    context: &EffectContext,
    effect: MoveEffect,
    damage: u32,
    target_count: usize,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) {
    let (user, target, move_data) = (context.user, context.target, context.move_data);
    if move_data.is_damaging() && damage == 0 {
        bus.push(BattleEvent::AdditionalEffectSkipped {
            target,
            move_id: move_data.id,
            reason: AdditionalEffectSkipReason::NoDamage,
        });
        return;
    }
    if ctx.battler(target).is_fainted() {
        return;
    }

    let chance = additional_effect_chance(ctx, user, target, move_data, target_count);
    bus.push(BattleEvent::AdditionalEffectChance {
        target,
        move_id: move_data.id,
        chance,
    });
    if chance == 0 {
        bus.push(BattleEvent::AdditionalEffectSkipped {
            target,
            move_id: move_data.id,
            reason: AdditionalEffectSkipReason::ChanceZero,
        });
        return;
    }
    if rng.next_below(100, "additional effect") < chance {
        let commands = effect.apply(context, ctx, rng);
        run_commands(commands, ctx, bus);
    }
}

/// Filter the chosen targets down to battlers the move may still legally hit.
fn resolve_targets(
    ctx: &BattleContext,
    user: BattlerId,
    move_data: &MoveData,
    chosen: &[TargetWithIndex],
) -> Vec<BattlerId> {
    if move_data.target == TargetKind::User {
        return vec![user];
    }
    let user_side = ctx.battler(user).side;
    let mut resolved: Vec<BattlerId> = Vec::with_capacity(chosen.len());
    let mut ordered = chosen.to_vec();
    ordered.sort_by_key(|target| target.index);
    for TargetWithIndex { battler, .. } in ordered {
        let Some(candidate) = ctx.try_battler(battler) else {
            continue;
        };
        let legal = match move_data.target {
            TargetKind::SingleOpponent | TargetKind::AllOpponents => candidate.side != user_side,
            TargetKind::SingleOther | TargetKind::AllOthers => battler != user,
            TargetKind::User => battler == user,
        };
        if legal && ctx.is_active(battler) && !candidate.is_fainted() && !resolved.contains(&battler) {
            resolved.push(battler);
        }
    }
    resolved
}

/// Sleep, freeze, flinch and paralysis, in that order.
fn check_action_prevention(
    user: BattlerId,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> Option<ActionFailureReason> {
    match ctx.battler(user).status_condition() {
        Some(StatusCondition::Sleep(0)) => {
            run_commands(vec![BattleCommand::RemoveStatus { target: user }], ctx, bus);
        }
        Some(StatusCondition::Sleep(turns)) => {
            StatusEffectCoordinator::update_counter(ctx, user, StatusCondition::Sleep(turns - 1));
            return Some(ActionFailureReason::IsAsleep);
        }
        Some(StatusCondition::Freeze) => {
            if rng.next_below(100, "thaw") < THAW_CHANCE {
                run_commands(vec![BattleCommand::RemoveStatus { target: user }], ctx, bus);
            } else {
                return Some(ActionFailureReason::IsFrozen);
            }
        }
        _ => {}
    }

    if ctx.battler(user).flinched {
        return Some(ActionFailureReason::IsFlinching);
    }

    if matches!(ctx.battler(user).status_condition(), Some(StatusCondition::Paralysis))
        && rng.next_below(100, "full paralysis") < FULL_PARALYSIS_CHANCE
    {
        return Some(ActionFailureReason::IsParalyzed);
    }
    None
}

fn execute_switch(
    battler: BattlerId,
    replacement: BattlerId,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
) -> ActionResult {
    let side = ctx.battler(battler).side;
    let valid = ctx.side(side).roster.contains(&replacement)
        && !ctx.is_active(replacement)
        && !ctx.battler(replacement).is_fainted();
    let slot = ctx.side(side).active.iter().position(|&id| id == battler);
    let (true, Some(slot)) = (valid, slot) else {
        tracing::warn!(%battler, %replacement, "switch is no longer possible");
        return ActionResult::Failed;
    };

    ctx.side_mut(side).active[slot] = replacement;
    reset_stat_stages(ctx, battler);
    bus.push(BattleEvent::BattlerSwitched {
        side,
        old: battler,
        new: replacement,
    });
    ActionResult::Applied
}

fn execute_item(
    user: BattlerId,
    item: BagItem,
    target: BattlerId,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
) -> ActionResult {
    let usable = ctx
        .try_battler(target)
        .is_some_and(|t| t.side == ctx.battler(user).side && !t.is_fainted());
    if !usable {
        tracing::warn!(%user, %target, %item, "item has no valid target");
        return ActionResult::Failed;
    }

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::ItemUsed { item, target })];
    if item.heal_amount() > 0 {
        commands.push(BattleCommand::RestoreHp {
            target,
            amount: item.heal_amount(),
        });
    }
    if item.cures_status() {
        commands.push(BattleCommand::RemoveStatus { target });
    }
    run_commands(commands, ctx, bus);
    ActionResult::Applied
}

/// Commands built here only name battlers that were checked beforehand, so a
/// failure is logged rather than surfaced.
fn run_commands(commands: Vec<BattleCommand>, ctx: &mut BattleContext, bus: &mut EventBus) {
    if let Err(error) = execute_command_batch(commands, ctx, bus) {
        tracing::error!(%error, "battle command failed");
    }
}
