use crate::battle::battler::{BattlerId, StatusSource};
use crate::battle::conditions::StatusEffectCoordinator;
use crate::battle::state::{BattleContext, BattleEvent, EventBus};
use crate::battle::stats;
use crate::pokemon::StatusCondition;
use schema::BattleStat;
use thiserror::Error;

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    DealDamage {
        target: BattlerId,
        amount: u32,
    },
    RestoreHp {
        target: BattlerId,
        amount: u32,
    },
    SetStatus {
        target: BattlerId,
        condition: StatusCondition,
        source: StatusSource,
    },
    RemoveStatus {
        target: BattlerId,
    },
    ChangeStatStage {
        target: BattlerId,
        stat: BattleStat,
        delta: i8,
    },
    DeductPp {
        user: BattlerId,
        move_slot: usize,
    },
    SetFlinch {
        target: BattlerId,
    },
    EmitEvent(BattleEvent),
}

/// Error types for command execution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("battler {0} does not exist")]
    UnknownBattler(BattlerId),
    #[error("battler {battler} has no move in slot {slot}")]
    InvalidMoveSlot { battler: BattlerId, slot: usize },
}

/// Execute a batch of commands in order, stopping at the first failure.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        execute_command(command, ctx, bus)?;
    }
    Ok(())
}

pub fn execute_command(
    command: BattleCommand,
    ctx: &mut BattleContext,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::DealDamage { target, amount } => {
            ensure_exists(ctx, target)?;
            stats::sync_hp(ctx, target);
            let before = ctx.battler(target).current_hp;
            let remaining_hp = stats::apply_hp_change(ctx, target, -(amount as i64));
            bus.push(BattleEvent::DamageDealt {
                target,
                damage: before.saturating_sub(remaining_hp),
                remaining_hp,
            });
        }
        BattleCommand::RestoreHp { target, amount } => {
            ensure_exists(ctx, target)?;
            stats::sync_hp(ctx, target);
            let before = ctx.battler(target).current_hp;
            let new_hp = stats::apply_hp_change(ctx, target, amount as i64);
            bus.push(BattleEvent::HpRestored {
                target,
                amount: new_hp.saturating_sub(before),
                new_hp,
            });
        }
        BattleCommand::SetStatus {
            target,
            condition,
            source,
        } => {
            ensure_exists(ctx, target)?;
            if StatusEffectCoordinator::inflict_status(ctx, target, condition, source) {
                bus.push(BattleEvent::StatusApplied {
                    target,
                    status: condition,
                });
            }
        }
        BattleCommand::RemoveStatus { target } => {
            ensure_exists(ctx, target)?;
            if let Some(status) = StatusEffectCoordinator::remove_status(ctx, target) {
                bus.push(BattleEvent::StatusRemoved { target, status });
            }
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            ensure_exists(ctx, target)?;
            let change = stats::change_stat_stage(ctx, target, stat, delta);
            if change.actual() == 0 {
                bus.push(BattleEvent::StatChangeBlocked {
                    target,
                    stat,
                    rising: delta > 0,
                });
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    target,
                    stat,
                    old_stage: change.old_stage,
                    new_stage: change.new_stage,
                });
            }
        }
        BattleCommand::DeductPp { user, move_slot } => {
            ensure_exists(ctx, user)?;
            let instance = ctx
                .battler_mut(user)
                .pokemon
                .moves
                .get_mut(move_slot)
                .ok_or(ExecutionError::InvalidMoveSlot {
                    battler: user,
                    slot: move_slot,
                })?;
            instance.use_move();
        }
        BattleCommand::SetFlinch { target } => {
            ensure_exists(ctx, target)?;
            ctx.battler_mut(target).flinched = true;
        }
        BattleCommand::EmitEvent(event) => bus.push(event),
    }
    Ok(())
}

fn ensure_exists(ctx: &BattleContext, id: BattlerId) -> Result<(), ExecutionError> {
    match ctx.try_battler(id) {
        Some(_) => Ok(()),
        None => Err(ExecutionError::UnknownBattler(id)),
    }
}
