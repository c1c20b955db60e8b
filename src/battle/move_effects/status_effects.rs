// In: src/battle/move_effects/status_effects.rs

use super::EffectContext;
use crate::battle::battler::StatusSource;
use crate::battle::commands::BattleCommand;
use crate::battle::conditions::StatusEffectCoordinator;
use crate::battle::state::{BattleContext, BattleRng};
use crate::pokemon::StatusCondition;
use schema::StatusKind;

pub(super) fn status_fails_against(status: StatusKind, context: &EffectContext, ctx: &BattleContext) -> bool {
    !StatusEffectCoordinator::can_inflict(ctx, context.target, status)
}

/// Sleep rolls its length (1-3 turns) here, so nothing is drawn for a target
/// that cannot fall asleep.
pub(super) fn apply_status_effect(
    status: StatusKind,
    context: &EffectContext,
    ctx: &BattleContext,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    if status_fails_against(status, context, ctx) {
        return Vec::new();
    }
    let condition = match status {
        StatusKind::Burn => StatusCondition::Burn,
        StatusKind::Freeze => StatusCondition::Freeze,
        StatusKind::Paralysis => StatusCondition::Paralysis,
        StatusKind::Poison => StatusCondition::Poison,
        StatusKind::BadPoison => StatusCondition::Toxic(1),
        StatusKind::Sleep => StatusCondition::Sleep(1 + rng.next_below(3, "sleep duration") as u8),
    };
    vec![BattleCommand::SetStatus {
        target: context.target,
        condition,
        source: StatusSource::Move {
            move_id: context.move_data.id,
            user: context.user,
        },
    }]
}
