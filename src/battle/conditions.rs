//! The single authority over major status conditions.
//!
//! A battler holds at most one status. Everything that gives or takes one goes
//! through [`StatusEffectCoordinator`], which applies the immunity rules.

use crate::battle::battler::{BattlerId, StatusEffectInfo, StatusSource};
use crate::battle::state::BattleContext;
use crate::pokemon::StatusCondition;
use schema::{PokemonType, StatusKind};

pub struct StatusEffectCoordinator;

impl StatusEffectCoordinator {
    /// Type-based immunity to a status.
    pub fn type_immune(types: &[PokemonType], status: StatusKind) -> bool {
        types.iter().any(|&pokemon_type| match status {
            StatusKind::Burn => pokemon_type == PokemonType::Fire,
            StatusKind::Freeze => pokemon_type == PokemonType::Ice,
            StatusKind::Paralysis => pokemon_type == PokemonType::Electric,
            StatusKind::Poison | StatusKind::BadPoison => {
                matches!(pokemon_type, PokemonType::Poison | PokemonType::Steel)
            }
            StatusKind::Sleep => false,
        })
    }

    /// True when `target` could receive `status` right now.
    pub fn can_inflict(ctx: &BattleContext, target: BattlerId, status: StatusKind) -> bool {
        let battler = ctx.battler(target);
        if battler.is_fainted() || battler.status.is_some() {
            return false;
        }
        if Self::type_immune(battler.types(), status) {
            return false;
        }
        !ctx.registry
            .held_by(battler)
            .any(|modifier| modifier.prevents_status(status))
    }

    /// Give `target` a status. Returns false without touching anything when the
    /// target already has a status or is immune.
    pub fn inflict_status(
        ctx: &mut BattleContext,
        target: BattlerId,
        condition: StatusCondition,
        source: StatusSource,
    ) -> bool {
        if !Self::can_inflict(ctx, target, condition.kind()) {
            tracing::debug!(%target, ?condition, "status rejected");
            return false;
        }
        ctx.battler_mut(target).status = Some(StatusEffectInfo { condition, source });
        true
    }

    /// Clear any status. Safe to call on a battler without one.
    pub fn remove_status(ctx: &mut BattleContext, target: BattlerId) -> Option<StatusCondition> {
        ctx.battler_mut(target)
            .status
            .take()
            .map(|info| info.condition)
    }

    pub fn query_status(ctx: &BattleContext, target: BattlerId) -> Option<&StatusEffectInfo> {
        ctx.battler(target).status.as_ref()
    }

    /// Replace the condition's counter (sleep turns, toxic count) without changing its kind.
    pub fn update_counter(ctx: &mut BattleContext, target: BattlerId, condition: StatusCondition) {
        if let Some(info) = ctx.battler_mut(target).status.as_mut() {
            if info.condition.kind() == condition.kind() {
                info.condition = condition;
            }
        }
    }
}
