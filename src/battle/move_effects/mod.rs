// In: src/battle/move_effects/mod.rs
//
// Primary and additional move effects. Each effect is turned into a list of
// `BattleCommand`s; the pipeline executes them.

mod stat_effects;
mod status_effects;

use crate::battle::battler::BattlerId;
use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleContext, BattleRng};
use schema::{EffectRecipient, MoveData, MoveEffect};

use self::{stat_effects::*, status_effects::*};

#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub user: BattlerId,
    pub target: BattlerId,
    pub move_data: &'static MoveData,
}

impl EffectContext {
    pub fn new(user: BattlerId, target: BattlerId, move_data: &'static MoveData) -> Self {
        Self {
            user,
            target,
            move_data,
        }
    }

    pub fn recipient(&self, recipient: EffectRecipient) -> BattlerId {
        match recipient {
            EffectRecipient::User => self.user,
            EffectRecipient::Target => self.target,
        }
    }
}

pub trait BattleMoveEffectExt {
    /// True when the effect can do nothing for this user/target pair.
    fn fails_against(&self, context: &EffectContext, ctx: &BattleContext) -> bool;

    fn apply(&self, context: &EffectContext, ctx: &BattleContext, rng: &mut BattleRng) -> Vec<BattleCommand>;

    fn recipient(&self) -> EffectRecipient;
}

impl BattleMoveEffectExt for MoveEffect {
    fn fails_against(&self, context: &EffectContext, ctx: &BattleContext) -> bool {
        match self {
            MoveEffect::None => false,
            MoveEffect::InflictStatus(status) => status_fails_against(*status, context, ctx),
            MoveEffect::ChangeStats { recipient, changes } => {
                stat_changes_fail_against(context.recipient(*recipient), changes, ctx)
            }
            MoveEffect::Flinch => ctx.battler(context.target).is_fainted(),
        }
    }

    fn apply(&self, context: &EffectContext, ctx: &BattleContext, rng: &mut BattleRng) -> Vec<BattleCommand> {
        match self {
            MoveEffect::None => Vec::new(),
            MoveEffect::InflictStatus(status) => apply_status_effect(*status, context, ctx, rng),
            MoveEffect::ChangeStats { recipient, changes } => {
                apply_stat_changes(context.recipient(*recipient), changes)
            }
            MoveEffect::Flinch => {
                if ctx.battler(context.target).is_fainted() {
                    Vec::new()
                } else {
                    vec![BattleCommand::SetFlinch {
                        target: context.target,
                    }]
                }
            }
        }
    }

    fn recipient(&self) -> EffectRecipient {
        match self {
            MoveEffect::ChangeStats { recipient, .. } => *recipient,
            _ => EffectRecipient::Target,
        }
    }
}
