// In: src/battle/move_effects/stat_effects.rs

use crate::battle::battler::BattlerId;
use crate::battle::commands::BattleCommand;
use crate::battle::state::BattleContext;
use schema::BattleStat;

/// A stat effect fails only when every listed change is already at the limit in
/// its direction.
pub(super) fn stat_changes_fail_against(
    recipient: BattlerId,
    changes: &[(BattleStat, i8)],
    ctx: &BattleContext,
) -> bool {
    let battler = ctx.battler(recipient);
    if battler.is_fainted() {
        return true;
    }
    let limit = ctx.settings.stat_stage_limit;
    changes.iter().all(|&(stat, delta)| {
        let stage = battler.stat_stages.get(stat);
        (delta > 0 && stage >= limit) || (delta < 0 && stage <= -limit) || delta == 0
    })
}

pub(super) fn apply_stat_changes(recipient: BattlerId, changes: &[(BattleStat, i8)]) -> Vec<BattleCommand> {
    changes
        .iter()
        .map(|&(stat, delta)| BattleCommand::ChangeStatStage {
            target: recipient,
            stat,
            delta,
        })
        .collect()
}
