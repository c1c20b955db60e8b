use crate::battle::battler::BattlerId;
use crate::battle::state::BattleContext;

/// Reasons a credited battler receives nothing for a faint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    NotParticipant { recipient: BattlerId },
    SameSide { recipient: BattlerId },
    RecipientFainted { recipient: BattlerId },
    MaxLevel { recipient: BattlerId, level: u32 },
}

/// Validate that `recipient` may gain experience from `fainted` going down.
pub fn can_award_experience_in_battle(
    ctx: &BattleContext,
    recipient: BattlerId,
    fainted: BattlerId,
) -> Result<(), ProgressionError> {
    let fainted_battler = ctx.battler(fainted);
    if !fainted_battler.participation.contains(recipient) {
        return Err(ProgressionError::NotParticipant { recipient });
    }

    let battler = ctx.battler(recipient);
    if battler.side == fainted_battler.side {
        return Err(ProgressionError::SameSide { recipient });
    }
    if battler.is_fainted() {
        return Err(ProgressionError::RecipientFainted { recipient });
    }
    if battler.level() >= ctx.settings.max_level {
        return Err(ProgressionError::MaxLevel {
            recipient,
            level: battler.level(),
        });
    }
    Ok(())
}
