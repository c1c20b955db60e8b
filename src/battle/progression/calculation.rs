use crate::battle::battler::BattlerId;
use crate::battle::progression::validation::can_award_experience_in_battle;
use crate::battle::state::BattleContext;
use crate::progression::{EvYield, ExpYieldFormula, ExpYieldInput, RewardCalculator};

/// Experience and EVs one recipient earns from one faint.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpAward {
    pub recipient: BattlerId,
    pub amount: u32,
    pub ev_yield: EvYield,
}

/// Awards for every eligible participant in the fainted battler's ledger,
/// in the order they were credited.
pub fn calculate_exp_awards(
    ctx: &BattleContext,
    fainted: BattlerId,
    formula: &dyn ExpYieldFormula,
) -> Vec<ExpAward> {
    let fainted_battler = ctx.battler(fainted);
    let recipients: Vec<BattlerId> = fainted_battler
        .participation
        .participants()
        .iter()
        .copied()
        .filter(|&recipient| match can_award_experience_in_battle(ctx, recipient, fainted) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(?reason, %fainted, "no experience awarded");
                false
            }
        })
        .collect();

    let species = fainted_battler.pokemon.species;
    let ev_yield = RewardCalculator.calculate_ev_yield(species);
    recipients
        .iter()
        .map(|&recipient| {
            let input = ExpYieldInput {
                base_exp: species.base_exp,
                fainted_level: fainted_battler.level(),
                recipient_level: ctx.battler(recipient).level(),
                participant_count: recipients.len(),
            };
            ExpAward {
                recipient,
                amount: formula.experience_share(&input),
                ev_yield: ev_yield.clone(),
            }
        })
        .collect()
}
