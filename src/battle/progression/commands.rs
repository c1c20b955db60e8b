use crate::battle::battler::BattlerId;
use crate::battle::progression::calculation::calculate_exp_awards;
use crate::battle::state::{BattleContext, BattleEvent, EventBus};
use crate::battle::stats::refresh_stats;
use crate::progression::{ExpYieldFormula, LevelUpStatChanges, RewardCalculator};
use serde::Serialize;

/// Everything one battler gained from a faint sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpGainRecord {
    pub recipient: BattlerId,
    pub amount: u32,
    pub changes: LevelUpStatChanges,
}

impl ExpGainRecord {
    /// Fold a later record for the same recipient into this one.
    pub fn merge(&mut self, later: &ExpGainRecord) {
        debug_assert_eq!(self.recipient, later.recipient);
        self.amount += later.amount;
        self.changes.merge(&later.changes);
    }
}

/// Hands out experience and EVs when battlers faint.
pub struct ExperienceDistributor {
    formula: Box<dyn ExpYieldFormula>,
}

impl Default for ExperienceDistributor {
    fn default() -> Self {
        Self::new(Box::new(RewardCalculator))
    }
}

impl ExperienceDistributor {
    pub fn new(formula: Box<dyn ExpYieldFormula>) -> Self {
        Self { formula }
    }

    /// Award every faint of one sweep. Each faint is applied to the recipients'
    /// StatBlocks in order; records for the same recipient are merged, so each
    /// battler gets one record. Recipients that levelled up have their stats
    /// republished before the records are returned.
    pub fn distribute(
        &self,
        ctx: &mut BattleContext,
        fainted: &[BattlerId],
        bus: &mut EventBus,
    ) -> Vec<ExpGainRecord> {
        let mut records: Vec<ExpGainRecord> = Vec::new();
        let settings = ctx.settings.clone();

        for &fainted_id in fainted {
            for award in calculate_exp_awards(ctx, fainted_id, self.formula.as_ref()) {
                let stat_block = &mut ctx.battler_mut(award.recipient).pokemon.stat_block;
                let changes = stat_block.gain_exp(award.amount, settings.max_level);
                stat_block.gain_evs(&award.ev_yield, settings.max_ev_per_stat, settings.max_ev_total);

                let record = ExpGainRecord {
                    recipient: award.recipient,
                    amount: award.amount,
                    changes,
                };
                match records.iter_mut().find(|r| r.recipient == award.recipient) {
                    Some(existing) => existing.merge(&record),
                    None => records.push(record),
                }
            }
        }

        for record in &records {
            bus.push(BattleEvent::ExperienceGained {
                battler: record.recipient,
                amount: record.amount,
            });
            if record.changes.leveled_up() {
                refresh_stats(ctx, record.recipient);
                bus.push(BattleEvent::LevelUp {
                    battler: record.recipient,
                    new_level: record.changes.level.after,
                });
            }
        }
        records
    }
}
