//! Turn scheduling: ordering, one-action-at-a-time execution, faint sweeps and
//! the end-of-turn phase.

use crate::battle::action_stack::{ActionKind, ActionStack, BattleAction};
use crate::battle::battler::{BattlerId, SideId};
use crate::battle::conditions::StatusEffectCoordinator;
use crate::battle::engine::{execute_battle_action, ActionResult};
use crate::battle::progression::{ExpGainRecord, ExperienceDistributor};
use crate::battle::state::{BattleContext, BattleEvent, BattleRng, EventBus};
use crate::battle::stats;
use crate::pokemon::StatusCondition;
use serde::Serialize;

const MAX_TOXIC_COUNTER: u8 = 15;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// `result` is `None` when the action was skipped because its battler fainted
    /// or left the field earlier in the turn.
    Action {
        battler: BattlerId,
        result: Option<ActionResult>,
    },
    EndOfTurn,
}

/// Everything one step of the turn produced, ready for presentation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub kind: ReportKind,
    pub events: Vec<BattleEvent>,
    pub fainted: Vec<BattlerId>,
    pub exp_gains: Vec<ExpGainRecord>,
}

/// Drives one turn. Each call to [`TurnScheduler::next_action`] fully resolves a
/// single action, including its faint sweep, before returning.
pub struct TurnScheduler<'a> {
    ctx: &'a mut BattleContext,
    rng: &'a mut BattleRng,
    distributor: &'a ExperienceDistributor,
    stack: ActionStack,
    pending: EventBus,
}

impl<'a> TurnScheduler<'a> {
    /// Order `actions` and open the turn.
    pub fn begin(
        ctx: &'a mut BattleContext,
        rng: &'a mut BattleRng,
        distributor: &'a ExperienceDistributor,
        actions: Vec<BattleAction>,
    ) -> Self {
        stats::sync_pending(ctx);
        let mut pending = EventBus::new();
        pending.push(BattleEvent::TurnStarted {
            turn_number: ctx.turn_number,
        });
        let stack = ActionStack::build_initial(ctx, actions, rng);
        tracing::debug!(turn = ctx.turn_number, actions = stack.len(), "turn started");
        Self {
            ctx,
            rng,
            distributor,
            stack,
            pending,
        }
    }

    pub fn context(&self) -> &BattleContext {
        self.ctx
    }

    /// The winning side once the other has no healthy battlers left.
    pub fn winner(&self) -> Option<SideId> {
        battle_winner(self.ctx)
    }

    /// Execute the next queued action. `None` once the queue is empty or the
    /// battle has been decided.
    pub fn next_action(&mut self) -> Option<ActionReport> {
        // The store may have been written between steps.
        stats::sync_pending(self.ctx);
        if self.winner().is_some() {
            return None;
        }
        let action = self.stack.pop_front()?;
        let mut bus = std::mem::take(&mut self.pending);

        let result = if self.can_act(&action) {
            Some(execute_battle_action(&action, self.ctx, &mut bus, self.rng))
        } else {
            tracing::debug!(battler = %action.battler, kind = ?action.kind, "skipping action");
            None
        };
        let (fainted, exp_gains) = self.sweep(&mut bus);

        Some(ActionReport {
            kind: ReportKind::Action {
                battler: action.battler,
                result,
            },
            events: bus.take_events(),
            fainted,
            exp_gains,
        })
    }

    /// Residual status damage, flinch reset and the closing faint sweep. Consumes
    /// any actions still queued.
    pub fn finish_turn(mut self) -> ActionReport {
        let mut bus = std::mem::take(&mut self.pending);
        self.stack = ActionStack::new();

        if self.winner().is_none() {
            self.apply_residual_damage(&mut bus);
        }
        for id in self.ctx.active_battlers() {
            self.ctx.battler_mut(id).flinched = false;
        }
        let (fainted, exp_gains) = self.sweep(&mut bus);

        bus.push(BattleEvent::TurnEnded {
            turn_number: self.ctx.turn_number,
        });
        self.ctx.turn_number += 1;

        ActionReport {
            kind: ReportKind::EndOfTurn,
            events: bus.take_events(),
            fainted,
            exp_gains,
        }
    }

    /// Run every remaining step synchronously.
    pub fn run_to_end(mut self) -> Vec<ActionReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.next_action() {
            reports.push(report);
        }
        reports.push(self.finish_turn());
        reports
    }

    fn can_act(&self, action: &BattleAction) -> bool {
        self.ctx.assert_on_roster(action.battler);
        if !self.ctx.is_active(action.battler) {
            return false;
        }
        match action.kind {
            ActionKind::Switch { .. } => true,
            ActionKind::UseMove { .. } | ActionKind::UseItem { .. } => {
                !self.ctx.battler(action.battler).is_fainted()
            }
        }
    }

    /// Sync HP from the attribute store, mark new faints and award experience.
    fn sweep(&mut self, bus: &mut EventBus) -> (Vec<BattlerId>, Vec<ExpGainRecord>) {
        stats::sync_pending(self.ctx);

        let newly_fainted: Vec<BattlerId> = self
            .ctx
            .battlers()
            .filter(|b| !b.fainted && b.current_hp == 0)
            .map(|b| b.id)
            .collect();
        if newly_fainted.is_empty() {
            return (Vec::new(), Vec::new());
        }

        for &id in &newly_fainted {
            let battler = self.ctx.battler_mut(id);
            battler.fainted = true;
            battler.flinched = false;
            bus.push(BattleEvent::BattlerFainted { battler: id });
        }
        let exp_gains = self.distributor.distribute(self.ctx, &newly_fainted, bus);
        (newly_fainted, exp_gains)
    }

    fn apply_residual_damage(&mut self, bus: &mut EventBus) {
        for id in self.ctx.active_battlers() {
            let battler = self.ctx.battler(id);
            if battler.is_fainted() {
                continue;
            }
            let Some(status) = battler.status_condition() else {
                continue;
            };
            let max_hp = battler.max_hp();
            let damage = match status {
                StatusCondition::Burn => max_hp / 16,
                StatusCondition::Poison => max_hp / 8,
                StatusCondition::Toxic(counter) => max_hp * counter as u32 / 16,
                _ => continue,
            }
            .max(1);

            let remaining_hp = stats::apply_hp_change(self.ctx, id, -(damage as i64));
            bus.push(BattleEvent::StatusDamage {
                target: id,
                status,
                damage,
                remaining_hp,
            });
            if let StatusCondition::Toxic(counter) = status {
                let next = StatusCondition::Toxic((counter + 1).min(MAX_TOXIC_COUNTER));
                StatusEffectCoordinator::update_counter(self.ctx, id, next);
            }
        }
    }
}

/// The side still standing once the other is fully fainted.
pub fn battle_winner(ctx: &BattleContext) -> Option<SideId> {
    match (
        ctx.is_side_defeated(SideId::Player),
        ctx.is_side_defeated(SideId::Opponent),
    ) {
        (false, true) => Some(SideId::Player),
        (true, false) => Some(SideId::Opponent),
        _ => None,
    }
}

/// Resolve a whole turn synchronously and collect every event in order.
pub fn resolve_turn(
    ctx: &mut BattleContext,
    rng: &mut BattleRng,
    distributor: &ExperienceDistributor,
    actions: Vec<BattleAction>,
) -> EventBus {
    let mut bus = EventBus::new();
    for report in TurnScheduler::begin(ctx, rng, distributor, actions).run_to_end() {
        bus.append(report.events);
    }
    bus
}
