//! High-level battle driver. Collects one action per active battler, then
//! resolves the turn either in one call or one report at a time for a
//! presentation layer.

use crate::battle::action_stack::{ActionKind, BagItem, BattleAction};
use crate::battle::battler::{BattlerId, SideId};
use crate::battle::engine::default_targets;
use crate::battle::progression::ExperienceDistributor;
use crate::battle::state::{BattleContext, BattleRng};
use crate::battle::turn_orchestrator::{battle_winner, ActionReport, TurnScheduler};
use crate::errors::{ActionError, PresentationError};
use crate::pokemon::PokemonInst;
use tokio::sync::mpsc;

/// Sent by the presentation layer once it has finished showing a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proceed;

pub struct BattleRunner {
    ctx: BattleContext,
    rng: BattleRng,
    distributor: ExperienceDistributor,
    pending: Vec<BattleAction>,
}

impl BattleRunner {
    pub fn new(ctx: BattleContext, rng: BattleRng) -> Self {
        Self {
            ctx,
            rng,
            distributor: ExperienceDistributor::default(),
            pending: Vec::new(),
        }
    }

    pub fn context(&self) -> &BattleContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut BattleContext {
        &mut self.ctx
    }

    pub fn turn_number(&self) -> u32 {
        self.ctx.turn_number
    }

    pub fn winner(&self) -> Option<SideId> {
        battle_winner(&self.ctx)
    }

    pub fn is_battle_ended(&self) -> bool {
        self.winner().is_some()
    }

    /// Active, healthy battlers that have not submitted an action yet.
    pub fn battlers_needing_actions(&self) -> Vec<BattlerId> {
        self.ctx
            .active_battlers()
            .into_iter()
            .filter(|&id| !self.ctx.battler(id).is_fainted() && !self.has_pending(id))
            .collect()
    }

    pub fn pending_actions(&self) -> &[BattleAction] {
        &self.pending
    }

    /// Queue a move. An empty `targets` list picks the move's default targets.
    pub fn submit_move(&mut self, battler: BattlerId, move_slot: usize, targets: &[BattlerId]) -> Result<(), ActionError> {
        self.validate_actor(battler, true)?;
        let Some(instance) = self.ctx.battler(battler).move_slot(move_slot) else {
            return Err(ActionError::InvalidMoveIndex(move_slot));
        };
        let move_data = instance.data;
        if let Some(unknown) = targets.iter().find(|&&t| !self.ctx.is_on_roster(t)) {
            return Err(ActionError::UnknownBattler(unknown.0));
        }

        let targets = if targets.is_empty() {
            default_targets(&self.ctx, battler, move_data)
        } else {
            targets.to_vec()
        };
        self.pending
            .push(BattleAction::use_move(&self.ctx, battler, move_slot, &targets));
        Ok(())
    }

    /// Queue a switch. A fainted active battler may still be switched out.
    pub fn submit_switch(&mut self, battler: BattlerId, replacement: BattlerId) -> Result<(), ActionError> {
        self.validate_actor(battler, false)?;
        let side = self.ctx.battler(battler).side;
        let already_chosen = self.pending.iter().any(|action| {
            matches!(action.kind, ActionKind::Switch { replacement: r } if r == replacement)
        });
        let valid = self.ctx.side(side).roster.contains(&replacement)
            && !self.ctx.is_active(replacement)
            && !self.ctx.battler(replacement).is_fainted()
            && !already_chosen;
        if !valid {
            return Err(ActionError::InvalidSwitchTarget(replacement.0));
        }
        self.pending.push(BattleAction::switch(battler, replacement));
        Ok(())
    }

    pub fn submit_item(&mut self, battler: BattlerId, item: BagItem, target: BattlerId) -> Result<(), ActionError> {
        self.validate_actor(battler, true)?;
        let side = self.ctx.battler(battler).side;
        let valid = self
            .ctx
            .try_battler(target)
            .is_some_and(|t| t.side == side && !t.is_fainted());
        if !valid {
            return Err(ActionError::InvalidItemTarget(target.0));
        }
        self.pending.push(BattleAction::use_item(battler, item, target));
        Ok(())
    }

    /// Drop every queued action without resolving it.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Resolve the queued actions as one turn.
    pub fn execute_turn(&mut self) -> Vec<ActionReport> {
        let actions = std::mem::take(&mut self.pending);
        let reports = TurnScheduler::begin(&mut self.ctx, &mut self.rng, &self.distributor, actions).run_to_end();
        self.log_outcome();
        reports
    }

    /// Resolve the queued actions one report at a time. Each report is sent to
    /// `reports` and the next step waits for a [`Proceed`] on `proceed`.
    ///
    /// If the presentation side goes away, the turn still runs to completion
    /// without presenting the rest, and the error is returned afterwards.
    pub async fn execute_turn_presented(
        &mut self,
        reports: &mpsc::Sender<ActionReport>,
        proceed: &mut mpsc::Receiver<Proceed>,
    ) -> Result<(), PresentationError> {
        let actions = std::mem::take(&mut self.pending);
        let mut scheduler = TurnScheduler::begin(&mut self.ctx, &mut self.rng, &self.distributor, actions);

        let mut presented = Ok(());
        while let Some(report) = scheduler.next_action() {
            if presented.is_ok() {
                presented = present(report, reports, proceed).await;
            }
        }
        let closing = scheduler.finish_turn();
        if presented.is_ok() {
            presented = present(closing, reports, proceed).await;
        }

        if let Err(error) = &presented {
            tracing::warn!(%error, "presentation ended before the turn did");
        }
        self.log_outcome();
        presented
    }

    /// End the battle, handing both parties back with their battle results.
    pub fn into_parties(self) -> [Vec<PokemonInst>; 2] {
        self.ctx.into_parties()
    }

    fn has_pending(&self, battler: BattlerId) -> bool {
        self.pending.iter().any(|action| action.battler == battler)
    }

    fn validate_actor(&self, battler: BattlerId, must_be_healthy: bool) -> Result<(), ActionError> {
        if !self.ctx.is_on_roster(battler) {
            return Err(ActionError::UnknownBattler(battler.0));
        }
        if !self.ctx.is_active(battler) || (must_be_healthy && self.ctx.battler(battler).is_fainted()) {
            return Err(ActionError::BattlerNotActive(battler.0));
        }
        if self.has_pending(battler) {
            return Err(ActionError::DuplicateAction(battler.0));
        }
        Ok(())
    }

    fn log_outcome(&self) {
        match self.winner() {
            Some(side) => tracing::info!(?side, turn = self.ctx.turn_number, "battle decided"),
            None => tracing::debug!(turn = self.ctx.turn_number, "awaiting actions"),
        }
    }
}

async fn present(
    report: ActionReport,
    reports: &mpsc::Sender<ActionReport>,
    proceed: &mut mpsc::Receiver<Proceed>,
) -> Result<(), PresentationError> {
    reports
        .send(report)
        .await
        .map_err(|_| PresentationError::ReportChannelClosed)?;
    proceed
        .recv()
        .await
        .ok_or(PresentationError::ProceedChannelClosed)?;
    Ok(())
}
