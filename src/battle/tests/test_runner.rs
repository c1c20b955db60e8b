#[cfg(test)]
mod tests {
    use crate::battle::action_stack::{ActionKind, BagItem};
    use crate::battle::battler::{BattlerId, SideId};
    use crate::battle::runner::{BattleRunner, Proceed};
    use crate::battle::state::{BattleContext, BattleRng};
    use crate::battle::tests::common::{create_test_context, glaceon_vs_garchomp, TestPokemonBuilder};
    use crate::battle::turn_orchestrator::{ActionReport, ReportKind};
    use crate::errors::{ActionError, PresentationError};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    /// Glaceon and a benched Togekiss against Garchomp.
    fn runner_with_bench() -> (BattleRunner, BattlerId, BattlerId, BattlerId) {
        let (mut ctx, glaceon, garchomp) = glaceon_vs_garchomp(None);
        let togekiss = ctx.add_battler(
            SideId::Player,
            TestPokemonBuilder::new("TOGEKISS", 50).build(),
            false,
        );
        (BattleRunner::new(ctx, BattleRng::seeded(11)), glaceon, garchomp, togekiss)
    }

    #[test]
    fn test_submit_rejects_invalid_choices() {
        let (mut runner, glaceon, garchomp, togekiss) = runner_with_bench();

        assert_eq!(
            runner.submit_move(BattlerId(9), 0, &[]),
            Err(ActionError::UnknownBattler(9))
        );
        assert_eq!(
            runner.submit_move(glaceon, 3, &[garchomp]),
            Err(ActionError::InvalidMoveIndex(3))
        );
        assert_eq!(
            runner.submit_move(glaceon, 0, &[BattlerId(9)]),
            Err(ActionError::UnknownBattler(9))
        );
        assert_eq!(
            runner.submit_move(togekiss, 0, &[garchomp]),
            Err(ActionError::BattlerNotActive(togekiss.0))
        );
        assert_eq!(
            runner.submit_switch(glaceon, garchomp),
            Err(ActionError::InvalidSwitchTarget(garchomp.0))
        );
        assert_eq!(
            runner.submit_item(glaceon, BagItem::Potion, garchomp),
            Err(ActionError::InvalidItemTarget(garchomp.0))
        );
        assert!(runner.pending_actions().is_empty());

        assert_eq!(runner.submit_move(glaceon, 0, &[garchomp]), Ok(()));
        assert_eq!(
            runner.submit_switch(glaceon, togekiss),
            Err(ActionError::DuplicateAction(glaceon.0))
        );
        assert_eq!(runner.battlers_needing_actions(), vec![garchomp]);
    }

    #[test]
    fn test_empty_target_list_uses_default_targets() {
        let (mut runner, glaceon, garchomp, _) = runner_with_bench();

        runner.submit_move(garchomp, 0, &[]).unwrap();

        match &runner.pending_actions()[0].kind {
            ActionKind::UseMove { targets, .. } => {
                let chosen: Vec<BattlerId> = targets.iter().map(|t| t.battler).collect();
                assert_eq!(chosen, vec![glaceon]);
            }
            other => panic!("expected a move, got {:?}", other),
        }
    }

    #[test]
    fn test_fainted_active_battler_may_only_switch() {
        let (mut runner, glaceon, _, togekiss) = runner_with_bench();
        runner.context_mut().battler_mut(glaceon).fainted = true;

        assert_eq!(
            runner.submit_move(glaceon, 0, &[]),
            Err(ActionError::BattlerNotActive(glaceon.0))
        );
        assert_eq!(runner.submit_switch(glaceon, togekiss), Ok(()));
    }

    #[test]
    fn test_execute_turn_runs_queued_actions() {
        let (mut runner, glaceon, garchomp, _) = runner_with_bench();
        runner.submit_move(glaceon, 0, &[garchomp]).unwrap();
        runner.submit_move(garchomp, 0, &[glaceon]).unwrap();

        let reports = runner.execute_turn();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports.last().map(|r| r.kind), Some(ReportKind::EndOfTurn));
        assert_eq!(runner.turn_number(), 2);
        assert!(runner.pending_actions().is_empty());
    }

    #[test]
    fn test_clear_pending_discards_choices() {
        let (mut runner, glaceon, garchomp, _) = runner_with_bench();
        runner.submit_move(glaceon, 0, &[garchomp]).unwrap();

        runner.clear_pending();

        assert!(runner.pending_actions().is_empty());
        assert_eq!(runner.battlers_needing_actions(), vec![glaceon, garchomp]);
    }

    #[tokio::test]
    async fn test_presented_turn_waits_for_each_proceed() {
        let (mut runner, glaceon, garchomp, _) = runner_with_bench();
        runner.submit_move(glaceon, 0, &[garchomp]).unwrap();
        runner.submit_move(garchomp, 0, &[glaceon]).unwrap();
        let (report_tx, mut report_rx) = mpsc::channel::<ActionReport>(1);
        let (proceed_tx, mut proceed_rx) = mpsc::channel(1);

        let presenter = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(report) = report_rx.recv().await {
                seen.push(report.kind);
                if proceed_tx.send(Proceed).await.is_err() {
                    break;
                }
            }
            seen
        });

        let result = runner.execute_turn_presented(&report_tx, &mut proceed_rx).await;
        drop(report_tx);
        let seen = presenter.await.unwrap();

        assert_eq!(result, Ok(()));
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], ReportKind::Action { battler, .. } if battler == garchomp));
        assert_eq!(seen[2], ReportKind::EndOfTurn);
        assert_eq!(runner.turn_number(), 2);
    }

    #[tokio::test]
    async fn test_closed_presenter_still_finishes_the_turn() {
        let (mut runner, glaceon, garchomp, _) = runner_with_bench();
        runner.submit_move(glaceon, 0, &[garchomp]).unwrap();
        runner.submit_move(garchomp, 0, &[glaceon]).unwrap();
        let (report_tx, _report_rx) = mpsc::channel::<ActionReport>(4);
        let (proceed_tx, mut proceed_rx) = mpsc::channel::<Proceed>(1);
        drop(proceed_tx);

        let result = runner.execute_turn_presented(&report_tx, &mut proceed_rx).await;

        assert_eq!(result, Err(PresentationError::ProceedChannelClosed));
        assert_eq!(runner.turn_number(), 2);
        // Both moves were still paid for.
        assert_eq!(runner.context().battler(glaceon).pokemon.moves[0].pp, 14);
        assert_eq!(runner.context().battler(garchomp).pokemon.moves[0].pp, 9);
    }

    #[test]
    fn test_into_parties_returns_battle_results() {
        let (ctx, pikachu, snorlax) = create_test_context(
            TestPokemonBuilder::new("PIKACHU", 50).with_moves(&["THUNDERBOLT"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        let mut runner = BattleRunner::new(ctx, BattleRng::seeded(3));
        runner.submit_move(pikachu, 0, &[snorlax]).unwrap();
        runner.execute_turn();
        let snorlax_hp = runner.context().battler(snorlax).current_hp;

        let [player, opponent] = runner.into_parties();

        assert_eq!(player.len(), 1);
        assert_eq!(player[0].moves[0].pp, 14);
        assert_eq!(opponent[0].current_hp, snorlax_hp);
        assert!(snorlax_hp < opponent[0].max_hp());
    }

    #[test]
    fn test_runner_reports_winner() {
        let mut ctx = BattleContext::new(Default::default());
        let glaceon = ctx.add_battler(SideId::Player, TestPokemonBuilder::new("GLACEON", 50).build(), true);
        ctx.add_battler(
            SideId::Opponent,
            TestPokemonBuilder::new("RATTATA", 5).with_hp(0).build(),
            true,
        );
        let runner = BattleRunner::new(ctx, BattleRng::seeded(1));

        assert!(runner.is_battle_ended());
        assert_eq!(runner.winner(), Some(SideId::Player));
        assert_eq!(runner.battlers_needing_actions(), vec![glaceon]);
    }
}
