#[cfg(test)]
mod tests {
    use crate::battle::action_stack::TargetWithIndex;
    use crate::battle::battler::SideId;
    use crate::battle::engine::{execute_use_move, ActionResult, TargetOutcome};
    use crate::battle::state::{BattleContext, BattleEvent, BattleRng, EventBus};
    use crate::battle::tests::common::{create_test_context, TestPokemonBuilder};
    use crate::config::BattleSettings;
    use pretty_assertions::assert_eq;
    use schema::BattleStat;

    #[test]
    fn test_nasty_plot_at_cap_fails() {
        let (mut ctx, alakazam, _) = create_test_context(
            TestPokemonBuilder::new("ALAKAZAM", 50).with_moves(&["NASTYPLOT"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        ctx.battler_mut(alakazam)
            .stat_stages
            .set(BattleStat::SpecialAttack, 6);
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);

        let outcome = execute_use_move(alakazam, 0, &[], &mut ctx, &mut bus, &mut rng);

        assert_eq!(outcome.result, ActionResult::Failed);
        assert!(bus.events().contains(&BattleEvent::MoveFailed {
            user: alakazam,
            move_id: "NASTYPLOT",
            against_all_targets: false,
        }));
        assert!(bus.messages(&ctx).contains(&"Nasty Plot failed!".to_string()));
        assert_eq!(ctx.battler(alakazam).pokemon.moves[0].pp, 19);
    }

    #[test]
    fn test_nasty_plot_raises_sharply_without_drawing() {
        let (mut ctx, alakazam, _) = create_test_context(
            TestPokemonBuilder::new("ALAKAZAM", 50).with_moves(&["NASTYPLOT"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);

        let outcome = execute_use_move(alakazam, 0, &[], &mut ctx, &mut bus, &mut rng);

        assert_eq!(outcome.result, ActionResult::Applied);
        assert_eq!(rng.draws(), 0);
        assert_eq!(
            ctx.battler(alakazam).stat_stages.get(BattleStat::SpecialAttack),
            2
        );
        assert!(bus
            .messages(&ctx)
            .contains(&"Alakazam's Sp. Atk rose sharply!".to_string()));
    }

    #[test]
    fn test_metal_sound_against_floored_target_fails() {
        let (mut ctx, lucario, snorlax) = create_test_context(
            TestPokemonBuilder::new("LUCARIO", 50).with_moves(&["METALSOUND"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        ctx.battler_mut(snorlax)
            .stat_stages
            .set(BattleStat::SpecialDefense, -6);
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);

        let outcome = execute_use_move(
            lucario,
            0,
            &TargetWithIndex::list(&[snorlax]),
            &mut ctx,
            &mut bus,
            &mut rng,
        );

        assert_eq!(outcome.result, ActionResult::Failed);
        assert_eq!(rng.draws(), 0);
        assert!(bus
            .messages(&ctx)
            .contains(&"Metal Sound failed against all targets!".to_string()));
    }

    #[test]
    fn test_metal_sound_is_clamped_at_the_floor() {
        let (mut ctx, lucario, snorlax) = create_test_context(
            TestPokemonBuilder::new("LUCARIO", 50).with_moves(&["METALSOUND"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        ctx.battler_mut(snorlax)
            .stat_stages
            .set(BattleStat::SpecialDefense, -5);
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![0]);

        execute_use_move(
            lucario,
            0,
            &TargetWithIndex::list(&[snorlax]),
            &mut ctx,
            &mut bus,
            &mut rng,
        );

        assert_eq!(
            ctx.battler(snorlax).stat_stages.get(BattleStat::SpecialDefense),
            -6
        );
        assert!(bus.events().contains(&BattleEvent::StatStageChanged {
            target: snorlax,
            stat: BattleStat::SpecialDefense,
            old_stage: -5,
            new_stage: -6,
        }));
        assert!(bus
            .messages(&ctx)
            .contains(&"Snorlax's Sp. Def fell!".to_string()));
    }

    #[test]
    fn test_close_combat_lowers_user_defenses_once() {
        let (mut ctx, lucario, snorlax) = create_test_context(
            TestPokemonBuilder::new("LUCARIO", 50).with_moves(&["CLOSECOMBAT"]),
            TestPokemonBuilder::new("SNORLAX", 50),
        );
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![0, 1, 0]);

        let outcome = execute_use_move(
            lucario,
            0,
            &TargetWithIndex::list(&[snorlax]),
            &mut ctx,
            &mut bus,
            &mut rng,
        );

        assert_eq!(outcome.result, ActionResult::Applied);
        let stages = ctx.battler(lucario).stat_stages;
        assert_eq!(stages.get(BattleStat::Defense), -1);
        assert_eq!(stages.get(BattleStat::SpecialDefense), -1);
        assert_eq!(stages.get(BattleStat::Attack), 0);
        let changes = bus
            .events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::StatStageChanged { target, .. } if *target == lucario))
            .count();
        assert_eq!(changes, 2);
    }

    #[test]
    fn test_growl_skips_only_the_floored_opponent() {
        let mut ctx = BattleContext::new(BattleSettings::default());
        let pikachu = ctx.add_battler(
            SideId::Player,
            TestPokemonBuilder::new("PIKACHU", 50)
                .with_moves(&["GROWL"])
                .build(),
            true,
        );
        let floored = ctx.add_battler(SideId::Opponent, TestPokemonBuilder::new("SNORLAX", 50).build(), true);
        let healthy = ctx.add_battler(SideId::Opponent, TestPokemonBuilder::new("RATTATA", 50).build(), true);
        ctx.battler_mut(floored)
            .stat_stages
            .set(BattleStat::Attack, -6);
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![0]);

        let outcome = execute_use_move(
            pikachu,
            0,
            &TargetWithIndex::list(&[floored, healthy]),
            &mut ctx,
            &mut bus,
            &mut rng,
        );

        assert_eq!(outcome.result, ActionResult::Applied);
        assert_eq!(outcome.outcome_for(floored), Some(TargetOutcome::Failed));
        assert!(matches!(outcome.outcome_for(healthy), Some(TargetOutcome::Hit { .. })));
        assert_eq!(ctx.battler(healthy).stat_stages.get(BattleStat::Attack), -1);
        assert!(bus
            .events()
            .iter()
            .all(|e| !matches!(e, BattleEvent::MoveFailed { .. })));
    }
}
