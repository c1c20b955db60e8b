#[cfg(test)]
mod tests {
    use crate::battle::action_stack::TargetWithIndex;
    use crate::battle::battler::BattlerId;
    use crate::battle::engine::{execute_use_move, ActionResult, MoveOutcome};
    use crate::battle::state::{ActionFailureReason, BattleContext, BattleRng, EventBus};
    use crate::battle::tests::common::{create_test_context, TestPokemonBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pikachu_vs_snorlax(pikachu: TestPokemonBuilder) -> (BattleContext, BattlerId, BattlerId) {
        create_test_context(pikachu, TestPokemonBuilder::new("SNORLAX", 50))
    }

    fn tackle(ctx: &mut BattleContext, user: BattlerId, target: BattlerId, rng: &mut BattleRng) -> (MoveOutcome, EventBus) {
        let mut bus = EventBus::new();
        let outcome = execute_use_move(user, 0, &TargetWithIndex::list(&[target]), ctx, &mut bus, rng);
        (outcome, bus)
    }

    #[test]
    fn test_sleeping_battler_counts_down_without_paying() {
        let (mut ctx, pikachu, snorlax) =
            pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50).with_status(StatusCondition::Sleep(2)));
        let mut rng = BattleRng::new_for_test(vec![]);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        assert_eq!(
            outcome.result,
            ActionResult::Prevented(ActionFailureReason::IsAsleep)
        );
        assert_eq!(
            ctx.battler(pikachu).status_condition(),
            Some(StatusCondition::Sleep(1))
        );
        assert_eq!(ctx.battler(pikachu).pokemon.moves[0].pp, 35);
        assert!(bus.messages(&ctx).contains(&"Pikachu is fast asleep.".to_string()));
    }

    #[test]
    fn test_sleep_counter_at_zero_wakes_and_acts() {
        let (mut ctx, pikachu, snorlax) =
            pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50).with_status(StatusCondition::Sleep(0)));
        let mut rng = BattleRng::new_for_test(vec![0, 1, 0]);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        assert_eq!(outcome.result, ActionResult::Applied);
        assert_eq!(ctx.battler(pikachu).status_condition(), None);
        let messages = bus.messages(&ctx);
        assert!(messages.contains(&"Pikachu woke up!".to_string()));
        assert!(messages.contains(&"Pikachu used Tackle!".to_string()));
    }

    #[rstest]
    #[case(vec![20], false)]
    #[case(vec![99], false)]
    #[case(vec![19, 0, 1, 0], true)]
    #[case(vec![0, 0, 1, 0], true)]
    fn test_frozen_battler_thaws_one_time_in_five(#[case] draws: Vec<u32>, #[case] thaws: bool) {
        let (mut ctx, pikachu, snorlax) =
            pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50).with_status(StatusCondition::Freeze));
        let mut rng = BattleRng::new_for_test(draws);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        if thaws {
            assert_eq!(outcome.result, ActionResult::Applied);
            assert_eq!(ctx.battler(pikachu).status_condition(), None);
            assert!(bus.messages(&ctx).contains(&"Pikachu thawed out!".to_string()));
        } else {
            assert_eq!(
                outcome.result,
                ActionResult::Prevented(ActionFailureReason::IsFrozen)
            );
            assert_eq!(
                ctx.battler(pikachu).status_condition(),
                Some(StatusCondition::Freeze)
            );
            assert!(bus.messages(&ctx).contains(&"Pikachu is frozen solid!".to_string()));
        }
        assert_eq!(rng.remaining_scripted(), Some(0));
    }

    #[rstest]
    #[case(vec![24], false)]
    #[case(vec![0], false)]
    #[case(vec![25, 0, 1, 0], true)]
    fn test_paralysis_stops_one_time_in_four(#[case] draws: Vec<u32>, #[case] acts: bool) {
        let (mut ctx, pikachu, snorlax) =
            pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50).with_status(StatusCondition::Paralysis));
        let mut rng = BattleRng::new_for_test(draws);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        if acts {
            assert_eq!(outcome.result, ActionResult::Applied);
        } else {
            assert_eq!(
                outcome.result,
                ActionResult::Prevented(ActionFailureReason::IsParalyzed)
            );
            assert!(bus
                .messages(&ctx)
                .contains(&"Pikachu is paralyzed! It can't move!".to_string()));
            assert_eq!(ctx.battler(pikachu).pokemon.moves[0].pp, 35);
        }
        // Paralysis is never cured by failing to move.
        assert_eq!(
            ctx.battler(pikachu).status_condition(),
            Some(StatusCondition::Paralysis)
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(StatusCondition::Paralysis))]
    fn test_flinch_is_checked_before_paralysis(#[case] status: Option<StatusCondition>) {
        let mut builder = TestPokemonBuilder::new("PIKACHU", 50);
        if let Some(status) = status {
            builder = builder.with_status(status);
        }
        let (mut ctx, pikachu, snorlax) = pikachu_vs_snorlax(builder);
        ctx.battler_mut(pikachu).flinched = true;
        let mut rng = BattleRng::new_for_test(vec![]);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        assert_eq!(
            outcome.result,
            ActionResult::Prevented(ActionFailureReason::IsFlinching)
        );
        assert_eq!(rng.draws(), 0);
        assert!(bus
            .messages(&ctx)
            .contains(&"Pikachu flinched and couldn't move!".to_string()));
    }

    #[test]
    fn test_no_pp_is_a_cost_failure() {
        let (mut ctx, pikachu, snorlax) =
            pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50).with_pp(&[0]));
        let mut rng = BattleRng::new_for_test(vec![]);

        let (outcome, bus) = tackle(&mut ctx, pikachu, snorlax, &mut rng);

        assert_eq!(outcome.result, ActionResult::CostFailure);
        assert!(outcome.per_target.is_empty());
        assert_eq!(rng.draws(), 0);
        assert!(bus
            .messages(&ctx)
            .contains(&"Pikachu has no PP left for that move!".to_string()));
        assert_eq!(ctx.battler(snorlax).current_hp, ctx.battler(snorlax).max_hp());
    }

    #[test]
    fn test_empty_move_slot_is_a_cost_failure() {
        let (mut ctx, pikachu, snorlax) = pikachu_vs_snorlax(TestPokemonBuilder::new("PIKACHU", 50));
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);

        let outcome = execute_use_move(
            pikachu,
            3,
            &TargetWithIndex::list(&[snorlax]),
            &mut ctx,
            &mut bus,
            &mut rng,
        );

        assert_eq!(outcome.result, ActionResult::CostFailure);
        assert!(bus.is_empty());
    }
}
