use std::collections::VecDeque;
use std::fmt;

use crate::battle::battler::BattlerId;
use crate::battle::state::{BattleContext, BattleRng};
use crate::battle::stats::effective_speed;
use serde::Serialize;

pub const SWITCH_PRIORITY: i8 = 6;
pub const ITEM_PRIORITY: i8 = 5;

/// Items usable from the bag during battle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagItem {
    Potion,
    SuperPotion,
    FullHeal,
}

impl BagItem {
    pub fn heal_amount(self) -> u32 {
        match self {
            BagItem::Potion => 20,
            BagItem::SuperPotion => 60,
            BagItem::FullHeal => 0,
        }
    }

    pub fn cures_status(self) -> bool {
        matches!(self, BagItem::FullHeal)
    }
}

impl fmt::Display for BagItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            BagItem::Potion => "Potion",
            BagItem::SuperPotion => "Super Potion",
            BagItem::FullHeal => "Full Heal",
        };
        write!(f, "{}", display_name)
    }
}

/// A chosen target and its position in the action's target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetWithIndex {
    pub battler: BattlerId,
    pub index: usize,
}

impl TargetWithIndex {
    pub fn list(targets: &[BattlerId]) -> Vec<TargetWithIndex> {
        targets
            .iter()
            .enumerate()
            .map(|(index, &battler)| TargetWithIndex { battler, index })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    UseMove {
        move_slot: usize,
        targets: Vec<TargetWithIndex>,
    },
    Switch {
        replacement: BattlerId,
    },
    UseItem {
        item: BagItem,
        target: BattlerId,
    },
}

/// One battler's finalized choice for the turn.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleAction {
    pub battler: BattlerId,
    pub kind: ActionKind,
    pub priority: i8,
}

impl BattleAction {
    /// A move use; priority comes from the move in `move_slot` (0 for an empty slot).
    pub fn use_move(ctx: &BattleContext, battler: BattlerId, move_slot: usize, targets: &[BattlerId]) -> Self {
        let priority = ctx
            .try_battler(battler)
            .and_then(|b| b.move_slot(move_slot))
            .map(|instance| instance.data.priority)
            .unwrap_or(0);
        Self {
            battler,
            kind: ActionKind::UseMove {
                move_slot,
                targets: TargetWithIndex::list(targets),
            },
            priority,
        }
    }

    pub fn switch(battler: BattlerId, replacement: BattlerId) -> Self {
        Self {
            battler,
            kind: ActionKind::Switch { replacement },
            priority: SWITCH_PRIORITY,
        }
    }

    pub fn use_item(battler: BattlerId, item: BagItem, target: BattlerId) -> Self {
        Self {
            battler,
            kind: ActionKind::UseItem { item, target },
            priority: ITEM_PRIORITY,
        }
    }
}

/// Ordered queue of the actions still to run this turn.
#[derive(Debug, Clone, Default)]
pub struct ActionStack {
    actions: VecDeque<BattleAction>,
}

impl ActionStack {
    /// Creates a new, empty ActionStack.
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    /// Orders a turn's actions and builds the stack from them.
    pub fn build_initial(ctx: &BattleContext, actions: Vec<BattleAction>, rng: &mut BattleRng) -> Self {
        Self {
            actions: Self::determine_action_order(ctx, actions, rng).into(),
        }
    }

    pub fn pop_front(&mut self) -> Option<BattleAction> {
        self.actions.pop_front()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Priority descending, then effective speed descending. Each group of actions
    /// tied on both keys is shuffled with the battle RNG.
    fn determine_action_order(
        ctx: &BattleContext,
        actions: Vec<BattleAction>,
        rng: &mut BattleRng,
    ) -> Vec<BattleAction> {
        let mut keyed: Vec<(BattleAction, f64)> = actions
            .into_iter()
            .map(|action| {
                let speed = ctx
                    .try_battler(action.battler)
                    .map(|_| effective_speed(ctx, action.battler))
                    .unwrap_or(0.0);
                (action, speed)
            })
            .collect();

        keyed.sort_by(|a, b| {
            b.0.priority
                .cmp(&a.0.priority)
                .then_with(|| b.1.total_cmp(&a.1))
        });

        let mut start = 0;
        while start < keyed.len() {
            let mut end = start + 1;
            while end < keyed.len()
                && keyed[end].0.priority == keyed[start].0.priority
                && keyed[end].1 == keyed[start].1
            {
                end += 1;
            }
            let group = &mut keyed[start..end];
            for i in (1..group.len()).rev() {
                let j = rng.next_below(i as u32 + 1, "speed tie") as usize;
                group.swap(i, j);
            }
            start = end;
        }

        keyed.into_iter().map(|(action, _)| action).collect()
    }
}
