use crate::battle::action_stack::BagItem;
use crate::battle::attributes::{AttributeStore, InMemoryAttributeStore};
use crate::battle::battler::{Battler, BattlerId, SideId};
use crate::battle::modifiers::ModifierRegistry;
use crate::battle::stats;
use crate::config::BattleSettings;
use crate::move_data::get_move_data;
use crate::pokemon::{PokemonInst, StatusCondition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{BattleStat, Weather};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsFlinching,
    NoPpRemaining,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalEffectSkipReason {
    /// The hit dealt no damage, so the secondary roll never happens.
    NoDamage,
    /// Modifiers brought the chance to zero.
    ChanceZero,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded {
        turn_number: u32,
    },

    // Non-move actions
    BattlerSwitched {
        side: SideId,
        old: BattlerId,
        new: BattlerId,
    },
    ItemUsed {
        item: BagItem,
        target: BattlerId,
    },

    // Move pipeline
    MoveUsed {
        user: BattlerId,
        move_id: &'static str,
    },
    NoTarget {
        user: BattlerId,
        move_id: &'static str,
    },
    MoveFailed {
        user: BattlerId,
        move_id: &'static str,
        against_all_targets: bool,
    },
    Unaffected {
        target: BattlerId,
        move_id: &'static str,
    },
    AccuracyBypassed {
        target: BattlerId,
        move_id: &'static str,
    },
    AccuracyThreshold {
        target: BattlerId,
        move_id: &'static str,
        threshold: u32,
    },
    MoveMissed {
        user: BattlerId,
        target: BattlerId,
        move_id: &'static str,
    },
    CriticalHit {
        target: BattlerId,
    },
    TypeEffectiveness {
        target: BattlerId,
        multiplier: f32,
    },
    DamageCalculated {
        target: BattlerId,
        damage: u32,
    },
    DamageDealt {
        target: BattlerId,
        damage: u32,
        remaining_hp: u32,
    },
    HpRestored {
        target: BattlerId,
        amount: u32,
        new_hp: u32,
    },
    AdditionalEffectChance {
        target: BattlerId,
        move_id: &'static str,
        chance: u32,
    },
    AdditionalEffectSkipped {
        target: BattlerId,
        move_id: &'static str,
        reason: AdditionalEffectSkipReason,
    },

    // Status
    StatusApplied {
        target: BattlerId,
        status: StatusCondition,
    },
    StatusRemoved {
        target: BattlerId,
        status: StatusCondition,
    },
    StatusDamage {
        target: BattlerId,
        status: StatusCondition,
        damage: u32,
        remaining_hp: u32,
    },

    // Stat Changes
    StatStageChanged {
        target: BattlerId,
        stat: BattleStat,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: BattlerId,
        stat: BattleStat,
        rising: bool,
    },

    // Action Failures
    ActionFailed {
        battler: BattlerId,
        reason: ActionFailureReason,
    },

    // Fainting and progression
    BattlerFainted {
        battler: BattlerId,
    },
    ExperienceGained {
        battler: BattlerId,
        amount: u32,
    },
    LevelUp {
        battler: BattlerId,
        new_level: u32,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for events that should not be displayed to players.
    pub fn format(&self, ctx: &BattleContext) -> Option<String> {
        let name = |id: &BattlerId| ctx.display_name(*id);
        match self {
            BattleEvent::TurnStarted { turn_number } => Some(format!("=== Turn {} ===", turn_number)),
            BattleEvent::TurnEnded { .. } => None,

            BattleEvent::BattlerSwitched { side, old, new } => Some(format!(
                "{} withdrew {} and sent out {}!",
                ctx.side(*side).name,
                name(old),
                name(new)
            )),
            BattleEvent::ItemUsed { item, target } => {
                Some(format!("{} was used on {}.", item, name(target)))
            }

            BattleEvent::MoveUsed { user, move_id } => {
                Some(format!("{} used {}!", name(user), move_name(move_id)))
            }
            BattleEvent::NoTarget { .. } => Some("But there was no target...".to_string()),
            BattleEvent::MoveFailed {
                move_id,
                against_all_targets,
                ..
            } => {
                if *against_all_targets {
                    Some(format!("{} failed against all targets!", move_name(move_id)))
                } else {
                    Some(format!("{} failed!", move_name(move_id)))
                }
            }
            BattleEvent::Unaffected { target, .. } => {
                Some(format!("It doesn't affect {}...", name(target)))
            }
            BattleEvent::AccuracyBypassed { target, move_id } => Some(format!(
                "{} always hits, bypassing accuracy check against {}",
                move_name(move_id),
                name(target)
            )),
            BattleEvent::AccuracyThreshold {
                target, threshold, ..
            } => Some(format!(
                "Accuracy threshold for {} is {}",
                name(target),
                threshold
            )),
            BattleEvent::MoveMissed { target, .. } => {
                Some(format!("{} avoided the attack!", name(target)))
            }
            BattleEvent::CriticalHit { target } => {
                Some(format!("Critical hit against {}!", name(target)))
            }
            BattleEvent::TypeEffectiveness { multiplier, .. } => {
                if *multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else if *multiplier > 0.0 && *multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }
            BattleEvent::DamageCalculated { target, damage } => Some(format!(
                "{} calculated to take {} damage",
                name(target),
                damage
            )),
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", name(target), damage))
            }
            BattleEvent::HpRestored { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", name(target), amount))
            }
            BattleEvent::AdditionalEffectChance {
                target,
                move_id,
                chance,
            } => Some(format!(
                "{}'s additional effect chance against {} calculated to be {}",
                move_name(move_id),
                name(target),
                chance
            )),
            BattleEvent::AdditionalEffectSkipped {
                target,
                move_id,
                reason,
            } => match reason {
                AdditionalEffectSkipReason::NoDamage => Some(format!(
                    "{} didn't take any damage, skipping the additional effect chance!",
                    name(target)
                )),
                AdditionalEffectSkipReason::ChanceZero => Some(format!(
                    "{}'s additional effect chance is 0, skipping!",
                    move_name(move_id)
                )),
            },

            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} is now {}!", name(target), status.kind()))
            }
            BattleEvent::StatusRemoved { target, status } => match status {
                StatusCondition::Sleep(_) => Some(format!("{} woke up!", name(target))),
                StatusCondition::Freeze => Some(format!("{} thawed out!", name(target))),
                other => Some(format!("{} is no longer {}.", name(target), other.kind())),
            },
            BattleEvent::StatusDamage { target, status, .. } => Some(format!(
                "{} is hurt because it is {}!",
                name(target),
                status.kind()
            )),

            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let change = new_stage - old_stage;
                let description = match change {
                    1 => "rose!",
                    2 => "rose sharply!",
                    c if c >= 3 => "rose drastically!",
                    -1 => "fell!",
                    -2 => "harshly fell!",
                    c if c <= -3 => "severely fell!",
                    _ => return None,
                };
                Some(format!("{}'s {} {}", name(target), stat, description))
            }
            BattleEvent::StatChangeBlocked {
                target,
                stat,
                rising,
            } => Some(format!(
                "{}'s {} won't go any {}!",
                name(target),
                stat,
                if *rising { "higher" } else { "lower" }
            )),

            BattleEvent::ActionFailed { battler, reason } => {
                let pokemon = name(battler);
                Some(match reason {
                    ActionFailureReason::IsAsleep => format!("{} is fast asleep.", pokemon),
                    ActionFailureReason::IsFrozen => format!("{} is frozen solid!", pokemon),
                    ActionFailureReason::IsParalyzed => {
                        format!("{} is paralyzed! It can't move!", pokemon)
                    }
                    ActionFailureReason::IsFlinching => {
                        format!("{} flinched and couldn't move!", pokemon)
                    }
                    ActionFailureReason::NoPpRemaining => {
                        format!("{} has no PP left for that move!", pokemon)
                    }
                })
            }

            BattleEvent::BattlerFainted { battler } => Some(format!("{} fainted!", name(battler))),
            BattleEvent::ExperienceGained { battler, amount } => Some(format!(
                "{} gained {} Exp. Points!",
                name(battler),
                amount
            )),
            BattleEvent::LevelUp { battler, new_level } => {
                Some(format!("{} grew to level {}!", name(battler), new_level))
            }
        }
    }

    /// Events that carry the numbers used for balance verification.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            BattleEvent::AccuracyThreshold { .. }
                | BattleEvent::AccuracyBypassed { .. }
                | BattleEvent::DamageCalculated { .. }
                | BattleEvent::AdditionalEffectChance { .. }
                | BattleEvent::AdditionalEffectSkipped { .. }
        )
    }
}

fn move_name(move_id: &str) -> &str {
    get_move_data(move_id).map(|data| data.name).unwrap_or(move_id)
}

/// Event bus for collecting and managing battle events.
///
/// Every pushed event is also written to the `tracing` log; diagnostic events
/// (thresholds, chances, calculated damage) at `info`, the rest at `debug`.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        if event.is_diagnostic() {
            tracing::info!(?event, "diagnostic");
        } else {
            tracing::debug!(?event, "battle event");
        }
        self.events.push(event);
    }

    /// Adds events that were already logged when first pushed elsewhere.
    pub fn append(&mut self, events: Vec<BattleEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Removes and returns everything collected so far.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Formatted text of every displayable event.
    pub fn messages(&self, ctx: &BattleContext) -> Vec<String> {
        self.events.iter().filter_map(|e| e.format(ctx)).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The single random stream of a battle. Every draw names what it is for.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
    draws: u64,
}

impl BattleRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
            draws: 0,
        }
    }

    /// Replays `outcomes` in order; each value is reduced modulo the requested bound.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
            draws: 0,
        }
    }

    /// Uniform integer in `[0, bound)`.
    pub fn next_below(&mut self, bound: u32, reason: &str) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(0..bound),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more scripted values.",
                        reason
                    );
                }
                let outcome = outcomes[*index] % bound;
                *index += 1;
                outcome
            }
        };
        self.draws += 1;
        tracing::trace!(reason, value, bound, "rng draw");
        value
    }

    /// Discard `count` draws.
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.next_below(u32::MAX, "advance");
        }
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Unused scripted values, or None for a seeded stream.
    pub fn remaining_scripted(&self) -> Option<usize> {
        match &self.source {
            RngSource::Seeded(_) => None,
            RngSource::Scripted { outcomes, index } => Some(outcomes.len() - index),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Side {
    pub id: SideId,
    pub name: String,
    pub roster: Vec<BattlerId>,
    pub active: Vec<BattlerId>,
}

impl Side {
    fn new(id: SideId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            roster: Vec::new(),
            active: Vec::new(),
        }
    }
}

/// A caller-supplied speed multiplier, for one side or for the whole field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModifier {
    pub side: Option<SideId>,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FieldState {
    pub weather: Option<Weather>,
    pub speed_modifiers: Vec<SpeedModifier>,
}

/// Everything a battle instance owns except its RNG stream and event log.
pub struct BattleContext {
    battlers: Vec<Battler>,
    sides: [Side; 2],
    pub settings: BattleSettings,
    pub registry: ModifierRegistry,
    pub field: FieldState,
    pub attributes: Box<dyn AttributeStore>,
    pub turn_number: u32,
}

impl BattleContext {
    pub fn new(settings: BattleSettings) -> Self {
        Self {
            battlers: Vec::new(),
            sides: [
                Side::new(SideId::Player, "Player"),
                Side::new(SideId::Opponent, "Opponent"),
            ],
            settings,
            registry: ModifierRegistry::standard(),
            field: FieldState::default(),
            attributes: Box::new(InMemoryAttributeStore::new()),
            turn_number: 1,
        }
    }

    /// Must be called before any battler is added.
    pub fn with_attribute_store(mut self, store: Box<dyn AttributeStore>) -> Self {
        debug_assert!(self.battlers.is_empty());
        self.attributes = store;
        self
    }

    pub fn set_side_name(&mut self, side: SideId, name: &str) {
        self.sides[side.index()].name = name.to_string();
    }

    /// Adds a Pokemon to a side's roster. Active battlers are on the field immediately.
    pub fn add_battler(&mut self, side: SideId, pokemon: PokemonInst, active: bool) -> BattlerId {
        let id = BattlerId(self.battlers.len());
        self.battlers.push(Battler::new(id, side, pokemon));
        let side_state = &mut self.sides[side.index()];
        side_state.roster.push(id);
        if active {
            side_state.active.push(id);
        }
        stats::register_battler(self, id);
        id
    }

    /// Panics for an id outside the arena.
    pub fn battler(&self, id: BattlerId) -> &Battler {
        &self.battlers[id.0]
    }

    pub fn battler_mut(&mut self, id: BattlerId) -> &mut Battler {
        &mut self.battlers[id.0]
    }

    pub fn try_battler(&self, id: BattlerId) -> Option<&Battler> {
        self.battlers.get(id.0)
    }

    pub fn battlers(&self) -> impl Iterator<Item = &Battler> {
        self.battlers.iter()
    }

    pub fn side(&self, side: SideId) -> &Side {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut Side {
        &mut self.sides[side.index()]
    }

    pub fn display_name(&self, id: BattlerId) -> String {
        self.try_battler(id)
            .map(|b| b.nickname().to_string())
            .unwrap_or_else(|| format!("battler {}", id))
    }

    pub fn is_on_roster(&self, id: BattlerId) -> bool {
        self.sides.iter().any(|side| side.roster.contains(&id))
    }

    /// Resolving an action for a battler outside both rosters is a scheduling bug.
    pub fn assert_on_roster(&self, id: BattlerId) {
        if !self.is_on_roster(id) {
            panic!("battler {} is not part of either side's roster", id);
        }
    }

    pub fn is_active(&self, id: BattlerId) -> bool {
        self.try_battler(id)
            .is_some_and(|b| self.side(b.side).active.contains(&id))
    }

    /// Active battlers of both sides, player side first.
    pub fn active_battlers(&self) -> Vec<BattlerId> {
        self.sides
            .iter()
            .flat_map(|side| side.active.iter().copied())
            .collect()
    }

    /// Active, non-fainted battlers on the side opposing `id`.
    pub fn opponents_of(&self, id: BattlerId) -> Vec<BattlerId> {
        let side = self.battler(id).side.opposing();
        self.side(side)
            .active
            .iter()
            .copied()
            .filter(|&other| !self.battler(other).is_fainted())
            .collect()
    }

    /// Active, non-fainted battlers on the same side as `id`, excluding it.
    pub fn allies_of(&self, id: BattlerId) -> Vec<BattlerId> {
        let side = self.battler(id).side;
        self.side(side)
            .active
            .iter()
            .copied()
            .filter(|&other| other != id && !self.battler(other).is_fainted())
            .collect()
    }

    /// Credit `actor` and its active allies on `target`'s ledger.
    pub fn record_participation(&mut self, target: BattlerId, actor: BattlerId) {
        let mut credited = vec![actor];
        credited.extend(self.allies_of(actor));
        let ledger = &mut self.battler_mut(target).participation;
        for battler in credited {
            ledger.record(battler);
        }
    }

    pub fn is_side_defeated(&self, side: SideId) -> bool {
        self.side(side)
            .roster
            .iter()
            .all(|&id| self.battler(id).is_fainted())
    }

    /// End the battle, handing each side's Pokemon back in roster order.
    pub fn into_parties(self) -> [Vec<PokemonInst>; 2] {
        let mut parties: [Vec<PokemonInst>; 2] = [Vec::new(), Vec::new()];
        for battler in self.battlers {
            let side = battler.side.index();
            parties[side].push(battler.into_pokemon());
        }
        parties
    }
}

impl std::fmt::Debug for BattleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleContext")
            .field("battlers", &self.battlers)
            .field("sides", &self.sides)
            .field("field", &self.field)
            .field("turn_number", &self.turn_number)
            .finish_non_exhaustive()
    }
}
