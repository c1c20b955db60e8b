pub mod action_stack;
pub mod attributes;
pub mod battler;
pub mod calculators;
pub mod commands;
pub mod conditions;
pub mod engine;
pub mod modifiers;
pub mod move_effects;
pub mod progression;
pub mod runner;
pub mod state;
pub mod stats;
pub mod turn_orchestrator;

#[cfg(test)]
mod tests;

pub use action_stack::{ActionKind, BagItem, BattleAction};
pub use battler::{Battler, BattlerId, SideId};
pub use engine::{ActionResult, TargetOutcome};
pub use runner::{BattleRunner, Proceed};
pub use state::{BattleContext, BattleEvent, BattleRng, EventBus};
pub use turn_orchestrator::{resolve_turn, ActionReport, ReportKind, TurnScheduler};
