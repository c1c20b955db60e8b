// In: src/lib.rs

//! Pokemon Battle Engine
//!
//! Deterministic resolution of battle turns: action ordering, the move
//! execution pipeline, damage, status conditions, faint handling and
//! experience distribution. Static data lives in the `schema` crate and is
//! compiled into `phf` lookup tables.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod pokemon;
pub mod progression;
pub mod species;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BattleStat, CriticalOverride, EffectRecipient, GrowthRate, MoveCategory, MoveData, MoveEffect,
    Nature, PokemonType, SpeciesData, StatKind, StatusKind, TargetKind, Weather,
};

// --- From this crate's modules (`src/`) ---

// Battle driving and state.
pub use battle::{
    resolve_turn, ActionReport, ActionResult, BagItem, BattleAction, BattleContext, BattleEvent,
    BattleRng, BattleRunner, BattlerId, EventBus, Proceed, ReportKind, SideId, TurnScheduler,
};
pub use config::BattleSettings;

// Persistent Pokemon data.
pub use pokemon::{PokemonDto, PokemonInst, StatusCondition};
pub use progression::{LevelUpStatChanges, RewardCalculator};

// Primary data access functions.
pub use move_data::get_move_data;
pub use species::{get_nature, get_species_data};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, ConfigError, MoveDataError, MoveDataResult,
    NatureDataError, PresentationError, SpeciesDataError, SpeciesDataResult,
};
