use crate::{BattleStat, PokemonType, StatusKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which battlers a move may be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    User,
    SingleOther,
    SingleOpponent,
    AllOpponents,
    AllOthers,
}

impl TargetKind {
    pub fn is_spread(self) -> bool {
        matches!(self, TargetKind::AllOpponents | TargetKind::AllOthers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CriticalOverride {
    Normal,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectRecipient {
    User,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveEffect {
    None,
    InflictStatus(StatusKind),
    ChangeStats {
        recipient: EffectRecipient,
        changes: &'static [(BattleStat, i8)],
    },
    Flinch,
}

/// A secondary effect gated by a percentage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdditionalEffect {
    pub chance: u8,
    pub effect: MoveEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveData {
    pub id: &'static str,
    pub name: &'static str,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u16>,
    /// `None` means the move never misses.
    pub accuracy: Option<u16>,
    pub max_pp: u8,
    pub priority: i8,
    pub target: TargetKind,
    pub critical_stages: u8,
    pub critical_override: CriticalOverride,
    pub effect: MoveEffect,
    pub additional_effect: Option<AdditionalEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power.is_some()
    }
}
