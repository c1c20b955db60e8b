use super::{BattleModifier, HolderRole, MoveHook};
use crate::battle::battler::Battler;
use crate::battle::calculators::DamageMultipliers;
use schema::{MoveCategory, PokemonType, StatusKind};

/// Scales additional effect chances of moves used by (or against) the holder.
pub struct AdditionalEffectScale {
    name: &'static str,
    as_user: f64,
    as_target: f64,
}

impl AdditionalEffectScale {
    pub fn new(name: &'static str, as_user: f64, as_target: f64) -> Self {
        Self {
            name,
            as_user,
            as_target,
        }
    }
}

impl BattleModifier for AdditionalEffectScale {
    fn name(&self) -> &str {
        self.name
    }

    fn additional_effect_multiplier(&self, hook: &MoveHook<'_>) -> f64 {
        match hook.role {
            HolderRole::User => self.as_user,
            HolderRole::Target => self.as_target,
            HolderRole::Field => 1.0,
        }
    }
}

pub struct CriticalBoost {
    name: &'static str,
    stages: u32,
}

impl CriticalBoost {
    pub fn new(name: &'static str, stages: u32) -> Self {
        Self { name, stages }
    }
}

impl BattleModifier for CriticalBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn critical_stage_bonus(&self, hook: &MoveHook<'_>) -> u32 {
        if hook.role == HolderRole::User {
            self.stages
        } else {
            0
        }
    }
}

/// The holder can never be hit critically.
pub struct CriticalGuard {
    name: &'static str,
}

impl CriticalGuard {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl BattleModifier for CriticalGuard {
    fn name(&self) -> &str {
        self.name
    }

    fn blocks_critical_hits(&self, hook: &MoveHook<'_>) -> bool {
        hook.role == HolderRole::Target
    }
}

pub struct StatusImmunity {
    name: &'static str,
    statuses: &'static [StatusKind],
}

impl StatusImmunity {
    pub fn new(name: &'static str, statuses: &'static [StatusKind]) -> Self {
        Self { name, statuses }
    }
}

impl BattleModifier for StatusImmunity {
    fn name(&self) -> &str {
        self.name
    }

    fn prevents_status(&self, status: StatusKind) -> bool {
        self.statuses.contains(&status)
    }
}

pub struct AccuracyBoost {
    name: &'static str,
    multiplier: f64,
}

impl AccuracyBoost {
    pub fn new(name: &'static str, multiplier: f64) -> Self {
        Self { name, multiplier }
    }
}

impl BattleModifier for AccuracyBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn accuracy_multiplier(&self, hook: &MoveHook<'_>) -> f64 {
        if hook.role == HolderRole::User {
            self.multiplier
        } else {
            1.0
        }
    }
}

pub struct SpeedBoost {
    name: &'static str,
    multiplier: f64,
}

impl SpeedBoost {
    pub fn new(name: &'static str, multiplier: f64) -> Self {
        Self { name, multiplier }
    }
}

impl BattleModifier for SpeedBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn speed_multiplier(&self, _battler: &Battler) -> f64 {
        self.multiplier
    }
}

/// Raises the power of the holder's moves of one category.
pub struct PowerBoost {
    name: &'static str,
    category: MoveCategory,
    multiplier: f64,
}

impl PowerBoost {
    pub fn for_category(name: &'static str, category: MoveCategory, multiplier: f64) -> Self {
        Self {
            name,
            category,
            multiplier,
        }
    }
}

impl BattleModifier for PowerBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn modify_damage(&self, hook: &MoveHook<'_>, multipliers: &mut DamageMultipliers) {
        if hook.role == HolderRole::User && hook.move_data.category == self.category {
            multipliers.power *= self.multiplier;
        }
    }
}

pub struct FinalDamageBoost {
    name: &'static str,
    multiplier: f64,
}

impl FinalDamageBoost {
    pub fn new(name: &'static str, multiplier: f64) -> Self {
        Self { name, multiplier }
    }
}

impl BattleModifier for FinalDamageBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn modify_damage(&self, hook: &MoveHook<'_>, multipliers: &mut DamageMultipliers) {
        if hook.role == HolderRole::User {
            multipliers.final_damage *= self.multiplier;
        }
    }
}

/// Weakens the attacker's stat against the holder for moves of the listed types.
pub struct TypeResistance {
    name: &'static str,
    types: &'static [PokemonType],
    multiplier: f64,
}

impl TypeResistance {
    pub fn new(name: &'static str, types: &'static [PokemonType], multiplier: f64) -> Self {
        Self {
            name,
            types,
            multiplier,
        }
    }
}

impl BattleModifier for TypeResistance {
    fn name(&self) -> &str {
        self.name
    }

    fn modify_damage(&self, hook: &MoveHook<'_>, multipliers: &mut DamageMultipliers) {
        if hook.role == HolderRole::Target && self.types.contains(&hook.move_data.move_type) {
            multipliers.attack *= self.multiplier;
        }
    }
}

pub struct WeatherBoost {
    name: &'static str,
    boosted: PokemonType,
    weakened: PokemonType,
}

impl WeatherBoost {
    pub fn new(name: &'static str, boosted: PokemonType, weakened: PokemonType) -> Self {
        Self {
            name,
            boosted,
            weakened,
        }
    }
}

impl BattleModifier for WeatherBoost {
    fn name(&self) -> &str {
        self.name
    }

    fn modify_damage(&self, hook: &MoveHook<'_>, multipliers: &mut DamageMultipliers) {
        if hook.role != HolderRole::Field {
            return;
        }
        if hook.move_data.move_type == self.boosted {
            multipliers.final_damage *= 1.5;
        } else if hook.move_data.move_type == self.weakened {
            multipliers.final_damage *= 0.5;
        }
    }
}
