// In: src/battle/modifiers/mod.rs
//
// Abilities, held items and weather plug into the battle through `BattleModifier`.
// Each implementation is registered under a key; the pipeline and the damage
// calculator consult the registry instead of knowing about individual effects.

mod builtin;

use crate::battle::battler::Battler;
use crate::battle::calculators::DamageMultipliers;
use crate::battle::state::{BattleContext, FieldState};
use schema::{MoveData, StatusKind, Weather};

pub use self::builtin::*;

/// Who holds the modifier relative to the move being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderRole {
    User,
    Target,
    Field,
}

/// Read-only view handed to move-related hooks.
pub struct MoveHook<'a> {
    pub ctx: &'a BattleContext,
    pub user: &'a Battler,
    pub target: &'a Battler,
    pub move_data: &'static MoveData,
    pub role: HolderRole,
    pub target_count: usize,
}

/// Hooks an ability, item or field effect may implement. All default to no effect.
pub trait BattleModifier: Send + Sync {
    fn name(&self) -> &str;

    /// Adjust the damage accumulator. Called in registration order.
    fn modify_damage(&self, _hook: &MoveHook<'_>, _multipliers: &mut DamageMultipliers) {}

    fn critical_stage_bonus(&self, _hook: &MoveHook<'_>) -> u32 {
        0
    }

    fn blocks_critical_hits(&self, _hook: &MoveHook<'_>) -> bool {
        false
    }

    /// Factor applied to a move's additional effect chance.
    fn additional_effect_multiplier(&self, _hook: &MoveHook<'_>) -> f64 {
        1.0
    }

    fn accuracy_multiplier(&self, _hook: &MoveHook<'_>) -> f64 {
        1.0
    }

    fn speed_multiplier(&self, _battler: &Battler) -> f64 {
        1.0
    }

    fn prevents_status(&self, _status: StatusKind) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierKey {
    Ability(&'static str),
    Item(&'static str),
    Weather(Weather),
}

impl ModifierKey {
    fn held_by(&self, battler: &Battler) -> bool {
        match self {
            ModifierKey::Ability(id) => battler.ability() == *id,
            ModifierKey::Item(id) => battler.held_item() == Some(*id),
            ModifierKey::Weather(_) => false,
        }
    }

    fn active_on(&self, field: &FieldState) -> bool {
        matches!(self, ModifierKey::Weather(weather) if field.weather == Some(*weather))
    }
}

struct Registration {
    key: ModifierKey,
    modifier: Box<dyn BattleModifier>,
}

/// Ordered lookup table of modifiers. Iteration always follows registration order.
#[derive(Default)]
pub struct ModifierRegistry {
    registrations: Vec<Registration>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: ModifierKey, modifier: Box<dyn BattleModifier>) {
        tracing::debug!(?key, name = modifier.name(), "registered battle modifier");
        self.registrations.push(Registration { key, modifier });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Modifiers carried by one battler (its ability and held item).
    pub fn held_by<'a>(&'a self, battler: &'a Battler) -> impl Iterator<Item = &'a dyn BattleModifier> + 'a {
        self.registrations
            .iter()
            .filter(move |registration| registration.key.held_by(battler))
            .map(|registration| registration.modifier.as_ref())
    }

    /// Every modifier relevant to `user` using a move on `target`, tagged with its role,
    /// in registration order.
    pub fn for_move<'a>(
        &'a self,
        ctx: &BattleContext,
        user: &Battler,
        target: &Battler,
    ) -> Vec<(HolderRole, &'a dyn BattleModifier)> {
        let mut applicable = Vec::new();
        for registration in &self.registrations {
            let modifier = registration.modifier.as_ref();
            if registration.key.held_by(user) {
                applicable.push((HolderRole::User, modifier));
            }
            if target.id != user.id && registration.key.held_by(target) {
                applicable.push((HolderRole::Target, modifier));
            }
            if registration.key.active_on(&ctx.field) {
                applicable.push((HolderRole::Field, modifier));
            }
        }
        applicable
    }

    /// The registry every battle starts with.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        // Abilities
        registry.register(
            ModifierKey::Ability("SERENEGRACE"),
            Box::new(AdditionalEffectScale::new("Serene Grace", 2.0, 1.0)),
        );
        registry.register(
            ModifierKey::Ability("SHIELDDUST"),
            Box::new(AdditionalEffectScale::new("Shield Dust", 1.0, 0.0)),
        );
        registry.register(
            ModifierKey::Ability("SUPERLUCK"),
            Box::new(CriticalBoost::new("Super Luck", 1)),
        );
        registry.register(
            ModifierKey::Ability("BATTLEARMOR"),
            Box::new(CriticalGuard::new("Battle Armor")),
        );
        registry.register(
            ModifierKey::Ability("SHELLARMOR"),
            Box::new(CriticalGuard::new("Shell Armor")),
        );
        registry.register(
            ModifierKey::Ability("LIMBER"),
            Box::new(StatusImmunity::new("Limber", &[StatusKind::Paralysis])),
        );
        registry.register(
            ModifierKey::Ability("WATERVEIL"),
            Box::new(StatusImmunity::new("Water Veil", &[StatusKind::Burn])),
        );
        registry.register(
            ModifierKey::Ability("INSOMNIA"),
            Box::new(StatusImmunity::new("Insomnia", &[StatusKind::Sleep])),
        );
        registry.register(
            ModifierKey::Ability("IMMUNITY"),
            Box::new(StatusImmunity::new(
                "Immunity",
                &[StatusKind::Poison, StatusKind::BadPoison],
            )),
        );
        registry.register(
            ModifierKey::Ability("COMPOUNDEYES"),
            Box::new(AccuracyBoost::new("Compound Eyes", 1.3)),
        );
        registry.register(
            ModifierKey::Ability("THICKFAT"),
            Box::new(TypeResistance::new(
                "Thick Fat",
                &[schema::PokemonType::Fire, schema::PokemonType::Ice],
                0.5,
            )),
        );

        // Held items
        registry.register(
            ModifierKey::Item("SCOPELENS"),
            Box::new(CriticalBoost::new("Scope Lens", 1)),
        );
        registry.register(
            ModifierKey::Item("RAZORCLAW"),
            Box::new(CriticalBoost::new("Razor Claw", 1)),
        );
        registry.register(
            ModifierKey::Item("WIDELENS"),
            Box::new(AccuracyBoost::new("Wide Lens", 1.1)),
        );
        registry.register(
            ModifierKey::Item("MUSCLEBAND"),
            Box::new(PowerBoost::for_category(
                "Muscle Band",
                schema::MoveCategory::Physical,
                1.1,
            )),
        );
        registry.register(
            ModifierKey::Item("WISEGLASSES"),
            Box::new(PowerBoost::for_category(
                "Wise Glasses",
                schema::MoveCategory::Special,
                1.1,
            )),
        );
        registry.register(
            ModifierKey::Item("LIFEORB"),
            Box::new(FinalDamageBoost::new("Life Orb", 1.3)),
        );
        registry.register(
            ModifierKey::Item("CHOICESCARF"),
            Box::new(SpeedBoost::new("Choice Scarf", 1.5)),
        );

        // Weather
        registry.register(
            ModifierKey::Weather(Weather::Sun),
            Box::new(WeatherBoost::new(
                "Harsh Sunlight",
                schema::PokemonType::Fire,
                schema::PokemonType::Water,
            )),
        );
        registry.register(
            ModifierKey::Weather(Weather::Rain),
            Box::new(WeatherBoost::new(
                "Rain",
                schema::PokemonType::Water,
                schema::PokemonType::Fire,
            )),
        );

        registry
    }
}

impl std::fmt::Debug for ModifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.registrations
                    .iter()
                    .map(|r| (&r.key, r.modifier.name())),
            )
            .finish()
    }
}
