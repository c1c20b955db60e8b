use schema::{SpeciesData, StatKind};

/// Divisor of the standard experience formula: `base_exp * level / 7`.
const EXP_LEVEL_DIVISOR: u32 = 7;

/// Effort Values (EVs) awarded when a Pokemon faints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvYield {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl EvYield {
    pub fn total(&self) -> u8 {
        self.hp
            + self.attack
            + self.defense
            + self.special_attack
            + self.special_defense
            + self.speed
    }

    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
        }
    }

    fn add(&mut self, kind: StatKind, amount: u8) {
        let slot = match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::SpecialAttack => &mut self.special_attack,
            StatKind::SpecialDefense => &mut self.special_defense,
            StatKind::Speed => &mut self.speed,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Everything the experience formula may look at for one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpYieldInput {
    pub base_exp: u16,
    pub fainted_level: u32,
    pub recipient_level: u32,
    pub participant_count: usize,
}

/// Game-balance formula that turns a faint into an experience share.
pub trait ExpYieldFormula: Send + Sync {
    fn experience_share(&self, input: &ExpYieldInput) -> u32;
}

/// Calculator for experience and EV rewards based on Pokemon species
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// Total experience a faint is worth before it is split.
    pub fn calculate_base_exp(&self, base_exp: u16, fainted_level: u32) -> u32 {
        base_exp as u32 * fainted_level / EXP_LEVEL_DIVISOR
    }

    pub fn calculate_ev_yield(&self, species: &SpeciesData) -> EvYield {
        let mut ev_yield = EvYield::default();
        for &(kind, amount) in species.ev_yield {
            ev_yield.add(kind, amount);
        }
        ev_yield
    }
}

impl ExpYieldFormula for RewardCalculator {
    /// Even split among everyone credited for the faint.
    fn experience_share(&self, input: &ExpYieldInput) -> u32 {
        let total = self.calculate_base_exp(input.base_exp, input.fainted_level);
        total / input.participant_count.max(1) as u32
    }
}
