use crate::{PokemonType, StatKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }
}

/// Experience curve families. `exp_for_level` is the cumulative total needed to reach a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthRate {
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
    Erratic,
    Fluctuating,
}

impl GrowthRate {
    pub fn exp_for_level(self, level: u32) -> u32 {
        if level <= 1 {
            return 0;
        }
        let n = level as i64;
        let cube = n * n * n;
        let total = match self {
            GrowthRate::Fast => 4 * cube / 5,
            GrowthRate::MediumFast => cube,
            GrowthRate::MediumSlow => 6 * cube / 5 - 15 * n * n + 100 * n - 140,
            GrowthRate::Slow => 5 * cube / 4,
            GrowthRate::Erratic => {
                if n <= 50 {
                    cube * (100 - n) / 50
                } else if n <= 68 {
                    cube * (150 - n) / 100
                } else if n <= 98 {
                    cube * ((1911 - 10 * n) / 3) / 500
                } else {
                    cube * (160 - n) / 100
                }
            }
            GrowthRate::Fluctuating => {
                if n <= 15 {
                    cube * ((n + 1) / 3 + 24) / 50
                } else if n <= 36 {
                    cube * (n + 14) / 50
                } else {
                    cube * (n / 2 + 32) / 50
                }
            }
        };
        total.max(0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesData {
    pub id: &'static str,
    pub name: &'static str,
    pub types: &'static [PokemonType],
    pub base_stats: BaseStats,
    pub base_exp: u16,
    pub growth_rate: GrowthRate,
    pub ev_yield: &'static [(StatKind, u8)],
}

impl SpeciesData {
    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nature {
    pub id: &'static str,
    pub name: &'static str,
    pub increased: Option<StatKind>,
    pub decreased: Option<StatKind>,
}

impl Nature {
    /// Multiplier this nature applies to `kind`: 1.1, 0.9 or 1.0.
    pub fn multiplier(&self, kind: StatKind) -> f64 {
        if self.increased == self.decreased {
            return 1.0;
        }
        if self.increased == Some(kind) {
            1.1
        } else if self.decreased == Some(kind) {
            0.9
        } else {
            1.0
        }
    }
}
