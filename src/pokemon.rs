use crate::errors::{BattleResult, MoveDataError, SpeciesDataError};
use crate::move_data::get_move_data;
use crate::progression::{EvYield, LevelUpStatChanges, ValueChange};
use crate::species::{get_nature, get_species_data};
use schema::{BaseStats, GrowthRate, MoveData, Nature, SpeciesData, StatKind, StatusKind};
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;
const MAX_IV: u8 = 31;
const MAX_EV_PER_STAT: u16 = 252;
const MAX_EV_TOTAL: u32 = 510;
const LEVEL_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Turns of sleep remaining.
    Sleep(u8),
    Poison,
    /// Turns spent badly poisoned; residual damage is `n/16`.
    Toxic(u8),
    Burn,
    Freeze,
    Paralysis,
}

impl StatusCondition {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusCondition::Sleep(_) => StatusKind::Sleep,
            StatusCondition::Poison => StatusKind::Poison,
            StatusCondition::Toxic(_) => StatusKind::BadPoison,
            StatusCondition::Burn => StatusKind::Burn,
            StatusCondition::Freeze => StatusKind::Freeze,
            StatusCondition::Paralysis => StatusKind::Paralysis,
        }
    }
}

/// Serializable form of a Pokemon, supplied when a battle starts and handed back when it ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDto {
    pub species: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: u32,
    #[serde(default)]
    pub exp: Option<u32>,
    #[serde(default)]
    pub ivs: [u8; 6],
    #[serde(default)]
    pub evs: [u16; 6],
    #[serde(default = "default_nature")]
    pub nature: String,
    pub ability: String,
    #[serde(default)]
    pub held_item: Option<String>,
    pub moves: Vec<String>,
    /// Current PP per move; empty means full.
    #[serde(default)]
    pub move_pp: Vec<u8>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
    #[serde(default)]
    pub current_hp: Option<u32>,
}

fn default_nature() -> String {
    "HARDY".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstance {
    pub data: &'static MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: &'static MoveData) -> Self {
        MoveInstance {
            data,
            pp: data.max_pp,
        }
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

/// Level, experience and permanent stats of one Pokemon.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    level: u32,
    exp: u32,
    growth_rate: GrowthRate,
    base_stats: BaseStats,
    ivs: [u8; 6],
    evs: [u16; 6],
    nature: &'static Nature,
    stats: [u32; 6],
}

impl StatBlock {
    pub fn new(
        species: &SpeciesData,
        level: u32,
        ivs: [u8; 6],
        evs: [u16; 6],
        nature: &'static Nature,
    ) -> Self {
        let mut block = StatBlock {
            level,
            exp: species.growth_rate.exp_for_level(level),
            growth_rate: species.growth_rate,
            base_stats: species.base_stats,
            ivs: ivs.map(|iv| iv.min(MAX_IV)),
            evs,
            nature,
            stats: [0; 6],
        };
        block.recalculate_stats();
        block
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn nature(&self) -> &'static Nature {
        self.nature
    }

    pub fn ivs(&self) -> [u8; 6] {
        self.ivs
    }

    pub fn evs(&self) -> [u16; 6] {
        self.evs
    }

    pub fn stat(&self, kind: StatKind) -> u32 {
        self.stats[kind.index()]
    }

    pub fn max_hp(&self) -> u32 {
        self.stat(StatKind::Hp)
    }

    /// Sets the cumulative experience, never below what the current level requires.
    pub fn set_exp(&mut self, exp: u32) {
        self.exp = exp.max(self.growth_rate.exp_for_level(self.level));
    }

    /// Recompute every stat from base stats, IVs, EVs, level and nature.
    pub fn recalculate_stats(&mut self) {
        for kind in StatKind::all() {
            self.stats[kind.index()] = self.calculate_stat(kind);
        }
    }

    fn calculate_stat(&self, kind: StatKind) -> u32 {
        let i = kind.index();
        let base_calculation =
            2 * self.base_stats.get(kind) as u32 + self.ivs[i] as u32 + self.evs[i] as u32 / 4;
        let scaled = base_calculation * self.level / 100;
        match kind {
            StatKind::Hp => scaled + self.level + 10,
            _ => ((scaled + 5) as f64 * self.nature.multiplier(kind)).floor() as u32,
        }
    }

    /// Progress through the current level as a percentage. Zero at the level cap.
    pub fn exp_percent(&self, max_level: u32) -> f64 {
        if self.level >= max_level {
            return 0.0;
        }
        let current = self.growth_rate.exp_for_level(self.level);
        let next = self.growth_rate.exp_for_level(self.level + 1);
        if next <= current {
            return 0.0;
        }
        (self.exp.saturating_sub(current)) as f64 * 100.0 / (next - current) as f64
    }

    /// Add experience, levelling up as many times as the total allows.
    pub fn gain_exp(&mut self, amount: u32, max_level: u32) -> LevelUpStatChanges {
        let level_before = self.level;
        let stats_before = self.stats;
        let percent_before = self.exp_percent(max_level);

        let cap = self.growth_rate.exp_for_level(max_level);
        self.exp = self.exp.saturating_add(amount).min(cap.max(self.exp));

        while self.level < max_level && self.exp >= self.growth_rate.exp_for_level(self.level + 1)
        {
            self.level += 1;
        }
        if self.level != level_before {
            self.recalculate_stats();
        }

        let mut stats = [ValueChange::unchanged(0); StatKind::COUNT];
        for kind in StatKind::all() {
            let i = kind.index();
            stats[i] = ValueChange::new(stats_before[i], self.stats[i]);
        }

        LevelUpStatChanges {
            level: ValueChange::new(level_before, self.level),
            stats,
            exp_percent: ValueChange::new(percent_before, self.exp_percent(max_level)),
        }
    }

    /// Add effort values, respecting the per-stat and total caps.
    /// Returns true when any EV changed.
    pub fn gain_evs(&mut self, ev_yield: &EvYield, max_per_stat: u16, max_total: u16) -> bool {
        let mut changed = false;
        for kind in StatKind::all() {
            let i = kind.index();
            let total: u32 = self.evs.iter().map(|&ev| ev as u32).sum();
            let room = (max_total as u32)
                .saturating_sub(total)
                .min(max_per_stat.saturating_sub(self.evs[i]) as u32);
            let gained = (ev_yield.get(kind) as u32).min(room) as u16;
            if gained > 0 {
                self.evs[i] += gained;
                changed = true;
            }
        }
        changed
    }
}

/// Persistent Pokemon state: what exists before and after a battle.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonInst {
    pub nickname: String,
    pub species: &'static SpeciesData,
    pub stat_block: StatBlock,
    pub ability: String,
    pub held_item: Option<String>,
    pub moves: Vec<MoveInstance>,
    pub status: Option<StatusCondition>,
    pub current_hp: u32,
}

impl PokemonInst {
    /// Build a Pokemon from its serialized form, validating every id.
    pub fn from_dto(dto: &PokemonDto) -> BattleResult<Self> {
        let species = get_species_data(&dto.species)?;
        if !LEVEL_RANGE.contains(&dto.level) {
            return Err(SpeciesDataError::InvalidLevel(dto.level).into());
        }
        if dto.moves.len() > MAX_MOVES {
            return Err(MoveDataError::TooManyMoves(dto.moves.len()).into());
        }
        let nature = get_nature(&dto.nature)?;
        let ev_total: u32 = dto.evs.iter().map(|&ev| ev as u32).sum();
        if dto.evs.iter().any(|&ev| ev > MAX_EV_PER_STAT) || ev_total > MAX_EV_TOTAL {
            return Err(SpeciesDataError::InvalidEvs(dto.evs).into());
        }

        let mut stat_block = StatBlock::new(species, dto.level, dto.ivs, dto.evs, nature);
        if let Some(exp) = dto.exp {
            stat_block.set_exp(exp);
        }

        let mut moves = Vec::with_capacity(dto.moves.len());
        for (slot, move_id) in dto.moves.iter().enumerate() {
            let mut instance = MoveInstance::new(get_move_data(move_id)?);
            if let Some(&pp) = dto.move_pp.get(slot) {
                instance.pp = pp.min(instance.max_pp());
            }
            moves.push(instance);
        }

        let max_hp = stat_block.max_hp();
        Ok(PokemonInst {
            nickname: dto.nickname.clone().unwrap_or_else(|| species.name.to_string()),
            species,
            stat_block,
            ability: dto.ability.clone(),
            held_item: dto.held_item.clone(),
            moves,
            status: dto.status,
            current_hp: dto.current_hp.unwrap_or(max_hp).min(max_hp),
        })
    }

    pub fn to_dto(&self) -> PokemonDto {
        PokemonDto {
            species: self.species.id.to_string(),
            nickname: Some(self.nickname.clone()),
            level: self.stat_block.level(),
            exp: Some(self.stat_block.exp()),
            ivs: self.stat_block.ivs(),
            evs: self.stat_block.evs(),
            nature: self.stat_block.nature().id.to_string(),
            ability: self.ability.clone(),
            held_item: self.held_item.clone(),
            moves: self.moves.iter().map(|m| m.data.id.to_string()).collect(),
            move_pp: self.moves.iter().map(|m| m.pp).collect(),
            status: self.status,
            current_hp: Some(self.current_hp),
        }
    }

    pub fn level(&self) -> u32 {
        self.stat_block.level()
    }

    pub fn max_hp(&self) -> u32 {
        self.stat_block.max_hp()
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }
}
