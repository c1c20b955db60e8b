use crate::pokemon::{MoveInstance, PokemonInst, StatusCondition};
use crate::progression::ParticipationLedger;
use schema::{BattleStat, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a battler in the battle's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattlerId(pub usize);

impl fmt::Display for BattlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    Player,
    Opponent,
}

impl SideId {
    pub fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Opponent => 1,
        }
    }

    pub fn opposing(self) -> SideId {
        match self {
            SideId::Player => SideId::Opponent,
            SideId::Opponent => SideId::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages([i8; BattleStat::COUNT]);

impl StatStages {
    pub fn get(&self, stat: BattleStat) -> i8 {
        self.0[stat.index()]
    }

    pub fn set(&mut self, stat: BattleStat, value: i8) {
        self.0[stat.index()] = value;
    }

    pub fn reset(&mut self) {
        self.0 = [0; BattleStat::COUNT];
    }
}

/// Where a status condition came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatusSource {
    /// Already present on the Pokemon when the battle started.
    Carried,
    Move {
        move_id: &'static str,
        user: BattlerId,
    },
    Ability(String),
    Item(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEffectInfo {
    pub condition: StatusCondition,
    pub source: StatusSource,
}

/// Live battle state wrapped around a persistent Pokemon.
#[derive(Debug, Clone)]
pub struct Battler {
    pub id: BattlerId,
    pub side: SideId,
    pub pokemon: PokemonInst,
    /// Mirrors the attribute store; only the stat bridge writes it.
    pub current_hp: u32,
    pub stat_stages: StatStages,
    pub status: Option<StatusEffectInfo>,
    pub participation: ParticipationLedger,
    pub fainted: bool,
    pub flinched: bool,
}

impl Battler {
    pub fn new(id: BattlerId, side: SideId, pokemon: PokemonInst) -> Self {
        let status = pokemon.status.map(|condition| StatusEffectInfo {
            condition,
            source: StatusSource::Carried,
        });
        let current_hp = pokemon.current_hp.min(pokemon.max_hp());
        Battler {
            id,
            side,
            fainted: current_hp == 0,
            current_hp,
            stat_stages: StatStages::default(),
            status,
            participation: ParticipationLedger::new(),
            flinched: false,
            pokemon,
        }
    }

    pub fn nickname(&self) -> &str {
        &self.pokemon.nickname
    }

    pub fn level(&self) -> u32 {
        self.pokemon.level()
    }

    pub fn max_hp(&self) -> u32 {
        self.pokemon.max_hp()
    }

    pub fn types(&self) -> &'static [PokemonType] {
        self.pokemon.species.types
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types().contains(&pokemon_type)
    }

    pub fn ability(&self) -> &str {
        &self.pokemon.ability
    }

    pub fn held_item(&self) -> Option<&str> {
        self.pokemon.held_item.as_deref()
    }

    pub fn move_slot(&self, slot: usize) -> Option<&MoveInstance> {
        self.pokemon.moves.get(slot)
    }

    pub fn status_condition(&self) -> Option<StatusCondition> {
        self.status.as_ref().map(|info| info.condition)
    }

    /// A battler at 0 HP counts as fainted before the sweep marks it.
    pub fn is_fainted(&self) -> bool {
        self.fainted || self.current_hp == 0
    }

    /// Clear state that does not survive leaving the field.
    pub fn clear_volatile_state(&mut self) {
        self.stat_stages.reset();
        self.flinched = false;
    }

    /// Write battle results back into the persistent Pokemon.
    pub fn into_pokemon(self) -> PokemonInst {
        let mut pokemon = self.pokemon;
        pokemon.current_hp = self.current_hp;
        pokemon.status = self.status.map(|info| info.condition);
        pokemon
    }
}
