use crate::errors::{NatureDataError, SpeciesDataError, SpeciesDataResult};
use schema::{BaseStats, GrowthRate, Nature, PokemonType, SpeciesData, StatKind};

use GrowthRate::*;
use PokemonType::*;
use StatKind::*;

const fn species(
    id: &'static str,
    name: &'static str,
    types: &'static [PokemonType],
    stats: [u8; 6],
    base_exp: u16,
    growth_rate: GrowthRate,
    ev_yield: &'static [(StatKind, u8)],
) -> SpeciesData {
    SpeciesData {
        id,
        name,
        types,
        base_stats: BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            sp_attack: stats[3],
            sp_defense: stats[4],
            speed: stats[5],
        },
        base_exp,
        growth_rate,
        ev_yield,
    }
}

const fn nature(
    id: &'static str,
    name: &'static str,
    increased: Option<StatKind>,
    decreased: Option<StatKind>,
) -> Nature {
    Nature {
        id,
        name,
        increased,
        decreased,
    }
}

static SPECIES: phf::Map<&'static str, SpeciesData> = phf::phf_map! {
    "ALAKAZAM" => species("ALAKAZAM", "Alakazam", &[Psychic], [55, 50, 45, 135, 95, 120], 225, MediumSlow, &[(SpecialAttack, 3)]),
    "CHANDELURE" => species("CHANDELURE", "Chandelure", &[Ghost, Fire], [60, 55, 90, 145, 90, 80], 260, MediumSlow, &[(SpecialAttack, 3)]),
    "DRAPION" => species("DRAPION", "Drapion", &[Poison, Dark], [70, 90, 110, 60, 75, 95], 175, Slow, &[(Defense, 2)]),
    "GARCHOMP" => species("GARCHOMP", "Garchomp", &[Dragon, Ground], [108, 130, 95, 80, 85, 102], 270, Slow, &[(Attack, 3)]),
    "GLACEON" => species("GLACEON", "Glaceon", &[Ice], [65, 60, 110, 130, 95, 65], 184, MediumFast, &[(SpecialAttack, 2)]),
    "HONCHKROW" => species("HONCHKROW", "Honchkrow", &[Dark, Flying], [100, 125, 52, 105, 52, 71], 177, MediumSlow, &[(Attack, 2)]),
    "LATIOS" => species("LATIOS", "Latios", &[Dragon, Psychic], [80, 90, 80, 130, 110, 110], 270, Slow, &[(SpecialAttack, 3)]),
    "LUCARIO" => species("LUCARIO", "Lucario", &[Fighting, Steel], [70, 110, 70, 115, 70, 90], 184, MediumSlow, &[(Attack, 1), (SpecialAttack, 1)]),
    "LUGIA" => species("LUGIA", "Lugia", &[Psychic, Flying], [106, 90, 130, 90, 154, 110], 306, Slow, &[(SpecialDefense, 3)]),
    "MEW" => species("MEW", "Mew", &[Psychic], [100, 100, 100, 100, 100, 100], 270, MediumSlow, &[(Hp, 3)]),
    "MILOTIC" => species("MILOTIC", "Milotic", &[Water], [95, 60, 79, 100, 125, 81], 189, Erratic, &[(SpecialDefense, 2)]),
    "PIKACHU" => species("PIKACHU", "Pikachu", &[Electric], [35, 55, 40, 50, 50, 90], 112, MediumFast, &[(Speed, 2)]),
    "RATTATA" => species("RATTATA", "Rattata", &[Normal], [30, 56, 35, 25, 35, 72], 51, MediumFast, &[(Speed, 1)]),
    "RIBOMBEE" => species("RIBOMBEE", "Ribombee", &[Bug, Fairy], [60, 55, 60, 95, 70, 124], 162, MediumFast, &[(Speed, 2)]),
    "SNORLAX" => species("SNORLAX", "Snorlax", &[Normal], [160, 110, 65, 65, 110, 30], 189, Slow, &[(Hp, 2)]),
    "SYLVEON" => species("SYLVEON", "Sylveon", &[Fairy], [95, 65, 65, 110, 130, 60], 184, MediumFast, &[(SpecialDefense, 2)]),
    "TOGEKISS" => species("TOGEKISS", "Togekiss", &[Fairy, Flying], [85, 50, 95, 120, 115, 80], 245, Fast, &[(SpecialAttack, 2), (SpecialDefense, 1)]),
};

static NATURES: phf::Map<&'static str, Nature> = phf::phf_map! {
    "HARDY" => nature("HARDY", "Hardy", None, None),
    "LONELY" => nature("LONELY", "Lonely", Some(Attack), Some(Defense)),
    "BRAVE" => nature("BRAVE", "Brave", Some(Attack), Some(Speed)),
    "ADAMANT" => nature("ADAMANT", "Adamant", Some(Attack), Some(SpecialAttack)),
    "NAUGHTY" => nature("NAUGHTY", "Naughty", Some(Attack), Some(SpecialDefense)),
    "BOLD" => nature("BOLD", "Bold", Some(Defense), Some(Attack)),
    "DOCILE" => nature("DOCILE", "Docile", None, None),
    "RELAXED" => nature("RELAXED", "Relaxed", Some(Defense), Some(Speed)),
    "IMPISH" => nature("IMPISH", "Impish", Some(Defense), Some(SpecialAttack)),
    "LAX" => nature("LAX", "Lax", Some(Defense), Some(SpecialDefense)),
    "TIMID" => nature("TIMID", "Timid", Some(Speed), Some(Attack)),
    "HASTY" => nature("HASTY", "Hasty", Some(Speed), Some(Defense)),
    "SERIOUS" => nature("SERIOUS", "Serious", None, None),
    "JOLLY" => nature("JOLLY", "Jolly", Some(Speed), Some(SpecialAttack)),
    "NAIVE" => nature("NAIVE", "Naive", Some(Speed), Some(SpecialDefense)),
    "MODEST" => nature("MODEST", "Modest", Some(SpecialAttack), Some(Attack)),
    "MILD" => nature("MILD", "Mild", Some(SpecialAttack), Some(Defense)),
    "QUIET" => nature("QUIET", "Quiet", Some(SpecialAttack), Some(Speed)),
    "BASHFUL" => nature("BASHFUL", "Bashful", None, None),
    "RASH" => nature("RASH", "Rash", Some(SpecialAttack), Some(SpecialDefense)),
    "CALM" => nature("CALM", "Calm", Some(SpecialDefense), Some(Attack)),
    "GENTLE" => nature("GENTLE", "Gentle", Some(SpecialDefense), Some(Defense)),
    "SASSY" => nature("SASSY", "Sassy", Some(SpecialDefense), Some(Speed)),
    "CAREFUL" => nature("CAREFUL", "Careful", Some(SpecialDefense), Some(SpecialAttack)),
    "QUIRKY" => nature("QUIRKY", "Quirky", None, None),
};

/// Look up a species by its upper-case id, e.g. `"GLACEON"`.
pub fn get_species_data(id: &str) -> SpeciesDataResult<&'static SpeciesData> {
    SPECIES
        .get(id)
        .ok_or_else(|| SpeciesDataError::SpeciesNotFound(id.to_string()))
}

pub fn get_nature(id: &str) -> Result<&'static Nature, NatureDataError> {
    NATURES
        .get(id)
        .ok_or_else(|| NatureDataError::NatureNotFound(id.to_string()))
}

pub fn all_species() -> impl Iterator<Item = &'static SpeciesData> {
    SPECIES.values()
}
