use crate::errors::{MoveDataError, MoveDataResult};
use schema::{
    AdditionalEffect, BattleStat, CriticalOverride, EffectRecipient, MoveCategory, MoveData,
    MoveEffect, PokemonType, StatusKind, TargetKind,
};

use MoveCategory::*;
use PokemonType::*;

/// Builder used by the static table. Optional parts are filled in with the `with_*` methods.
const fn base_move(
    id: &'static str,
    name: &'static str,
    move_type: PokemonType,
    category: MoveCategory,
    power: Option<u16>,
    accuracy: Option<u16>,
    max_pp: u8,
) -> MoveData {
    MoveData {
        id,
        name,
        move_type,
        category,
        power,
        accuracy,
        max_pp,
        priority: 0,
        target: TargetKind::SingleOther,
        critical_stages: 0,
        critical_override: CriticalOverride::Normal,
        effect: MoveEffect::None,
        additional_effect: None,
    }
}

const fn with_priority(mut data: MoveData, priority: i8) -> MoveData {
    data.priority = priority;
    data
}

const fn with_target(mut data: MoveData, target: TargetKind) -> MoveData {
    data.target = target;
    data
}

const fn with_effect(mut data: MoveData, effect: MoveEffect) -> MoveData {
    data.effect = effect;
    data
}

const fn with_chance(mut data: MoveData, chance: u8, effect: MoveEffect) -> MoveData {
    data.additional_effect = Some(AdditionalEffect { chance, effect });
    data
}

const fn with_critical(mut data: MoveData, stages: u8, critical_override: CriticalOverride) -> MoveData {
    data.critical_stages = stages;
    data.critical_override = critical_override;
    data
}

const fn user_stats(changes: &'static [(BattleStat, i8)]) -> MoveEffect {
    MoveEffect::ChangeStats {
        recipient: EffectRecipient::User,
        changes,
    }
}

const fn target_stats(changes: &'static [(BattleStat, i8)]) -> MoveEffect {
    MoveEffect::ChangeStats {
        recipient: EffectRecipient::Target,
        changes,
    }
}

static MOVES: phf::Map<&'static str, MoveData> = phf::phf_map! {
    "AURASPHERE" => base_move("AURASPHERE", "Aura Sphere", Fighting, Special, Some(80), None, 20),
    "CLOSECOMBAT" => with_effect(
        base_move("CLOSECOMBAT", "Close Combat", Fighting, Physical, Some(120), Some(100), 5),
        user_stats(&[(BattleStat::Defense, -1), (BattleStat::SpecialDefense, -1)]),
    ),
    "DAZZLINGGLEAM" => with_target(
        base_move("DAZZLINGGLEAM", "Dazzling Gleam", Fairy, Special, Some(80), Some(100), 10),
        TargetKind::AllOpponents,
    ),
    "DRACOMETEOR" => with_effect(
        base_move("DRACOMETEOR", "Draco Meteor", Dragon, Special, Some(130), Some(90), 5),
        user_stats(&[(BattleStat::SpecialAttack, -2)]),
    ),
    "EARTHQUAKE" => with_target(
        base_move("EARTHQUAKE", "Earthquake", Ground, Physical, Some(100), Some(100), 10),
        TargetKind::AllOthers,
    ),
    "FIREBLAST" => with_chance(
        base_move("FIREBLAST", "Fire Blast", Fire, Special, Some(110), Some(85), 5),
        10,
        MoveEffect::InflictStatus(StatusKind::Burn),
    ),
    "FLAMETHROWER" => with_chance(
        base_move("FLAMETHROWER", "Flamethrower", Fire, Special, Some(90), Some(100), 15),
        10,
        MoveEffect::InflictStatus(StatusKind::Burn),
    ),
    "FROSTBREATH" => with_critical(
        base_move("FROSTBREATH", "Frost Breath", Ice, Special, Some(60), Some(90), 10),
        0,
        CriticalOverride::Always,
    ),
    "GROWL" => with_effect(
        with_target(
            base_move("GROWL", "Growl", Normal, Status, None, Some(100), 40),
            TargetKind::AllOpponents,
        ),
        target_stats(&[(BattleStat::Attack, -1)]),
    ),
    "HYDROPUMP" => base_move("HYDROPUMP", "Hydro Pump", Water, Special, Some(110), Some(80), 5),
    "HYPNOSIS" => with_effect(
        base_move("HYPNOSIS", "Hypnosis", Psychic, Status, None, Some(60), 20),
        MoveEffect::InflictStatus(StatusKind::Sleep),
    ),
    "ICEFANG" => with_chance(
        base_move("ICEFANG", "Ice Fang", Ice, Physical, Some(65), Some(95), 15),
        10,
        MoveEffect::InflictStatus(StatusKind::Freeze),
    ),
    "METALSOUND" => with_effect(
        base_move("METALSOUND", "Metal Sound", Steel, Status, None, Some(85), 40),
        target_stats(&[(BattleStat::SpecialDefense, -2)]),
    ),
    "NASTYPLOT" => with_effect(
        with_target(
            base_move("NASTYPLOT", "Nasty Plot", Dark, Status, None, None, 20),
            TargetKind::User,
        ),
        user_stats(&[(BattleStat::SpecialAttack, 2)]),
    ),
    "NIGHTSLASH" => with_critical(
        base_move("NIGHTSLASH", "Night Slash", Dark, Physical, Some(70), Some(100), 15),
        1,
        CriticalOverride::Normal,
    ),
    "QUICKATTACK" => with_priority(
        base_move("QUICKATTACK", "Quick Attack", Normal, Physical, Some(40), Some(100), 30),
        1,
    ),
    "ROCKSLIDE" => with_chance(
        with_target(
            base_move("ROCKSLIDE", "Rock Slide", Rock, Physical, Some(75), Some(90), 10),
            TargetKind::AllOpponents,
        ),
        30,
        MoveEffect::Flinch,
    ),
    "SCALD" => with_chance(
        base_move("SCALD", "Scald", Water, Special, Some(80), Some(100), 15),
        30,
        MoveEffect::InflictStatus(StatusKind::Burn),
    ),
    "SHADOWBALL" => with_chance(
        base_move("SHADOWBALL", "Shadow Ball", Ghost, Special, Some(80), Some(100), 15),
        20,
        target_stats(&[(BattleStat::SpecialDefense, -1)]),
    ),
    "SWORDSDANCE" => with_effect(
        with_target(
            base_move("SWORDSDANCE", "Swords Dance", Normal, Status, None, None, 20),
            TargetKind::User,
        ),
        user_stats(&[(BattleStat::Attack, 2)]),
    ),
    "TACKLE" => base_move("TACKLE", "Tackle", Normal, Physical, Some(40), Some(100), 35),
    "THUNDERBOLT" => with_chance(
        base_move("THUNDERBOLT", "Thunderbolt", Electric, Special, Some(90), Some(100), 15),
        10,
        MoveEffect::InflictStatus(StatusKind::Paralysis),
    ),
    "THUNDERWAVE" => with_effect(
        base_move("THUNDERWAVE", "Thunder Wave", Electric, Status, None, Some(90), 20),
        MoveEffect::InflictStatus(StatusKind::Paralysis),
    ),
    "TOXIC" => with_effect(
        base_move("TOXIC", "Toxic", Poison, Status, None, Some(90), 10),
        MoveEffect::InflictStatus(StatusKind::BadPoison),
    ),
    "WILLOWISP" => with_effect(
        base_move("WILLOWISP", "Will-O-Wisp", Fire, Status, None, Some(85), 15),
        MoveEffect::InflictStatus(StatusKind::Burn),
    ),
};

/// Get move data for an upper-case move id, e.g. `"ICEFANG"`.
pub fn get_move_data(id: &str) -> MoveDataResult<&'static MoveData> {
    MOVES
        .get(id)
        .ok_or_else(|| MoveDataError::MoveNotFound(id.to_string()))
}
