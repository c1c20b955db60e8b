use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// The six permanent stats of a Pokemon.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = StatKind> {
        StatKind::iter()
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Sp. Atk",
            StatKind::SpecialDefense => "Sp. Def",
            StatKind::Speed => "Speed",
        };
        write!(f, "{}", display_name)
    }
}

/// Stats that carry an in-battle stage in [-6, 6].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum BattleStat {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl BattleStat {
    pub const COUNT: usize = 7;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = BattleStat> {
        BattleStat::iter()
    }

    /// The permanent stat this stage scales, if any. Accuracy and evasion have none.
    pub fn stat_kind(self) -> Option<StatKind> {
        match self {
            BattleStat::Attack => Some(StatKind::Attack),
            BattleStat::Defense => Some(StatKind::Defense),
            BattleStat::SpecialAttack => Some(StatKind::SpecialAttack),
            BattleStat::SpecialDefense => Some(StatKind::SpecialDefense),
            BattleStat::Speed => Some(StatKind::Speed),
            BattleStat::Accuracy | BattleStat::Evasion => None,
        }
    }

    pub fn from_stat_kind(kind: StatKind) -> Option<BattleStat> {
        match kind {
            StatKind::Hp => None,
            StatKind::Attack => Some(BattleStat::Attack),
            StatKind::Defense => Some(BattleStat::Defense),
            StatKind::SpecialAttack => Some(BattleStat::SpecialAttack),
            StatKind::SpecialDefense => Some(BattleStat::SpecialDefense),
            StatKind::Speed => Some(BattleStat::Speed),
        }
    }
}

impl fmt::Display for BattleStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStat::Accuracy => write!(f, "accuracy"),
            BattleStat::Evasion => write!(f, "evasiveness"),
            other => match other.stat_kind() {
                Some(kind) => write!(f, "{}", kind),
                None => Ok(()),
            },
        }
    }
}

/// Major status conditions. A battler holds at most one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadPoison,
    Sleep,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusKind::Burn => "burned",
            StatusKind::Freeze => "frozen",
            StatusKind::Paralysis => "paralyzed",
            StatusKind::Poison => "poisoned",
            StatusKind::BadPoison => "badly poisoned",
            StatusKind::Sleep => "asleep",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sun,
    Rain,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Sun => write!(f, "harsh sunlight"),
            Weather::Rain => write!(f, "rain"),
        }
    }
}
