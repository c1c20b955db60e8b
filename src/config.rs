//! Tunable constants of the battle rules, loadable from RON.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Stage multiplier tables only cover `-6..=6`.
const MAX_STAT_STAGE: i8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleSettings {
    /// Stat stages are clamped into `[-stat_stage_limit, stat_stage_limit]`.
    pub stat_stage_limit: i8,
    /// Critical hit ratio (1 in N) indexed by critical stage.
    pub critical_hit_ratios: Vec<u32>,
    pub critical_hit_multiplier: f64,
    pub stab_multiplier: f64,
    /// Lowest percentage the damage roll can produce; the highest is always 100.
    pub damage_roll_floor: u32,
    pub spread_move_multiplier: f64,
    pub max_level: u32,
    pub max_ev_per_stat: u16,
    pub max_ev_total: u16,
}

impl Default for BattleSettings {
    fn default() -> Self {
        Self {
            stat_stage_limit: 6,
            critical_hit_ratios: vec![24, 8, 2, 1],
            critical_hit_multiplier: 1.5,
            stab_multiplier: 1.5,
            damage_roll_floor: 85,
            spread_move_multiplier: 0.75,
            max_level: 100,
            max_ev_per_stat: 252,
            max_ev_total: 510,
        }
    }
}

impl BattleSettings {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let settings: BattleSettings = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let settings = Self::from_ron_str(&content)?;
        tracing::info!(path = %path.display(), "loaded battle settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.critical_hit_ratios.is_empty() || self.critical_hit_ratios.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "critical_hit_ratios",
                reason: "must be non-empty and contain no zero ratio".to_string(),
            });
        }
        if self.damage_roll_floor == 0 || self.damage_roll_floor > 100 {
            return Err(ConfigError::Invalid {
                field: "damage_roll_floor",
                reason: format!("{} is outside 1..=100", self.damage_roll_floor),
            });
        }
        if !(1..=MAX_STAT_STAGE).contains(&self.stat_stage_limit) {
            return Err(ConfigError::Invalid {
                field: "stat_stage_limit",
                reason: format!("{} is outside 1..={}", self.stat_stage_limit, MAX_STAT_STAGE),
            });
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid {
                field: "max_level",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Ratio for a critical stage, clamped to the last entry of the table.
    pub fn critical_ratio(&self, stage: u32) -> u32 {
        let index = (stage as usize).min(self.critical_hit_ratios.len().saturating_sub(1));
        self.critical_hit_ratios.get(index).copied().unwrap_or(1)
    }

    /// Number of distinct damage roll outcomes (16 for the standard 85..=100 range).
    pub fn damage_roll_span(&self) -> u32 {
        101 - self.damage_roll_floor
    }
}
