//! Boundary to the numeric attribute system that hosts live stat values.
//!
//! The engine never owns these numbers directly. It reads and writes them through
//! [`AttributeStore`] and mirrors HP back onto the battler via `stats::sync_hp`.

use crate::battle::battler::BattlerId;
use schema::{BattleStat, StatKind};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    CurrentHp,
    MaxHp,
    /// Unmodified permanent stat.
    Stat(StatKind),
    /// Product of externally applied modifiers on a stat; 1.0 when none.
    StatMultiplier(StatKind),
    Stage(BattleStat),
}

impl Attribute {
    fn default_value(self) -> f64 {
        match self {
            Attribute::StatMultiplier(_) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeChange {
    pub battler: BattlerId,
    pub attribute: Attribute,
    pub old_value: f64,
    pub new_value: f64,
}

pub trait AttributeStore: Send {
    fn get(&self, battler: BattlerId, attribute: Attribute) -> f64;

    fn set(&mut self, battler: BattlerId, attribute: Attribute, value: f64);

    /// Changes recorded since the last call, oldest first.
    fn drain_changes(&mut self) -> Vec<AttributeChange>;
}

/// Map-backed store. Current HP is clamped into `[0, MaxHp]` on write.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAttributeStore {
    values: HashMap<(BattlerId, Attribute), f64>,
    changes: Vec<AttributeChange>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for InMemoryAttributeStore {
    fn get(&self, battler: BattlerId, attribute: Attribute) -> f64 {
        self.values
            .get(&(battler, attribute))
            .copied()
            .unwrap_or_else(|| attribute.default_value())
    }

    fn set(&mut self, battler: BattlerId, attribute: Attribute, value: f64) {
        let value = match attribute {
            Attribute::CurrentHp => value.clamp(0.0, self.get(battler, Attribute::MaxHp)),
            _ => value,
        };
        let old_value = self.get(battler, attribute);
        if old_value == value {
            return;
        }
        self.values.insert((battler, attribute), value);
        self.changes.push(AttributeChange {
            battler,
            attribute,
            old_value,
            new_value: value,
        });
    }

    fn drain_changes(&mut self) -> Vec<AttributeChange> {
        std::mem::take(&mut self.changes)
    }
}
