use schema::StatKind;
use serde::Serialize;

/// A before/after pair for a value that changed during progression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueChange<T> {
    pub before: T,
    pub after: T,
}

impl<T: Copy + PartialOrd> ValueChange<T> {
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }

    pub fn unchanged(value: T) -> Self {
        Self::new(value, value)
    }

    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Widen to cover both ranges: lowest `before`, highest `after`.
    pub fn widen(&mut self, other: &ValueChange<T>) {
        if other.before < self.before {
            self.before = other.before;
        }
        if other.after > self.after {
            self.after = other.after;
        }
    }
}

/// What a single experience gain did to a StatBlock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelUpStatChanges {
    pub level: ValueChange<u32>,
    pub stats: [ValueChange<u32>; StatKind::COUNT],
    /// Progress through the current level, 0..=100.
    pub exp_percent: ValueChange<f64>,
}

impl LevelUpStatChanges {
    pub fn stat(&self, kind: StatKind) -> ValueChange<u32> {
        self.stats[kind.index()]
    }

    pub fn leveled_up(&self) -> bool {
        self.level.after > self.level.before
    }

    /// Fold a later gain for the same recipient into this one.
    ///
    /// Level and stat ranges widen. The exp bar is chronological: it starts where
    /// this record started and ends where `later` ended.
    pub fn merge(&mut self, later: &LevelUpStatChanges) {
        self.level.widen(&later.level);
        for (mine, theirs) in self.stats.iter_mut().zip(later.stats.iter()) {
            mine.widen(theirs);
        }
        self.exp_percent.after = later.exp_percent.after;
    }
}
