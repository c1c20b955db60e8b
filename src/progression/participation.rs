use crate::battle::BattlerId;

/// Records which battlers have acted against the owner of the ledger this battle.
/// Entries keep first-credit order so distribution is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationLedger {
    credited: Vec<BattlerId>,
}

impl ParticipationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a battler. Crediting twice is a no-op.
    pub fn record(&mut self, battler: BattlerId) {
        if !self.credited.contains(&battler) {
            self.credited.push(battler);
        }
    }

    pub fn contains(&self, battler: BattlerId) -> bool {
        self.credited.contains(&battler)
    }

    pub fn participants(&self) -> &[BattlerId] {
        &self.credited
    }

    pub fn is_empty(&self) -> bool {
        self.credited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_tracking() {
        let mut ledger = ParticipationLedger::new();

        ledger.record(BattlerId(2));
        ledger.record(BattlerId(0));
        ledger.record(BattlerId(2));

        assert_eq!(ledger.participants(), &[BattlerId(2), BattlerId(0)]);
        assert!(ledger.contains(BattlerId(0)));
        assert!(!ledger.contains(BattlerId(1)));
    }
}
