pub mod level_up;
pub mod participation;
pub mod rewards;

pub use level_up::{LevelUpStatChanges, ValueChange};
pub use participation::ParticipationLedger;
pub use rewards::{EvYield, ExpYieldFormula, ExpYieldInput, RewardCalculator};
