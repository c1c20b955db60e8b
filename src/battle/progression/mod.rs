mod calculation;
mod commands;
mod validation;

pub use calculation::{calculate_exp_awards, ExpAward};
pub use commands::{ExpGainRecord, ExperienceDistributor};
pub use validation::{can_award_experience_in_battle, ProgressionError};
