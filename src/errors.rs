use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to nature lookup
    #[error("Nature data error: {0}")]
    NatureData(#[from] NatureDataError),
    /// Error while loading battle settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to invalid battle actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    #[error("A Pokemon can know at most 4 moves, got {0}")]
    TooManyMoves(usize),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Invalid level {0}")]
    InvalidLevel(u32),
    #[error("Invalid effort values {0:?}")]
    InvalidEvs([u16; 6]),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NatureDataError {
    #[error("Nature not found: {0}")]
    NatureNotFound(String),
}

/// Errors raised while reading `BattleSettings`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors related to submitted battle actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Move slot {0} is out of bounds")]
    InvalidMoveIndex(usize),
    #[error("Battler {0} does not exist")]
    UnknownBattler(usize),
    #[error("Battler {0} is not on the field")]
    BattlerNotActive(usize),
    #[error("Battler {0} cannot be switched in")]
    InvalidSwitchTarget(usize),
    #[error("Battler {0} cannot receive that item")]
    InvalidItemTarget(usize),
    #[error("An action for battler {0} was already submitted this turn")]
    DuplicateAction(usize),
}

/// Errors raised while handing reports to a presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("the presentation side closed the report channel")]
    ReportChannelClosed,
    #[error("the presentation side stopped sending proceed signals")]
    ProceedChannelClosed,
}

/// Convenience type alias for Results in the battle engine
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Convenience type alias for species data results
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

/// Convenience type alias for move data results
pub type MoveDataResult<T> = Result<T, MoveDataError>;
