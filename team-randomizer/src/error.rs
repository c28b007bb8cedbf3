use thiserror::Error;

/// Failures that abort team generation entirely
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomizeError {
    #[error("At least 2 people are needed to make teams (got {pool_size})")]
    PoolTooSmall { pool_size: usize },

    #[error("Team size {team_size} must be smaller than the number of people ({pool_size})")]
    TeamTooLarge { team_size: usize, pool_size: usize },

    #[error("Minimum appearances too high: {min} for each of {pool_size} people needs more than the {slots} available places")]
    MinTooHigh { min: usize, pool_size: usize, slots: usize },

    #[error("Maximum appearances too low: {max} for each of {pool_size} people cannot fill {slots} places")]
    MaxTooLow { max: usize, pool_size: usize, slots: usize },

    #[error("Cannot satisfy constraints in round {}: {eligible} eligible for {needed} open places", .round + 1)]
    Starved { round: usize, eligible: usize, needed: usize },

    #[error("Round {} has {actual} members, expected {expected}", .round + 1)]
    RoundSizeMismatch { round: usize, actual: usize, expected: usize },

    #[error("Minimum appearances not satisfiable: {person} appears {count} times, minimum is {min}")]
    MinimumUnsatisfied { person: String, count: usize, min: usize },
}

/// Broad classes of generation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InputInvalid,
    StaticInfeasible,
    DynamicInfeasible,
    PostCheck,
    Internal,
}

impl RandomizeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RandomizeError::PoolTooSmall { .. } | RandomizeError::TeamTooLarge { .. } => {
                FailureKind::InputInvalid
            }
            RandomizeError::MinTooHigh { .. } | RandomizeError::MaxTooLow { .. } => {
                FailureKind::StaticInfeasible
            }
            RandomizeError::Starved { .. } => FailureKind::DynamicInfeasible,
            RandomizeError::MinimumUnsatisfied { .. } => FailureKind::PostCheck,
            RandomizeError::RoundSizeMismatch { .. } => FailureKind::Internal,
        }
    }
}

/// Failures turning raw caller input into a runnable request
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid seed: {0:?}")]
    InvalidSeed(String),

    #[error("Invalid disabled list: {0}")]
    InvalidDisabled(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Randomize(#[from] RandomizeError),
}
