pub mod types;
pub mod engine;
pub mod adjust;
pub mod validation;

pub use types::{
    AppearanceBounds, Appearances, Adjustment, Assignment, ConstraintErrors, DisabledByRound, ErrorKey,
    RandomizationParams, Teams,
};
pub use engine::randomize_teams;
pub use adjust::{find_replacement, regenerate_teams_with_disabled};
