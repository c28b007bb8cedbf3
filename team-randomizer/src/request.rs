use chrono::{Datelike, NaiveDate, Utc, Weekday};
use serde::Serialize;
use tracing::info;

use crate::display::round_labels;
use crate::error::{RandomizeError, RequestError};
use crate::teams::{
    randomize_teams, regenerate_teams_with_disabled, Appearances, ConstraintErrors, DisabledByRound,
    RandomizationParams, Teams,
};

pub const DEFAULT_TEAM_SIZE: usize = 2;
pub const DEFAULT_ROUNDS: usize = 3;
/// Upper bound on rounds per request; generation work grows linearly with it
pub const MAX_ROUNDS: usize = 1_000;

/// Where a request's seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSpec {
    /// `YYYYMMDD`; the digits double as the numeric seed
    Date(NaiveDate),
    Plain(i64),
    /// No seed given: current time in milliseconds, not reproducible
    Timestamp(i64),
}

impl SeedSpec {
    pub fn value(&self) -> i64 {
        match self {
            SeedSpec::Date(date) => date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64,
            SeedSpec::Plain(value) | SeedSpec::Timestamp(value) => *value,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            SeedSpec::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Round count implied by the seed, if any
    pub fn default_rounds(&self) -> Option<usize> {
        self.date().map(rounds_for_date)
    }
}

/// Weekends get brunch and dinner, weekdays get three meals
pub fn rounds_for_date(date: NaiveDate) -> usize {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => 2,
        _ => 3,
    }
}

fn parse_date_seed(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[4..6].parse().ok()?;
    let day: u32 = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses the caller's seed string.
///
/// Eight digits forming a real calendar date become a date seed; any other
/// integer is used as is. A missing or blank seed falls back to the clock.
pub fn parse_seed(raw: Option<&str>) -> Result<SeedSpec, RequestError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(SeedSpec::Timestamp(Utc::now().timestamp_millis()));
    };

    if let Some(date) = parse_date_seed(raw) {
        return Ok(SeedSpec::Date(date));
    }

    raw.parse::<i64>()
        .map(SeedSpec::Plain)
        .map_err(|_| RequestError::InvalidSeed(raw.to_string()))
}

/// Caller input after names and disabled lists have been split, before defaults
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub pool: Vec<String>,
    pub team_size: Option<usize>,
    pub rounds: Option<usize>,
    pub min_appearances: Option<usize>,
    pub max_appearances: Option<usize>,
    pub seed: Option<String>,
    pub disabled: DisabledByRound,
}

/// A validated request ready to run
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub params: RandomizationParams,
    pub seed: SeedSpec,
    pub disabled: DisabledByRound,
}

/// Resolves defaults and checks the parameter invariants the engine assumes
pub fn prepare(raw: RawRequest) -> Result<PreparedRequest, RequestError> {
    let seed = parse_seed(raw.seed.as_deref())?;
    let rounds = raw.rounds.or_else(|| seed.default_rounds()).unwrap_or(DEFAULT_ROUNDS);
    let team_size = raw.team_size.unwrap_or(DEFAULT_TEAM_SIZE);
    let min_appearances = raw.min_appearances.unwrap_or(0);
    let max_appearances = raw.max_appearances.unwrap_or(rounds);

    if rounds == 0 {
        return Err(RequestError::InvalidParameter("rounds must be at least 1".to_string()));
    }
    if rounds > MAX_ROUNDS {
        return Err(RequestError::InvalidParameter(format!(
            "rounds must be at most {} (got {})",
            MAX_ROUNDS, rounds
        )));
    }
    if team_size == 0 {
        return Err(RequestError::InvalidParameter("team size must be at least 1".to_string()));
    }
    if max_appearances == 0 {
        return Err(RequestError::InvalidParameter("maximum appearances must be at least 1".to_string()));
    }
    if max_appearances < min_appearances {
        return Err(RequestError::InvalidParameter(format!(
            "maximum appearances ({}) is below minimum appearances ({})",
            max_appearances, min_appearances
        )));
    }

    Ok(PreparedRequest {
        params: RandomizationParams {
            pool: raw.pool,
            team_size,
            rounds,
            min_appearances,
            max_appearances,
            seed: seed.value(),
        },
        seed,
        disabled: raw.disabled,
    })
}

/// Result handed back to the CLI and the web API
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub seed: i64,
    pub seed_date: Option<String>,
    pub reproducible: bool,
    pub rounds: usize,
    pub labels: Vec<String>,
    pub teams: Teams,
    pub appearances: Appearances,
    pub errors: ConstraintErrors,
}

/// Generates teams, then repairs them if any round has disabled people
pub fn run(request: &PreparedRequest) -> Result<Outcome, RandomizeError> {
    let params = &request.params;
    let assignment = randomize_teams(params)?;

    let has_disabled = request.disabled.values().any(|people| !people.is_empty());
    let (teams, appearances, errors) = if has_disabled {
        let adjusted = regenerate_teams_with_disabled(
            &assignment.teams,
            &params.pool,
            &request.disabled,
            params.seed,
            params.bounds(),
        );
        (adjusted.teams, adjusted.appearances, adjusted.errors)
    } else {
        (assignment.teams, assignment.appearances, ConstraintErrors::new())
    };

    info!(
        seed = params.seed,
        rounds = params.rounds,
        people = params.pool.len(),
        violations = errors.len(),
        "teams generated"
    );

    Ok(Outcome {
        seed: params.seed,
        seed_date: request.seed.date().map(|d| d.format("%Y-%m-%d").to_string()),
        reproducible: !matches!(request.seed, SeedSpec::Timestamp(_)),
        rounds: params.rounds,
        labels: round_labels(params.rounds),
        teams,
        appearances,
        errors,
    })
}
