use tracing::debug;

use super::types::{Appearances, Assignment, RandomizationParams, Teams};
use crate::error::RandomizeError;
use crate::rng::SeededRng;

fn wide_product(a: usize, b: usize) -> u128 {
    a as u128 * b as u128
}

fn saturate(value: u128) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Rejects parameter combinations that can never produce valid teams
fn check_feasible(params: &RandomizationParams) -> Result<(), RandomizeError> {
    let pool_size = params.pool.len();
    if pool_size < 2 {
        return Err(RandomizeError::PoolTooSmall { pool_size });
    }
    if params.team_size >= pool_size {
        return Err(RandomizeError::TeamTooLarge {
            team_size: params.team_size,
            pool_size,
        });
    }

    // u128 so huge caller-supplied bounds compare exactly instead of wrapping
    let slots = wide_product(params.team_size, params.rounds);
    let min_needed = wide_product(params.min_appearances, pool_size);
    let max_capacity = wide_product(params.max_appearances, pool_size);

    if slots < min_needed {
        return Err(RandomizeError::MinTooHigh {
            min: params.min_appearances,
            pool_size,
            slots: saturate(slots),
        });
    }
    if max_capacity < slots {
        return Err(RandomizeError::MaxTooLow {
            max: params.max_appearances,
            pool_size,
            slots: saturate(slots),
        });
    }
    Ok(())
}

/// Builds one round, updating `appearances` as people are picked
fn fill_round(
    params: &RandomizationParams,
    round: usize,
    rng: &mut SeededRng,
    appearances: &mut Appearances,
) -> Result<Vec<String>, RandomizeError> {
    let mut team: Vec<String> = Vec::with_capacity(params.team_size);

    while team.len() < params.team_size {
        let eligible: Vec<&String> = params
            .pool
            .iter()
            .filter(|p| !team.contains(p))
            .filter(|p| appearances.get(p.as_str()).copied().unwrap_or(0) < params.max_appearances)
            .collect();

        let needed = params.team_size - team.len();
        if eligible.len() < needed {
            return Err(RandomizeError::Starved {
                round,
                eligible: eligible.len(),
                needed,
            });
        }

        // People still below the minimum get picked first
        let (mut under_min, mut rest): (Vec<&String>, Vec<&String>) = eligible
            .into_iter()
            .partition(|p| appearances.get(p.as_str()).copied().unwrap_or(0) < params.min_appearances);
        rng.shuffle(&mut under_min);
        rng.shuffle(&mut rest);

        for group in [under_min, rest] {
            let open = params.team_size - team.len();
            for person in group.into_iter().take(open) {
                *appearances.entry(person.clone()).or_insert(0) += 1;
                team.push(person.clone());
            }
        }
    }

    debug!(round, team = ?team, "round filled");
    Ok(team)
}

/// Splits the pool into `rounds` teams of `team_size` people.
///
/// Every choice comes from a single generator seeded with `params.seed`, so
/// identical parameters always give identical teams. Within a round, people
/// below `min_appearances` are preferred; nobody is picked once they reach
/// `max_appearances`.
///
/// Because the fill is greedy, some parameter combinations pass every
/// per-round check and still leave someone short of the minimum. That case
/// is reported as [`RandomizeError::MinimumUnsatisfied`].
pub fn randomize_teams(params: &RandomizationParams) -> Result<Assignment, RandomizeError> {
    check_feasible(params)?;

    let mut rng = SeededRng::new(params.seed);
    let mut appearances: Appearances = params.pool.iter().map(|p| (p.clone(), 0)).collect();
    let mut teams: Teams = Vec::new();

    for round in 0..params.rounds {
        let team = fill_round(params, round, &mut rng, &mut appearances)?;
        teams.push(team);
    }

    for (round, team) in teams.iter().enumerate() {
        if team.len() != params.team_size {
            return Err(RandomizeError::RoundSizeMismatch {
                round,
                actual: team.len(),
                expected: params.team_size,
            });
        }
    }

    for person in &params.pool {
        let count = appearances.get(person).copied().unwrap_or(0);
        if count < params.min_appearances {
            return Err(RandomizeError::MinimumUnsatisfied {
                person: person.clone(),
                count,
                min: params.min_appearances,
            });
        }
    }

    Ok(Assignment { teams, appearances })
}
