use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::types::{count_appearances, AppearanceBounds, Adjustment, ConstraintErrors, DisabledByRound, ErrorKey, Teams};
use super::validation::{check_appearances, check_rounds};
use crate::rng::SeededRng;

/// Picks someone to take `removed`'s place in round `round_index`.
///
/// Counts ignore the round being edited. Among the people who are free, not
/// disabled and below `bounds.max`, the ones with the fewest appearances win;
/// a fresh generator seeded with `seed + round_index` breaks the tie. Every
/// call for the same round therefore uses the same first draw.
pub fn find_replacement(
    current_team: &[String],
    removed: &str,
    round_index: usize,
    all_teams: &[Vec<String>],
    pool: &[String],
    disabled: &BTreeSet<String>,
    seed: i64,
    bounds: AppearanceBounds,
) -> Option<String> {
    let appearances = count_appearances(pool, all_teams, Some(round_index));
    let count = |p: &str| appearances.get(p).copied().unwrap_or(0);

    let candidates: Vec<&String> = pool
        .iter()
        .filter(|p| p.as_str() != removed)
        .filter(|p| !current_team.contains(p))
        .filter(|p| !disabled.contains(p.as_str()))
        .filter(|p| count(p.as_str()) < bounds.max)
        .collect();

    let lowest = candidates.iter().map(|p| count(p.as_str())).min()?;
    let tied: Vec<&String> = candidates.into_iter().filter(|p| count(p.as_str()) == lowest).collect();

    let mut rng = SeededRng::for_round(seed, round_index);
    let chosen = tied[rng.index(tied.len())];
    debug!(round = round_index, removed, chosen = %chosen, tied = tied.len(), "replacement chosen");
    Some(chosen.clone())
}

/// Removes disabled people from their rounds and fills the gaps.
///
/// Works on a copy of `original_teams`. Replacements are appended to the
/// round. Anything that could not be repaired, and every person whose final
/// count falls outside `bounds`, is reported in the returned errors instead
/// of failing the whole call.
pub fn regenerate_teams_with_disabled(
    original_teams: &[Vec<String>],
    pool: &[String],
    disabled_by_round: &DisabledByRound,
    seed: i64,
    bounds: AppearanceBounds,
) -> Adjustment {
    let mut teams: Teams = original_teams.to_vec();
    let mut errors = ConstraintErrors::new();

    for (&round, disabled) in disabled_by_round {
        if disabled.is_empty() || round >= teams.len() {
            continue;
        }

        let removals: Vec<String> = teams[round].iter().filter(|p| disabled.contains(*p)).cloned().collect();
        for person in removals {
            if let Some(pos) = teams[round].iter().position(|p| *p == person) {
                teams[round].remove(pos);
            }

            match find_replacement(&teams[round], &person, round, &teams, pool, disabled, seed, bounds) {
                Some(replacement) => teams[round].push(replacement),
                None => {
                    warn!(round, person = %person, "no replacement available");
                    errors.insert(ErrorKey::Round(round), format!("No replacement found for {}", person));
                }
            }
        }
    }

    let appearances = count_appearances(pool, &teams, None);
    check_appearances(&appearances, bounds, &mut errors);
    check_rounds(pool, teams.len(), disabled_by_round, &mut errors);

    Adjustment {
        teams,
        errors,
        appearances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::engine::randomize_teams;
    use crate::teams::types::RandomizationParams;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn disabled(round: usize, people: &[&str]) -> DisabledByRound {
        let mut map = DisabledByRound::new();
        map.insert(round, people.iter().map(|s| s.to_string()).collect());
        map
    }

    fn six_people() -> (Vec<String>, Teams) {
        (
            names(&["A", "B", "C", "D", "E", "F"]),
            vec![names(&["E", "C"]), names(&["D", "A"]), names(&["B", "F"])],
        )
    }

    #[test]
    fn only_remaining_person_is_picked() {
        let pool = names(&["A", "B", "C", "D", "E"]);
        let params = RandomizationParams {
            pool: pool.clone(),
            team_size: 4,
            rounds: 1,
            min_appearances: 0,
            max_appearances: 1,
            seed: 7,
        };
        let generated = randomize_teams(&params).unwrap();
        let benched: Vec<&String> = pool.iter().filter(|p| !generated.teams[0].contains(p)).collect();
        assert_eq!(benched.len(), 1);

        let removed = generated.teams[0][0].clone();
        let result = regenerate_teams_with_disabled(
            &generated.teams,
            &pool,
            &disabled(0, &[removed.as_str()]),
            7,
            params.bounds(),
        );

        assert!(result.errors.is_empty());
        assert_eq!(result.teams[0].len(), 4);
        assert!(!result.teams[0].contains(&removed));
        assert_eq!(result.teams[0].last(), Some(benched[0]));
        assert_eq!(result.appearances[&removed], 0);
    }

    #[test]
    fn no_candidate_under_maximum_leaves_team_short() {
        let pool = names(&["A", "B", "C"]);
        let teams = vec![names(&["A", "B"]), names(&["C", "A"])];
        let result = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(0, &["A"]),
            5,
            AppearanceBounds { min: 0, max: 1 },
        );

        assert_eq!(result.teams[0], names(&["B"]));
        assert_eq!(result.errors.get(&ErrorKey::Round(0)), Some("No replacement found for A"));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn input_teams_are_not_modified() {
        let (pool, teams) = six_people();
        let before = teams.clone();
        let _ = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(0, &["E"]),
            20261018,
            AppearanceBounds { min: 1, max: 2 },
        );
        assert_eq!(teams, before);
    }

    #[test]
    fn tie_is_broken_by_round_seed() {
        let (pool, teams) = six_people();
        let chosen = find_replacement(
            &names(&["C"]),
            "E",
            0,
            &teams,
            &pool,
            &BTreeSet::from(["E".to_string()]),
            20261018,
            AppearanceBounds { min: 1, max: 2 },
        );
        assert_eq!(chosen.as_deref(), Some("A"));
    }

    #[test]
    fn fewest_appearances_win() {
        let pool = names(&["A", "B", "C", "D"]);
        let teams = vec![names(&["A", "B"]), names(&["C", "B"])];
        // Outside round 1: A=1, B=1, D=0, so D is the only lowest candidate
        let chosen = find_replacement(
            &names(&["C"]),
            "B",
            1,
            &teams,
            &pool,
            &BTreeSet::from(["B".to_string()]),
            3,
            AppearanceBounds { min: 0, max: 2 },
        );
        assert_eq!(chosen.as_deref(), Some("D"));
    }

    #[test]
    fn repeated_replacements_in_one_round_reuse_the_same_draw() {
        let (pool, teams) = six_people();
        let result = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(0, &["E", "C"]),
            20261018,
            AppearanceBounds { min: 0, max: 2 },
        );
        assert_eq!(result.teams[0], names(&["A", "B"]));
    }

    #[test]
    fn short_counts_are_reported_per_person() {
        let (pool, teams) = six_people();
        let result = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(1, &["D"]),
            20261018,
            AppearanceBounds { min: 1, max: 2 },
        );

        assert_eq!(result.teams[1], names(&["A", "B"]));
        assert_eq!(result.appearances["B"], 2);
        assert_eq!(result.appearances["D"], 0);
        assert_eq!(
            result.errors.get(&ErrorKey::Person("D".to_string())),
            Some("D appears 0 times, below the minimum of 1")
        );
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn everyone_disabled_is_a_round_error() {
        let pool = names(&["A", "B", "C"]);
        let teams = vec![names(&["A", "B"])];
        let result = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(0, &["A", "B", "C"]),
            1,
            AppearanceBounds { min: 0, max: 1 },
        );
        assert!(result.teams[0].is_empty());
        assert_eq!(
            result.errors.get(&ErrorKey::Round(0)),
            Some("All participants disabled for this round")
        );
    }

    #[test]
    fn disabled_people_outside_the_team_change_nothing() {
        let (pool, teams) = six_people();
        let result = regenerate_teams_with_disabled(
            &teams,
            &pool,
            &disabled(0, &["A"]),
            20261018,
            AppearanceBounds { min: 1, max: 1 },
        );
        assert_eq!(result.teams, teams);
        assert!(result.errors.is_empty());
    }
}
