use super::types::{AppearanceBounds, Appearances, ConstraintErrors, DisabledByRound, ErrorKey};

/// Flags every person whose final count falls outside the bounds
pub fn check_appearances(appearances: &Appearances, bounds: AppearanceBounds, errors: &mut ConstraintErrors) {
    for (person, &count) in appearances {
        if count < bounds.min {
            errors.insert(
                ErrorKey::Person(person.clone()),
                format!("{} appears {} times, below the minimum of {}", person, count, bounds.min),
            );
        } else if count > bounds.max {
            errors.insert(
                ErrorKey::Person(person.clone()),
                format!("{} appears {} times, above the maximum of {}", person, count, bounds.max),
            );
        }
    }
}

/// Flags rounds where every pool member is disabled
pub fn check_rounds(pool: &[String], rounds: usize, disabled_by_round: &DisabledByRound, errors: &mut ConstraintErrors) {
    for round in 0..rounds {
        let Some(disabled) = disabled_by_round.get(&round) else {
            continue;
        };
        if pool.iter().all(|p| disabled.contains(p)) {
            errors.insert(ErrorKey::Round(round), "All participants disabled for this round");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn flags_counts_on_both_sides() {
        let appearances: Appearances = [("A".to_string(), 0), ("B".to_string(), 2), ("C".to_string(), 4)]
            .into_iter()
            .collect();
        let mut errors = ConstraintErrors::new();
        check_appearances(&appearances, AppearanceBounds { min: 1, max: 3 }, &mut errors);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(&ErrorKey::Person("A".to_string())),
            Some("A appears 0 times, below the minimum of 1")
        );
        assert_eq!(
            errors.get(&ErrorKey::Person("C".to_string())),
            Some("C appears 4 times, above the maximum of 3")
        );
    }

    #[test]
    fn fully_disabled_round_is_flagged() {
        let pool = vec!["A".to_string(), "B".to_string()];
        let mut disabled = DisabledByRound::new();
        disabled.insert(1, BTreeSet::from(["A".to_string(), "B".to_string()]));
        disabled.insert(0, BTreeSet::from(["A".to_string()]));

        let mut errors = ConstraintErrors::new();
        check_rounds(&pool, 2, &disabled, &mut errors);

        assert_eq!(errors.len(), 1);
        assert!(errors.get(&ErrorKey::Round(1)).is_some());
    }
}
