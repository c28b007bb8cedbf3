use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::request::Outcome;

/// Meal names for the usual round counts, `Round N` otherwise
pub fn round_labels(rounds: usize) -> Vec<String> {
    match rounds {
        2 => vec!["Brunch".to_string(), "Dinner".to_string()],
        3 => vec!["Breakfast".to_string(), "Lunch".to_string(), "Dinner".to_string()],
        _ => (1..=rounds).map(|n| format!("Round {}", n)).collect(),
    }
}

/// Renders teams, appearance counts and any violations as plain text
pub fn format_teams(outcome: &Outcome) -> String {
    let mut out = String::new();

    match &outcome.seed_date {
        Some(date) => {
            let _ = writeln!(out, "** Teams for {} (seed {}) **", date, outcome.seed);
        }
        None => {
            let _ = writeln!(out, "** Teams (seed {}) **", outcome.seed);
        }
    }
    if !outcome.reproducible {
        let _ = writeln!(out, "(no seed given; pass --seed {} to reproduce)", outcome.seed);
    }

    for (round, team) in outcome.teams.iter().enumerate() {
        let label = outcome
            .labels
            .get(round)
            .cloned()
            .unwrap_or_else(|| format!("Round {}", round + 1));
        let _ = writeln!(out, "\n{}", label);
        if team.is_empty() {
            let _ = writeln!(out, "  [EMPTY]");
        }
        for (i, member) in team.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, member);
        }
    }

    let _ = writeln!(out, "\nAppearances:");
    for (person, count) in &outcome.appearances {
        let _ = writeln!(out, "  {}: {}", person, count);
    }

    if !outcome.errors.is_empty() {
        let _ = writeln!(out, "\n⚠️  Constraint problems ({}):", outcome.errors.len());
        for (key, message) in outcome.errors.iter() {
            let _ = writeln!(out, "  - {}: {}", key, message);
        }
    }

    out
}

pub fn print_teams(outcome: &Outcome) {
    print!("{}", format_teams(outcome));
}

pub fn write_teams_to_file(outcome: &Outcome, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    file.write_all(format_teams(outcome).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{ConstraintErrors, ErrorKey};

    fn outcome() -> Outcome {
        let mut errors = ConstraintErrors::new();
        errors.insert(ErrorKey::Round(1), "No replacement found for B");
        Outcome {
            seed: 20261018,
            seed_date: Some("2026-10-18".to_string()),
            reproducible: true,
            rounds: 2,
            labels: round_labels(2),
            teams: vec![vec!["Ann".to_string(), "Bo".to_string()], vec![]],
            appearances: [("Ann".to_string(), 1), ("Bo".to_string(), 1)].into_iter().collect(),
            errors,
        }
    }

    #[test]
    fn labels_by_round_count() {
        assert_eq!(round_labels(3), vec!["Breakfast", "Lunch", "Dinner"]);
        assert_eq!(round_labels(1), vec!["Round 1"]);
        assert_eq!(round_labels(4)[3], "Round 4");
    }

    #[test]
    fn text_lists_rounds_and_problems() {
        let text = format_teams(&outcome());
        assert!(text.starts_with("** Teams for 2026-10-18 (seed 20261018) **"));
        assert!(text.contains("Brunch\n  1. Ann\n  2. Bo\n"));
        assert!(text.contains("Dinner\n  [EMPTY]\n"));
        assert!(text.contains("  - round-2: No replacement found for B"));
    }

    #[test]
    fn writes_the_same_text_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.txt");
        write_teams_to_file(&outcome(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format_teams(&outcome()));
    }

    #[cfg(unix)]
    #[test]
    fn writes_to_a_non_utf8_path_as_given() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"teams-\xff.txt"));
        write_teams_to_file(&outcome(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format_teams(&outcome()));
        assert!(!dir.path().join("teams-\u{FFFD}.txt").exists());
    }
}
