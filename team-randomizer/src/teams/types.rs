use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Rounds of teams; each round lists its members in selection order
pub type Teams = Vec<Vec<String>>;

/// person -> number of rounds they appear in
pub type Appearances = BTreeMap<String, usize>;

/// round index -> people who must not play in that round
pub type DisabledByRound = BTreeMap<usize, BTreeSet<String>>;

/// Inclusive per-person appearance bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppearanceBounds {
    pub min: usize,
    pub max: usize,
}

/// Input for one team generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomizationParams {
    pub pool: Vec<String>,
    pub team_size: usize,
    pub rounds: usize,
    pub min_appearances: usize,
    pub max_appearances: usize,
    pub seed: i64,
}

impl RandomizationParams {
    pub fn bounds(&self) -> AppearanceBounds {
        AppearanceBounds {
            min: self.min_appearances,
            max: self.max_appearances,
        }
    }
}

/// Successful engine output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub teams: Teams,
    pub appearances: Appearances,
}

/// What a constraint violation is attached to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKey {
    Round(usize),
    Person(String),
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKey::Round(round) => write!(f, "round-{}", round + 1),
            ErrorKey::Person(name) => write!(f, "{}", name),
        }
    }
}

/// Non-fatal violations left behind by the adjustment step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintErrors(BTreeMap<ErrorKey, String>);

impl ConstraintErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation; a later message for the same key replaces the earlier one
    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn get(&self, key: &ErrorKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKey, &String)> {
        self.0.iter()
    }
}

/// Serialized as `{"rounds": {"1": ..}, "people": {"Ann": ..}}` so a person
/// can never collide with a round key
impl Serialize for ConstraintErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut rounds = BTreeMap::new();
        let mut people = BTreeMap::new();
        for (key, message) in &self.0 {
            match key {
                ErrorKey::Round(round) => {
                    rounds.insert((round + 1).to_string(), message);
                }
                ErrorKey::Person(name) => {
                    people.insert(name.as_str(), message);
                }
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("rounds", &rounds)?;
        map.serialize_entry("people", &people)?;
        map.end()
    }
}

/// Output of the adjustment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub teams: Teams,
    pub errors: ConstraintErrors,
    pub appearances: Appearances,
}

/// Counts appearances of every pool member across `teams`, optionally
/// ignoring one round. Pool members who never play are reported as 0.
pub fn count_appearances(pool: &[String], teams: &[Vec<String>], skip_round: Option<usize>) -> Appearances {
    let mut appearances: Appearances = pool.iter().map(|p| (p.clone(), 0)).collect();
    for (round, team) in teams.iter().enumerate() {
        if skip_round == Some(round) {
            continue;
        }
        for person in team {
            *appearances.entry(person.clone()).or_insert(0) += 1;
        }
    }
    appearances
}
