use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::RequestError;
use crate::teams::DisabledByRound;

/// Splits a names list on commas and newlines, dropping blanks
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads a pool from a CSV or one-name-per-line text file.
///
/// The first non-empty field of each row is taken as the name. Lines
/// starting with `#` are comments, and a lone `name` header is skipped.
pub fn load_pool<P: AsRef<Path>>(path: P) -> Result<Vec<String>, RequestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)?;

    let mut pool = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let Some(name) = record.iter().map(str::trim).find(|field| !field.is_empty()) else {
            continue;
        };
        if row == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        pool.push(name.to_string());
    }
    Ok(pool)
}

/// Parses `round:name,name;round:name` with zero-based round indices
pub fn parse_disabled(raw: &str) -> Result<DisabledByRound, RequestError> {
    let mut disabled = DisabledByRound::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (round, people) = entry
            .split_once(':')
            .ok_or_else(|| RequestError::InvalidDisabled(format!("missing ':' in {:?}", entry)))?;
        let round: usize = round
            .trim()
            .parse()
            .map_err(|_| RequestError::InvalidDisabled(format!("bad round index {:?}", round.trim())))?;

        let names: BTreeSet<String> = people
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        disabled.entry(round).or_default().extend(names);
    }

    Ok(disabled)
}
