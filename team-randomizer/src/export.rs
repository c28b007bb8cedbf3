use std::io;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::request::Outcome;

fn write_rows<W: io::Write>(outcome: &Outcome, wtr: &mut Writer<W>) -> Result<(), csv::Error> {
    let width = outcome.teams.iter().map(Vec::len).max().unwrap_or(0);

    let mut header = vec!["round".to_string(), "label".to_string()];
    header.extend((1..=width).map(|n| format!("member_{}", n)));
    wtr.write_record(&header)?;

    for (round, team) in outcome.teams.iter().enumerate() {
        let label = outcome.labels.get(round).cloned().unwrap_or_default();
        let mut row = vec![(round + 1).to_string(), label];
        row.extend(team.iter().cloned());
        // short rounds are padded so every row has the same width
        row.resize(width + 2, String::new());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes one row per round: `round,label,member_1..member_n`
pub fn export_teams_to_csv(outcome: &Outcome, csv_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().from_path(csv_path)?;
    write_rows(outcome, &mut wtr)?;
    Ok(())
}

/// Same rows as [`export_teams_to_csv`], returned as a string
pub fn teams_to_csv_string(outcome: &Outcome) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    write_rows(outcome, &mut wtr)?;
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
