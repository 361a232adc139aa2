//! Layout of the objectives and matches tables.
//!
//! - `<institution> Objectives`: one column, one objective per row
//! - `<institution> Matches`: the objective, one column per match slot
//!   (padded to the widest row), then the `Y`/`N` status column

use crate::error::{CliError, Result};
use syllabus_domain::traits::TabularSink;
use syllabus_matcher::MatchTable;

/// Header of the objective column.
pub const OBJECTIVE_HEADER: &str = "Objective";

/// Header of the match status column.
pub const STATUS_HEADER: &str = "Matched";

/// Name of an institution's objectives table.
pub fn objectives_table(institution: &str) -> String {
    format!("{} Objectives", institution.trim())
}

/// Name of an institution's matches table.
pub fn matches_table(institution: &str) -> String {
    format!("{} Matches", institution.trim())
}

/// Reject institution names that cannot form table names.
pub fn check_institution(institution: &str) -> Result<()> {
    if institution.trim().is_empty() {
        return Err(CliError::Config("institution name is required".to_string()));
    }
    Ok(())
}

/// Write objectives as a one-column table.
pub fn write_objectives<S>(sink: &mut S, table: &str, objectives: &[String]) -> Result<()>
where
    S: TabularSink<Error = CliError>,
{
    let rows: Vec<Vec<String>> = objectives.iter().map(|o| vec![o.clone()]).collect();
    sink.write_table(table, &[OBJECTIVE_HEADER.to_string()], &rows)
}

/// Read objectives back from a one-column table.
pub fn read_objectives<S>(sink: &S, table: &str) -> Result<Vec<String>>
where
    S: TabularSink<Error = CliError>,
{
    if !sink.exists(table)? {
        return Err(CliError::TableNotFound(table.to_string()));
    }
    Ok(sink
        .read_table(table)?
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .collect())
}

/// Write match rows beside their objectives.
pub fn write_matches<S>(
    sink: &mut S,
    table: &str,
    objectives: &[String],
    matches: &MatchTable,
) -> Result<()>
where
    S: TabularSink<Error = CliError>,
{
    if objectives.len() != matches.len() {
        return Err(CliError::InvalidInput(format!(
            "{} objectives but {} match rows",
            objectives.len(),
            matches.len()
        )));
    }

    let width = matches.width();
    let mut header = Vec::with_capacity(width + 2);
    header.push(OBJECTIVE_HEADER.to_string());
    header.extend((1..=width).map(|i| format!("Match {}", i)));
    header.push(STATUS_HEADER.to_string());

    let rows: Vec<Vec<String>> = objectives
        .iter()
        .zip(matches.padded_rows())
        .zip(matches.match_status())
        .map(|((objective, cells), status)| {
            let mut row = Vec::with_capacity(width + 2);
            row.push(objective.clone());
            row.extend(cells);
            row.push(status.to_string());
            row
        })
        .collect();

    sink.write_table(table, &header, &rows)
}

/// Read a matches table back into objectives and match rows.
pub fn read_matches<S>(sink: &S, table: &str) -> Result<(Vec<String>, MatchTable)>
where
    S: TabularSink<Error = CliError>,
{
    if !sink.exists(table)? {
        return Err(CliError::TableNotFound(table.to_string()));
    }

    let mut objectives = Vec::new();
    let mut cells = Vec::new();
    for row in sink.read_table(table)? {
        if row.len() < 2 {
            return Err(CliError::InvalidInput(format!(
                "table '{}' has a row with {} cell(s)",
                table,
                row.len()
            )));
        }
        objectives.push(row[0].clone());
        cells.push(row[1..row.len() - 1].to_vec());
    }
    Ok((objectives, MatchTable::from_cells(&cells)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::JsonTableSink;
    use syllabus_domain::ScoredLabel;

    #[test]
    fn test_table_names() {
        assert_eq!(objectives_table(" State U "), "State U Objectives");
        assert_eq!(matches_table("State U"), "State U Matches");
        assert!(check_institution("  ").is_err());
    }

    #[test]
    fn test_objectives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonTableSink::new(dir.path());
        let objectives = vec!["Describe anatomy".to_string(), "Explain disease".to_string()];

        write_objectives(&mut sink, "X Objectives", &objectives).unwrap();
        assert_eq!(read_objectives(&sink, "X Objectives").unwrap(), objectives);
    }

    #[test]
    fn test_matches_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonTableSink::new(dir.path());
        let objectives = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let matches = MatchTable::new(vec![
            vec![],
            vec![ScoredLabel::new("PC1", 0.9), ScoredLabel::new("PC2", 0.6)],
            vec![ScoredLabel::new("MK1", 0.55)],
        ]);

        write_matches(&mut sink, "X Matches", &objectives, &matches).unwrap();

        let (header, rows) = sink.read_with_header("X Matches").unwrap();
        assert_eq!(header, vec!["Objective", "Match 1", "Match 2", "Matched"]);
        assert_eq!(rows[0], vec!["a", "", "", "N"]);
        assert_eq!(rows[1], vec!["b", "PC1 (0.90000)", "PC2 (0.60000)", "Y"]);
        assert_eq!(rows[2], vec!["c", "MK1 (0.55000)", "", "Y"]);

        let (read_objectives, read_table) = read_matches(&sink, "X Matches").unwrap();
        assert_eq!(read_objectives, objectives);
        assert_eq!(read_table.total_matches(), 3);
        assert_eq!(read_table.rows()[1][1].label, "PC2");
    }

    #[test]
    fn test_read_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonTableSink::new(dir.path());
        assert!(matches!(
            read_objectives(&sink, "none"),
            Err(CliError::TableNotFound(_))
        ));
    }
}
