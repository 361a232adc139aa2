//! Report command implementation.

use crate::cli::ReportArgs;
use crate::commands::compare::load_catalog;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::sink::JsonTableSink;
use crate::tables;
use syllabus_domain::traits::TabularSink;
use syllabus_matcher::{default_bands, AlignmentReport, ReportSummary};

/// Execute the report command.
pub fn execute_report(args: ReportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    tables::check_institution(&args.institution)?;
    let sink = JsonTableSink::new(config.output_dir(args.output_dir.as_deref()));
    let catalog = load_catalog(&args.catalog)?;

    let summary = build_report(&sink, &args.institution, &catalog.labels(), args.top)?;
    println!("{}", formatter.format_report(&args.institution, &summary)?);
    Ok(())
}

/// Build the report from an institution's stored matches table.
pub fn build_report<S>(
    sink: &S,
    institution: &str,
    labels: &[String],
    top: usize,
) -> Result<ReportSummary>
where
    S: TabularSink<Error = crate::error::CliError>,
{
    let (objectives, matches) = tables::read_matches(sink, &tables::matches_table(institution))?;
    let report = AlignmentReport::new(&objectives, &matches)?;
    Ok(report.summary(&default_bands(), labels, top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use syllabus_domain::ScoredLabel;
    use syllabus_matcher::MatchTable;

    #[test]
    fn test_report_from_written_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonTableSink::new(dir.path());
        let objectives = vec!["Take a history".to_string(), "Run a budget".to_string()];
        let matches = MatchTable::new(vec![vec![ScoredLabel::new("PC1", 0.75)], vec![]]);
        tables::write_matches(&mut sink, "U Matches", &objectives, &matches).unwrap();

        let labels = vec!["PC1".to_string(), "MK1".to_string()];
        let summary = build_report(&sink, "U", &labels, 5).unwrap();

        assert_eq!(summary.objective_count, 2);
        assert_eq!(summary.excellent, vec!["Take a history: PC1 (0.75000)"]);
        assert_eq!(summary.unmatched, vec!["Run a budget"]);
        assert_eq!(summary.coverage[0].count, 1);
    }

    #[test]
    fn test_report_without_matches_table() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonTableSink::new(dir.path());
        assert!(matches!(
            build_report(&sink, "U", &[], 5),
            Err(CliError::TableNotFound(_))
        ));
    }
}
