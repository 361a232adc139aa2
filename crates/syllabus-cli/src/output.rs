//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use syllabus_extractor::ExtractionResult;
use syllabus_matcher::{MatchTable, ReportSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted objectives.
    pub fn format_objectives(&self, objectives: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(objectives)?),
            OutputFormat::Quiet => Ok(objectives.join("\n")),
            OutputFormat::Table => {
                if objectives.is_empty() {
                    return Ok(self.colorize("No objectives found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Objective"]);
                for (i, objective) in objectives.iter().enumerate() {
                    builder.push_record([(i + 1).to_string(), objective.clone()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// One-line summary of an extraction run.
    pub fn extraction_summary(&self, result: &ExtractionResult) -> String {
        let meta = &result.metadata;
        let mut line = format!(
            "Extracted {} objective(s) from {}/{} chunk(s) with {} in {} ms",
            result.objectives.len(),
            meta.chunks_sent,
            meta.total_chunks,
            meta.model_name,
            meta.processing_time_ms
        );
        if meta.stopped_early {
            line.push_str(" (stopped early)");
        }
        if result.failures.is_empty() {
            self.success(&line)
        } else {
            self.warning(&format!("{}; {} chunk(s) failed", line, result.failures.len()))
        }
    }

    /// Format match rows next to their objectives.
    pub fn format_matches(&self, objectives: &[String], table: &MatchTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = objectives
                    .iter()
                    .zip(table.rows())
                    .map(|(objective, row)| {
                        serde_json::json!({
                            "objective": objective,
                            "matches": row
                                .iter()
                                .map(|m| serde_json::json!({ "label": m.label, "score": m.score }))
                                .collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(table.match_status().join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Objective", "Matches", "Status"]);
                for ((objective, row), status) in
                    objectives.iter().zip(table.rows()).zip(table.match_status())
                {
                    let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                    builder.push_record([objective.clone(), cells.join("\n"), status.to_string()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format an alignment report.
    pub fn format_report(&self, institution: &str, report: &ReportSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.unmatched.join("\n")),
            OutputFormat::Table => {
                let mut out = Vec::new();
                out.push(self.colorize(&format!("Alignment report: {}", institution), "cyan"));
                out.push(format!(
                    "{} objective(s), {} match(es)",
                    report.objective_count, report.match_count
                ));

                let mut bands = Builder::default();
                bands.push_record(["Quality", "Matches"]);
                for (name, count) in &report.bands {
                    bands.push_record([name.clone(), count.to_string()]);
                }
                out.push(self.render(bands));

                out.push(self.section("Excellent matches", &report.excellent));
                out.push(self.section("Most aligned", &report.top_aligned));
                out.push(self.section(
                    &format!("Areas for improvement ({})", report.unmatched.len()),
                    &report.unmatched,
                ));

                let mut coverage = Builder::default();
                coverage.push_record(["Label", "Count", "Objectives"]);
                for c in &report.coverage {
                    coverage.push_record([c.label.clone(), c.count.to_string(), c.objectives.join("\n")]);
                }
                out.push(self.render(coverage));

                Ok(out.join("\n\n"))
            }
        }
    }

    fn section(&self, title: &str, lines: &[String]) -> String {
        let mut out = self.colorize(title, "magenta");
        if lines.is_empty() {
            out.push_str("\n  (none)");
        }
        for line in lines {
            out.push_str("\n  ");
            out.push_str(line);
        }
        out
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_domain::ScoredLabel;
    use syllabus_matcher::{default_bands, AlignmentReport};

    fn objectives() -> Vec<String> {
        vec!["Describe anatomy".to_string(), "Write grants".to_string()]
    }

    fn table() -> MatchTable {
        MatchTable::new(vec![vec![ScoredLabel::new("MK1", 0.8)], vec![]])
    }

    #[test]
    fn test_objectives_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_objectives(&objectives()).unwrap();
        assert!(output.contains("Objective"));
        assert!(output.contains("Write grants"));
    }

    #[test]
    fn test_objectives_json_and_quiet() {
        let json = Formatter::new(OutputFormat::Json, false)
            .format_objectives(&objectives())
            .unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, objectives());

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_objectives(&objectives())
            .unwrap();
        assert_eq!(quiet, "Describe anatomy\nWrite grants");
    }

    #[test]
    fn test_empty_objectives() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_objectives(&[]).unwrap();
        assert!(output.contains("No objectives found"));
    }

    #[test]
    fn test_matches_table_shows_status() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_matches(&objectives(), &table()).unwrap();
        assert!(output.contains("MK1 (0.80000)"));
        assert!(output.contains("Status"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_matches(&objectives(), &table())
            .unwrap();
        assert_eq!(quiet, "Y\nN");
    }

    #[test]
    fn test_report_sections() {
        let objectives = objectives();
        let table = table();
        let summary = AlignmentReport::new(&objectives, &table)
            .unwrap()
            .summary(&default_bands(), &["MK1".to_string()], 5);

        let output = Formatter::new(OutputFormat::Table, false)
            .format_report("State U", &summary)
            .unwrap();
        assert!(output.contains("Alignment report: State U"));
        assert!(output.contains("Areas for improvement (1)"));
        assert!(output.contains("1 Matches: Describe anatomy"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
