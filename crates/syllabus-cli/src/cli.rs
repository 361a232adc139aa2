//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Syllabus CLI - Extract learning objectives and align them with a reference catalog.
#[derive(Debug, Parser)]
#[command(name = "syllabus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract learning objectives from a document
    Extract(ExtractArgs),

    /// Embed catalog entries that have no embedding yet
    EmbedCatalog(EmbedCatalogArgs),

    /// Match extracted objectives against a catalog
    Compare(CompareArgs),

    /// Extract, then compare
    Run(RunArgs),

    /// Print the alignment report for an institution
    Report(ReportArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Options shared by commands that call the model provider.
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// API key for the model provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory holding output tables
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Plain-text document to extract from
    #[arg(short, long)]
    pub input: PathBuf,

    /// Institution name; the output table is "<institution> Objectives"
    #[arg(short = 'n', long)]
    pub institution: String,

    /// TOML file of priming messages replacing the built-in set
    #[arg(long)]
    pub priming: Option<PathBuf>,

    /// Abort on the first failed chunk instead of skipping it
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Arguments for the embed-catalog command.
#[derive(Debug, Args)]
pub struct EmbedCatalogArgs {
    /// Catalog JSON file, updated in place
    #[arg(long)]
    pub catalog: PathBuf,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Arguments for the compare command.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Institution whose objectives are compared
    #[arg(short = 'n', long)]
    pub institution: String,

    /// Catalog JSON file with embeddings
    #[arg(long)]
    pub catalog: PathBuf,

    /// Minimum similarity for a match (-1.0 to 1.0)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Plain-text document to extract from
    #[arg(short, long)]
    pub input: PathBuf,

    /// Institution name
    #[arg(short = 'n', long)]
    pub institution: String,

    /// Catalog JSON file with embeddings
    #[arg(long)]
    pub catalog: PathBuf,

    /// Minimum similarity for a match (-1.0 to 1.0)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// TOML file of priming messages replacing the built-in set
    #[arg(long)]
    pub priming: Option<PathBuf>,

    /// Abort on the first failed chunk instead of skipping it
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Arguments for the report command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Institution to report on
    #[arg(short = 'n', long)]
    pub institution: String,

    /// Catalog JSON file; its labels order the coverage section
    #[arg(long)]
    pub catalog: PathBuf,

    /// Number of best-aligned objectives to list
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Directory holding output tables
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::try_parse_from([
            "syllabus",
            "extract",
            "--input",
            "doc.txt",
            "--institution",
            "State U",
            "--api-key",
            "sk-test",
        ])
        .unwrap();
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.institution, "State U");
                assert_eq!(args.api.api_key.as_deref(), Some("sk-test"));
                assert!(!args.strict);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "syllabus", "report", "-n", "X", "--catalog", "c.json", "-vv", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::try_parse_from(["syllabus", "config", "init", "--force"]).unwrap();
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["syllabus"]).is_err());
    }
}
