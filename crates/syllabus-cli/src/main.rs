//! Syllabus CLI - extract learning objectives and align them with a reference catalog.

use clap::Parser;
use syllabus_cli::commands;
use syllabus_cli::config::OutputFormat;
use syllabus_cli::{logging, Cli, Command, Config, Formatter};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let no_color = cli.no_color;
    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Table, !no_color);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> syllabus_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::EmbedCatalog(args) => commands::execute_embed_catalog(args, &config, &formatter),
        Command::Compare(args) => commands::execute_compare(args, &config, &formatter),
        Command::Run(args) => commands::execute_run(args, &config, &formatter),
        Command::Report(args) => commands::execute_report(args, &config, &formatter),
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
