//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, path, formatter),
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    let redacted = config.redacted();
    let body = match formatter.format() {
        OutputFormat::Json => serde_json::to_string_pretty(&redacted)?,
        _ => toml::to_string_pretty(&redacted)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?,
    };

    if !path.exists() {
        eprintln!(
            "{}",
            formatter.info(&format!("{} does not exist; showing defaults", path.display()))
        );
    }
    println!("{}", body);
    Ok(())
}

fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    Config::default().save(path)?;
    eprintln!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        init_config(&path, false, &formatter).unwrap();
        assert!(path.exists());
        assert!(init_config(&path, false, &formatter).is_err());
        assert!(init_config(&path, true, &formatter).is_ok());
    }

    #[test]
    fn test_initialized_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        init_config(&path, false, &formatter).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.extractor.stop_signal, "TASK_COMPLETE");
    }
}
