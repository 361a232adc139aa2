//! Syllabus CLI library.
//!
//! Configuration, document source, table sink, output formatting and the
//! command implementations behind the `syllabus` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod sink;
pub mod source;
pub mod tables;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
