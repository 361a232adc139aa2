//! Command implementations.

pub mod compare;
pub mod config;
pub mod embed_catalog;
pub mod extract;
pub mod report;
pub mod run;

pub use self::compare::execute_compare;
pub use self::config::execute_config;
pub use self::embed_catalog::execute_embed_catalog;
pub use self::extract::execute_extract;
pub use self::report::execute_report;
pub use self::run::execute_run;
