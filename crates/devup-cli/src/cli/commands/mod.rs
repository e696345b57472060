//! CLI command handlers, one file per command.

mod config;
mod open;
mod run;

pub use config::run_config;
pub use open::run_open;
pub use run::run_session;
