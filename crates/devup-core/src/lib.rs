pub mod browser;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod readiness;
pub mod session;
