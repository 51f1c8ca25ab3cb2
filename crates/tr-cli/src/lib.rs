//! tr-cli library
//!
//! Command definitions and the runner, exported for tests.

pub(crate) mod booking_commands;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod logger;
pub(crate) mod marketplace_commands;
pub(crate) mod notifier;
pub(crate) mod otp_commands;
pub(crate) mod password_commands;
pub(crate) mod profile_commands;
pub(crate) mod runner;

#[cfg(test)]
mod tests;

pub use booking_commands::BookingCommands;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
pub use marketplace_commands::MarketplaceCommands;
pub use notifier::StderrNotifier;
pub use otp_commands::OtpCommands;
pub use password_commands::PasswordCommands;
pub use profile_commands::ProfileCommands;
pub use runner::{execute, render, run};
