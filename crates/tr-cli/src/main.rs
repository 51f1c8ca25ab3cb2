//! tailorent - TailoRent session CLI
//!
//! Logs in against the TailoRent API, keeps the session in the config
//! directory and calls the marketplace endpoints with it.
//!
//! # Examples
//!
//! ```bash
//! # Log in and show who we are
//! tailorent login ada@example.com --password secret
//! tailorent whoami --pretty
//!
//! # Phone login
//! tailorent otp request 08012345678
//! tailorent otp verify 08012345678 123456
//!
//! # Book a tailor
//! tailorent bookings create --professional 3 --service-type Tailoring --date 2026-11-02T10:00:00Z
//! ```

use tr_cli::{Cli, render, run};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;
    let notifies = cli.command.notifies();

    let result = run(cli).await.and_then(|value| render(&value, pretty));

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Session operations already reported through the notifier
            if !(notifies && e.is_session()) {
                eprintln!("Error: {}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}
