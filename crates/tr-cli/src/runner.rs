use crate::{
    booking_commands::BookingCommands,
    cli::Cli,
    commands::Commands,
    error::{CliError, Result as CliResult},
    logger,
    marketplace_commands::MarketplaceCommands,
    notifier::StderrNotifier,
    otp_commands::OtpCommands,
    password_commands::PasswordCommands,
    profile_commands::ProfileCommands,
};

use std::io::IsTerminal;
use std::sync::Arc;

use chrono::DateTime;
use log::{debug, info};
use serde_json::{Value, json};
use tr_config::Config;
use tr_session::{
    ChangePasswordRequest, LogNotifier, NewBooking, Notifier, ProfileUpdate, RegisterRequest,
    SessionManager,
};

/// Load config, start logging, restore the session and run the command.
pub async fn run(cli: Cli) -> CliResult<Value> {
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    config.validate()?;

    logger::initialize(config.logging.level, config.log_path()?, config.logging.colored)?;

    info!("Starting tailorent v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let notifier = pick_notifier(std::io::stderr().is_terminal());
    let session = SessionManager::from_config(&config, notifier).map_err(CliError::Startup)?;
    let state = session.initialize().await;
    debug!("Session after restore: {}", state.name());

    execute(&session, cli.command).await
}

/// Plain notification lines on a terminal; timestamped log records when
/// stderr is captured.
pub(crate) fn pick_notifier(interactive: bool) -> Arc<dyn Notifier> {
    if interactive {
        Arc::new(StderrNotifier)
    } else {
        Arc::new(LogNotifier)
    }
}

/// Run one command against an initialized session.
pub async fn execute(session: &SessionManager, command: Commands) -> CliResult<Value> {
    match command {
        Commands::Login {
            identifier,
            password,
        } => {
            let identity = session.login(&identifier, &password).await?;
            Ok(serde_json::to_value(identity)?)
        }

        Commands::Otp { action } => match action {
            OtpCommands::Request { phone } => {
                session.request_otp(&phone).await?;
                Ok(json!({ "phone_number": phone, "sent": true }))
            }
            OtpCommands::Verify { phone, code } => {
                let identity = session.verify_otp(&phone, &code).await?;
                Ok(serde_json::to_value(identity)?)
            }
        },

        Commands::Register {
            email,
            phone,
            password,
            password_confirm,
            first_name,
            last_name,
            role,
            address,
            about_me,
        } => {
            if email.is_none() && phone.is_none() {
                return Err(CliError::invalid_argument(
                    "register needs --email or --phone",
                ));
            }

            let request = RegisterRequest {
                email,
                phone_number: phone,
                password_confirm: password_confirm.unwrap_or_else(|| password.clone()),
                password,
                first_name,
                last_name,
                role,
                address,
                about_me,
            };
            session.register(&request).await?;
            Ok(json!({ "registered": true }))
        }

        Commands::Logout => {
            session.logout().await;
            Ok(json!({ "authenticated": false }))
        }

        Commands::Whoami => Ok(whoami(session)),

        Commands::Profile { action } => match action {
            ProfileCommands::Update {
                email,
                phone,
                first_name,
                last_name,
                address,
                about_me,
                profile_picture,
            } => {
                let fields = ProfileUpdate {
                    email,
                    phone_number: phone,
                    first_name,
                    last_name,
                    address,
                    about_me,
                    profile_picture,
                };
                if fields.is_empty() {
                    return Err(CliError::invalid_argument("no profile fields given"));
                }

                let identity = session.update_profile(&fields).await?;
                Ok(serde_json::to_value(identity)?)
            }
        },

        Commands::Password { action } => match action {
            PasswordCommands::Change { old, new, confirm } => {
                let request = ChangePasswordRequest {
                    old_password: old,
                    confirm_password: confirm.unwrap_or_else(|| new.clone()),
                    new_password: new,
                };
                session.change_password(&request).await?;
                Ok(json!({ "changed": true }))
            }
        },

        Commands::Refresh => {
            session.refresh().await?;
            Ok(json!({ "refreshed": true }))
        }

        Commands::Professionals => Ok(session.list_professionals().await?),

        Commands::Bookings { action } => match action {
            BookingCommands::List { as_professional } => {
                let bookings = if as_professional {
                    session.list_professional_bookings().await?
                } else {
                    session.list_bookings().await?
                };
                Ok(bookings)
            }
            BookingCommands::Get { id } => Ok(session.get_booking(id).await?),
            BookingCommands::Create {
                professional,
                service_type,
                date,
                location,
                notes,
            } => {
                DateTime::parse_from_rfc3339(&date).map_err(|e| {
                    CliError::invalid_argument(format!("--date '{date}' is not RFC 3339: {e}"))
                })?;

                let booking = NewBooking {
                    professional,
                    service_type,
                    date,
                    location,
                    notes,
                };
                Ok(session.create_booking(&booking).await?)
            }
            BookingCommands::Status { id, status } => {
                Ok(session.update_booking_status(id, status).await?)
            }
            BookingCommands::Cancel { id } => Ok(session.cancel_booking(id).await?),
            BookingCommands::Summary { as_professional } => {
                Ok(session.booking_summary(as_professional).await?)
            }
        },

        Commands::Marketplace { action } => match action {
            MarketplaceCommands::Products => Ok(session.list_products().await?),
            MarketplaceCommands::Services => Ok(session.list_services().await?),
        },
    }
}

fn whoami(session: &SessionManager) -> Value {
    match session.identity() {
        Some(identity) => json!({
            "authenticated": true,
            "display_name": identity.display_name(),
            "user": identity,
        }),
        None => json!({ "authenticated": false }),
    }
}

/// Serialize command output for stdout.
pub fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
