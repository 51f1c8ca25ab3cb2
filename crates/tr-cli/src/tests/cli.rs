use crate::{BookingCommands, Cli, Commands, OtpCommands};

use clap::Parser;
use tr_session::{BookingStatus, Role};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tailorent").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_login_parses_identifier_and_password() {
    let cli = parse(&["login", "a@b.com", "--password", "x"]);

    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => {
            assert_eq!(identifier, "a@b.com");
            assert_eq!(password, "x");
        }
        _ => panic!("expected login"),
    }
}

#[test]
fn test_login_requires_password() {
    assert!(Cli::try_parse_from(["tailorent", "login", "a@b.com"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["whoami", "--pretty", "--base-url", "http://localhost:9000/api"]);

    assert!(cli.pretty);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/api"));
}

#[test]
fn test_otp_verify_positional_arguments() {
    let cli = parse(&["otp", "verify", "08012345678", "123456"]);

    match cli.command {
        Commands::Otp {
            action: OtpCommands::Verify { phone, code },
        } => {
            assert_eq!(phone, "08012345678");
            assert_eq!(code, "123456");
        }
        _ => panic!("expected otp verify"),
    }
}

#[test]
fn test_register_role_defaults_to_customer() {
    let cli = parse(&["register", "--email", "n@example.com", "--password", "p"]);

    match cli.command {
        Commands::Register { role, .. } => assert_eq!(role, Role::Customer),
        _ => panic!("expected register"),
    }
}

#[test]
fn test_register_role_is_lenient() {
    let cli = parse(&[
        "register",
        "--phone",
        "080",
        "--password",
        "p",
        "--role",
        "fashion-designer",
    ]);

    match cli.command {
        Commands::Register { role, .. } => assert_eq!(role, Role::FashionDesigner),
        _ => panic!("expected register"),
    }
}

#[test]
fn test_booking_status_parsed() {
    let cli = parse(&["bookings", "status", "42", "accept"]);

    match cli.command {
        Commands::Bookings {
            action: BookingCommands::Status { id, status },
        } => {
            assert_eq!(id, 42);
            assert_eq!(status, BookingStatus::Accepted);
        }
        _ => panic!("expected bookings status"),
    }
}

#[test]
fn test_booking_status_rejects_unknown_value() {
    assert!(Cli::try_parse_from(["tailorent", "bookings", "status", "42", "maybe"]).is_err());
}

#[test]
fn test_session_commands_notify() {
    assert!(parse(&["logout"]).command.notifies());
    assert!(parse(&["refresh"]).command.notifies());
    assert!(parse(&["otp", "request", "080"]).command.notifies());
}

#[test]
fn test_data_commands_do_not_notify() {
    assert!(!parse(&["whoami"]).command.notifies());
    assert!(!parse(&["professionals"]).command.notifies());
    assert!(!parse(&["marketplace", "products"]).command.notifies());
    assert!(!parse(&["bookings", "list", "--as-professional"]).command.notifies());
}
