use crate::{
    booking_commands::BookingCommands, marketplace_commands::MarketplaceCommands,
    otp_commands::OtpCommands, password_commands::PasswordCommands,
    profile_commands::ProfileCommands,
};

use clap::Subcommand;
use tr_session::Role;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with an email address or phone number
    Login {
        /// Email address or phone number
        identifier: String,
        #[arg(long)]
        password: String,
    },

    /// One-time code login by phone
    Otp {
        #[command(subcommand)]
        action: OtpCommands,
    },

    /// Create an account. Does not log in.
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        password_confirm: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Customer, Tailor, Fashion_Designer, Vendor...
        #[arg(long, default_value = "Customer")]
        role: Role,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        about_me: Option<String>,
    },

    /// End the session and forget stored tokens
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Password operations
    Password {
        #[command(subcommand)]
        action: PasswordCommands,
    },

    /// Exchange the refresh token for a new access token
    Refresh,

    /// List tailors and fashion designers
    Professionals,

    /// Booking operations
    Bookings {
        #[command(subcommand)]
        action: BookingCommands,
    },

    /// Marketplace listings
    Marketplace {
        #[command(subcommand)]
        action: MarketplaceCommands,
    },
}

impl Commands {
    /// Whether the command runs a session operation that reports its own
    /// outcome through the notifier.
    pub fn notifies(&self) -> bool {
        matches!(
            self,
            Commands::Login { .. }
                | Commands::Otp { .. }
                | Commands::Register { .. }
                | Commands::Logout
                | Commands::Profile { .. }
                | Commands::Password { .. }
                | Commands::Refresh
        )
    }
}
