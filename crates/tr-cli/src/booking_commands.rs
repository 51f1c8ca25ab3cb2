use clap::Subcommand;
use tr_session::BookingStatus;

#[derive(Subcommand)]
pub enum BookingCommands {
    /// List bookings
    List {
        /// Bookings received as a professional instead of made as a customer
        #[arg(long)]
        as_professional: bool,
    },
    /// Get a booking by ID
    Get {
        id: u64,
    },
    /// Book a professional
    Create {
        /// Professional's user ID
        #[arg(long)]
        professional: u64,
        #[arg(long)]
        service_type: String,
        /// RFC 3339 date-time (e.g., 2026-11-02T10:00:00Z)
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Accept or reject a booking (professionals only)
    Status {
        id: u64,
        /// pending, accepted or rejected
        status: BookingStatus,
    },
    /// Cancel a booking
    Cancel {
        id: u64,
    },
    /// Booking counters for the dashboard
    Summary {
        #[arg(long)]
        as_professional: bool,
    },
}
