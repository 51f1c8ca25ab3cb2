use clap::Subcommand;

#[derive(Subcommand)]
pub enum OtpCommands {
    /// Text a one-time code to a phone number
    Request {
        phone: String,
    },
    /// Log in with the code that was sent
    Verify {
        phone: String,
        code: String,
    },
}
