use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Update profile fields. Only the given fields are sent.
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        about_me: Option<String>,
        /// URL of the new profile picture
        #[arg(long)]
        profile_picture: Option<String>,
    },
}
