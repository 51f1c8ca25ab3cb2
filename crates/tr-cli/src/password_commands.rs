use clap::Subcommand;

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Change the password of the logged-in account
    Change {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        /// Defaults to --new
        #[arg(long)]
        confirm: Option<String>,
    },
}
