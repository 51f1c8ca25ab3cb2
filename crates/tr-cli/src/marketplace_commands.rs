use clap::Subcommand;

#[derive(Subcommand)]
pub enum MarketplaceCommands {
    /// List products for sale
    Products,
    /// List services on offer
    Services,
}
