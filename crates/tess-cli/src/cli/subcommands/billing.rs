use clap::{Args, Subcommand};

/// Billing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BillingCommands {
    /// Start checkout for a plan and open the hosted page.
    Checkout(BillingCheckoutArgs),
    /// Open the billing portal for the active organization.
    Portal,
}

#[derive(Clone, Debug, Args)]
pub struct BillingCheckoutArgs {
    /// Plan code to check out.
    #[arg(long)]
    pub plan: String,
}
