use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BillingCheckoutArgs, BillingCommands};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct BillingResponse {
    opened_url: String,
}

/// Handle `tsr billing <subcommand>`.
pub async fn handle(
    action: &BillingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_ready()?;
    let url = match action {
        BillingCommands::Checkout(BillingCheckoutArgs { plan }) => {
            ctx.loader.start_checkout(&ctx.session, plan).await?
        }
        BillingCommands::Portal => ctx.loader.open_billing_portal(&ctx.session).await?,
    };

    open::that(&url).with_context(|| format!("failed to open '{url}'"))?;
    output(&BillingResponse { opened_url: url }, flags.format)
}
