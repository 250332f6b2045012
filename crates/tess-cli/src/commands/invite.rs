use serde::Serialize;
use tess_core::OrgRole;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{InviteAcceptArgs, InviteCommands, InviteCreateArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct InviteCreatedResponse {
    accept_url: String,
}

#[derive(Serialize)]
struct InviteAcceptedResponse {
    organization_id: String,
    organization_name: String,
    active: bool,
}

/// Handle `tsr invite <subcommand>`.
pub async fn handle(
    action: &InviteCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_ready()?;
    match action {
        InviteCommands::Create(args) => create(args, ctx, flags).await,
        InviteCommands::Accept(args) => accept(args, ctx, flags).await,
    }
}

async fn create(
    args: &InviteCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role = OrgRole::parse(&args.role);
    if role == OrgRole::Unknown {
        anyhow::bail!("invalid role '{}' (expected owner, admin, or member)", args.role);
    }

    // The viewer fetch establishes the caller's role for the client-side
    // gate inside the dispatcher.
    ctx.loader.load_viewer(&ctx.session).await;

    let accept_url = ctx
        .loader
        .create_invite(&ctx.session, &args.email, role)
        .await?;
    output(&InviteCreatedResponse { accept_url }, flags.format)
}

async fn accept(
    args: &InviteAcceptArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let joined = ctx.loader.accept_invite(&ctx.session, &args.token).await?;
    output(
        &InviteAcceptedResponse {
            organization_id: joined.id,
            organization_name: joined.name,
            active: true,
        },
        flags.format,
    )
}
