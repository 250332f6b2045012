use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MemberRow {
    user_id: String,
    email: String,
    role: String,
    joined_at: String,
}

/// Handle `tsr member <subcommand>`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_ready()?;
    match action {
        MemberCommands::List => list(ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.loader.active_org().is_none() {
        anyhow::bail!("no active organization (try 'tsr org switch')");
    }

    // The viewer fetch establishes the caller's role for the gate below.
    ctx.loader.load_viewer(&ctx.session).await;
    let state = ctx.loader.snapshot();
    if !state.can_manage_members() {
        anyhow::bail!(
            "member list requires the admin or owner role (you are '{}')",
            state.viewer_role().as_str()
        );
    }

    ctx.loader.load_members(&ctx.session).await;
    let state = ctx.loader.snapshot();
    if state.members_state == tess_sync::LoadState::Error {
        anyhow::bail!("could not load members");
    }

    let rows = state
        .members
        .iter()
        .map(|member| MemberRow {
            user_id: member.user_id.clone(),
            email: member.primary_email.clone(),
            role: member.role.as_str().to_string(),
            joined_at: member.joined_at.to_rfc3339(),
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
