use serde::Serialize;
use tess_core::OrgSummary;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{OrgCommands, OrgCreateArgs, OrgSwitchArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct OrgRow {
    id: String,
    name: String,
    slug: String,
    kind: String,
    role: String,
    active: bool,
}

impl OrgRow {
    fn from_summary(org: &OrgSummary, active: Option<&str>) -> Self {
        Self {
            id: org.id.clone(),
            name: org.name.clone(),
            slug: org.slug.clone(),
            kind: org.kind.clone(),
            role: org.role.as_str().to_string(),
            active: active == Some(org.id.as_str()),
        }
    }
}

/// Handle `tsr org <subcommand>`.
pub async fn handle(
    action: &OrgCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_ready()?;
    match action {
        OrgCommands::List => list(ctx, flags).await,
        OrgCommands::Create(args) => create(args, ctx, flags).await,
        OrgCommands::Switch(args) => switch(args, ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.loader.load_organizations(&ctx.session).await;
    let state = ctx.loader.snapshot();
    let active = ctx.loader.active_org();

    let rows = state
        .organizations
        .iter()
        .map(|org| OrgRow::from_summary(org, active.as_deref()))
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}

async fn create(args: &OrgCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let created = ctx
        .loader
        .create_organization(&ctx.session, &args.name)
        .await?;
    let active = ctx.loader.active_org();
    output(&OrgRow::from_summary(&created, active.as_deref()), flags.format)
}

async fn switch(args: &OrgSwitchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.loader.load_organizations(&ctx.session).await;
    let state = ctx.loader.snapshot();

    let target = state
        .organizations
        .iter()
        .find(|org| org.id == args.organization || org.slug == args.organization)
        .ok_or_else(|| {
            anyhow::anyhow!("no organization matches '{}' (try 'tsr org list')", args.organization)
        })?;

    ctx.loader.switch_organization(&target.id);
    output(&OrgRow::from_summary(target, Some(&target.id)), flags.format)
}
