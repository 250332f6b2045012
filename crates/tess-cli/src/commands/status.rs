use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    active_organization: Option<String>,
    role: Option<String>,
    organizations: usize,
    members_visible: usize,
    recent_audit_events: usize,
}

/// Handle `tsr status`: one full workspace refresh, summarized.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.session.is_ready() {
        output(
            &StatusResponse {
                authenticated: false,
                user_id: None,
                email: None,
                active_organization: None,
                role: None,
                organizations: 0,
                members_visible: 0,
                recent_audit_events: 0,
            },
            flags.format,
        )?;
        return Ok(());
    }

    ctx.loader.refresh(&ctx.session).await;
    let state = ctx.loader.snapshot();

    output(
        &StatusResponse {
            authenticated: true,
            user_id: ctx.session.user_id.clone(),
            email: state.viewer.as_ref().map(|v| v.user.primary_email.clone()),
            active_organization: ctx.loader.active_org(),
            role: state
                .viewer
                .as_ref()
                .map(|v| v.organization.role.as_str().to_string()),
            organizations: state.organizations.len(),
            members_visible: state.members.len(),
            recent_audit_events: state.recent_audit_events().len(),
        },
        flags.format,
    )
}
