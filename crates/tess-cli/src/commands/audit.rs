use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuditRow {
    id: String,
    action: String,
    user_id: String,
    data: serde_json::Value,
    created_at: String,
}

/// Handle `tsr audit`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_ready()?;

    ctx.loader.load_audit_events(&ctx.session).await;
    let state = ctx.loader.snapshot();

    let rows = state
        .recent_audit_events()
        .iter()
        .map(|event| AuditRow {
            id: event.id.clone(),
            action: event.action.clone(),
            user_id: event.user_id.clone(),
            data: event.data.clone(),
            created_at: event.created_at.to_rfc3339(),
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
