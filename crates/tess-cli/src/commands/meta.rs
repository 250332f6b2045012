use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tsr meta`: unauthenticated backend reachability probe.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let meta = ctx
        .api()
        .meta()
        .await
        .context("failed to reach the backend")?;
    output(&meta, flags.format)
}
