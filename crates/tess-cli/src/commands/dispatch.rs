use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
        Commands::Member { action } => commands::member::handle(&action, ctx, flags).await,
        Commands::Invite { action } => commands::invite::handle(&action, ctx, flags).await,
        Commands::File { action } => commands::file::handle(&action, ctx, flags).await,
        Commands::Billing { action } => commands::billing::handle(&action, ctx, flags).await,
        Commands::Audit => commands::audit::handle(ctx, flags).await,
        Commands::Status => commands::status::handle(ctx, flags).await,
        Commands::Meta => commands::meta::handle(ctx, flags).await,
    }
}
