use clap::{Args, Subcommand};

/// Invite commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InviteCommands {
    /// Invite a user to the active organization (admin or owner only).
    Create(InviteCreateArgs),
    /// Redeem an invite token and join its organization.
    Accept(InviteAcceptArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InviteCreateArgs {
    /// Invitee email address.
    #[arg(long)]
    pub email: String,
    /// Role to grant: owner, admin, or member.
    #[arg(long, default_value = "member")]
    pub role: String,
}

#[derive(Clone, Debug, Args)]
pub struct InviteAcceptArgs {
    /// The invite token from the accept URL.
    pub token: String,
}
