use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, BillingCommands, FileCommands, InviteCommands, MemberCommands, OrgCommands,
};

/// All `tsr` subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage stored credentials.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// List, create, and switch organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Inspect organization membership.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Create and redeem invites.
    Invite {
        #[command(subcommand)]
        action: InviteCommands,
    },
    /// Upload and download files.
    File {
        #[command(subcommand)]
        action: FileCommands,
    },
    /// Billing checkout and portal.
    Billing {
        #[command(subcommand)]
        action: BillingCommands,
    },
    /// Recent audit events for the active organization.
    Audit,
    /// Session, active organization, and workspace summary.
    Status,
    /// Backend app/env/version info (unauthenticated).
    Meta,
}
