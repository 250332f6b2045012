use clap::Subcommand;

/// Membership commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// List members of the active organization (admin or owner only).
    List,
}
