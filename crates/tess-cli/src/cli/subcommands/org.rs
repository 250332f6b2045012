use clap::{Args, Subcommand};

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// List organizations you belong to.
    List,
    /// Create an organization and make it active.
    Create(OrgCreateArgs),
    /// Switch the active organization.
    Switch(OrgSwitchArgs),
}

#[derive(Clone, Debug, Args)]
pub struct OrgCreateArgs {
    /// Organization name.
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct OrgSwitchArgs {
    /// Organization id or slug.
    pub organization: String,
}
