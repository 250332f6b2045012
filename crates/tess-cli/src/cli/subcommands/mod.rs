pub mod auth;
pub mod billing;
pub mod file;
pub mod invite;
pub mod member;
pub mod org;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use billing::{BillingCheckoutArgs, BillingCommands};
pub use file::{FileCommands, FileDownloadArgs, FileUploadArgs};
pub use invite::{InviteAcceptArgs, InviteCommands, InviteCreateArgs};
pub use member::MemberCommands;
pub use org::{OrgCommands, OrgCreateArgs, OrgSwitchArgs};
