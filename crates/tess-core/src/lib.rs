//! # tess-core
//!
//! Core types shared across the Tessera client: organization roles with rank
//! ordering, wire-format entities (viewer, organizations, members, audit
//! events), and file-transfer tickets. No I/O, no auth logic.

pub mod entities;
pub mod roles;
pub mod transfer;

pub use entities::{AppMeta, AuditEvent, Member, OrgSummary, UserProfile, Viewer};
pub use roles::OrgRole;
pub use transfer::{DownloadTicket, DownloadType, UploadTicket, UploadType};
