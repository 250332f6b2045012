//! Wire-format entities returned by the backend API.
//!
//! Field names map 1:1 to the backend's camelCase JSON. These structs carry
//! data only; loading, gating, and reconciliation live in `tess-sync`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::roles::OrgRole;

/// Unauthenticated application metadata from `GET /api/v1/meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AppMeta {
    pub app: String,
    pub env: String,
    pub version: String,
    pub time: String,
}

/// The caller's user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub primary_email: String,
}

/// One organization the caller belongs to, with the caller's role in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrgSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// `"personal"` or `"team"`.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub role: OrgRole,
}

/// The caller's identity plus their standing in the active organization.
///
/// Refetched whenever the token or the active organization changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Viewer {
    pub user: UserProfile,
    pub organization: OrgSummary,
}

/// A user's membership in an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    #[serde(default)]
    pub primary_email: String,
    #[serde(default)]
    pub role: OrgRole,
    pub joined_at: DateTime<Utc>,
}

/// An immutable audit log record. Append-only on the server; the client only
/// reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    pub action: String,
    /// Opaque action payload; shape varies per action.
    #[serde(default)]
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
