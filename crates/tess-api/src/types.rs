//! Response shapes specific to API operations (not shared entities).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tess_core::{OrgRole, OrgSummary};

/// An invite record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRecord {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    #[serde(default)]
    pub role: OrgRole,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Response from `POST /api/v1/organizations/{id}/invites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCreated {
    pub invite: InviteRecord,
    /// Ready-to-share URL the invitee visits to accept.
    pub accept_url: String,
}

/// Response from `POST /api/v1/invites/accept`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedInvite {
    /// The organization the caller just joined.
    pub organization: OrgSummary,
    #[serde(default)]
    pub accepted_at: Option<String>,
}
