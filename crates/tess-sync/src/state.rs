//! In-memory workspace state committed by loader effects and dispatchers.

use tess_core::{AuditEvent, Member, OrgRole, OrgSummary, Viewer};

/// At most this many audit events are surfaced, regardless of how many the
/// backend returns.
pub const AUDIT_SURFACE_LIMIT: usize = 10;

/// Load progress for a single loader slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Everything the dashboard renders, as last committed by the loaders.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub viewer: Option<Viewer>,
    pub viewer_state: LoadState,
    pub organizations: Vec<OrgSummary>,
    pub members: Vec<Member>,
    pub members_state: LoadState,
    pub audit_events: Vec<AuditEvent>,
    /// Accept URL of the most recently created invite. Cleared whenever the
    /// active organization changes (it would be a stale cross-organization
    /// artifact).
    pub last_invite_url: Option<String>,
    pub last_uploaded_file_id: Option<String>,
    pub uploading: bool,
    pub portal_opening: bool,
}

impl WorkspaceState {
    /// The caller's role in the active organization, from the last viewer
    /// fetch. Unknown until a viewer has loaded.
    #[must_use]
    pub fn viewer_role(&self) -> OrgRole {
        self.viewer
            .as_ref()
            .map_or(OrgRole::Unknown, |v| v.organization.role)
    }

    /// Client-side gate for the member list and invite creation.
    #[must_use]
    pub fn can_manage_members(&self) -> bool {
        self.viewer_role().can_manage_members()
    }

    /// The surfaced slice of audit events (most recent first, capped).
    #[must_use]
    pub fn recent_audit_events(&self) -> &[AuditEvent] {
        let end = self.audit_events.len().min(AUDIT_SURFACE_LIMIT);
        &self.audit_events[..end]
    }
}
