//! Backend seam for the sync layer.
//!
//! The loaders and dispatchers talk to the backend through
//! [`WorkspaceBackend`], which already applies the boundary policy from the
//! API contract: any network failure or non-2xx response collapses to
//! `None`/`false` here, with a warn log; structured error detail never
//! crosses into loader or dispatcher logic. Tests substitute scripted fakes.

use tess_api::types::{AcceptedInvite, InviteCreated};
use tess_api::{ApiClient, ApiError};
use tess_core::{AuditEvent, DownloadTicket, Member, OrgSummary, UploadTicket, Viewer};

/// Collapse a backend result to `Option`, logging the failure.
fn ok_or_log<T>(result: Result<T, ApiError>, operation: &'static str) -> Option<T> {
    result
        .inspect_err(|error| tracing::warn!(operation, %error, "backend call failed"))
        .ok()
}

/// Remote operations the sync layer depends on.
#[allow(clippy::too_many_arguments)]
pub trait WorkspaceBackend {
    async fn viewer(&self, token: &str, organization_id: Option<&str>) -> Option<Viewer>;

    async fn organizations(&self, token: &str) -> Option<Vec<OrgSummary>>;

    async fn members(&self, token: &str, organization_id: &str) -> Option<Vec<Member>>;

    async fn audit_events(
        &self,
        token: &str,
        organization_id: Option<&str>,
    ) -> Option<Vec<AuditEvent>>;

    async fn create_organization(&self, token: &str, name: &str) -> Option<OrgSummary>;

    async fn create_invite(
        &self,
        token: &str,
        organization_id: &str,
        email: &str,
        role: &str,
    ) -> Option<InviteCreated>;

    async fn accept_invite(&self, token: &str, invite_token: &str) -> Option<AcceptedInvite>;

    async fn create_upload_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        filename: &str,
        content_type: &str,
    ) -> Option<UploadTicket>;

    /// The `direct` upload branch: one multipart request with client-built
    /// bearer + organization headers.
    async fn upload_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        ticket: &UploadTicket,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> bool;

    /// The transfer half of the `presigned` branch: raw body, server-provided
    /// headers only.
    async fn upload_presigned(&self, ticket: &UploadTicket, bytes: Vec<u8>) -> bool;

    async fn complete_upload(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
        size_bytes: u64,
    ) -> bool;

    async fn download_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
    ) -> Option<DownloadTicket>;

    /// The `direct` download branch: one authenticated fetch of the bytes.
    async fn fetch_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        url: &str,
    ) -> Option<Vec<u8>>;

    async fn checkout_session(
        &self,
        token: &str,
        organization_id: Option<&str>,
        plan_code: &str,
    ) -> Option<String>;

    async fn portal_session(&self, token: &str, organization_id: Option<&str>) -> Option<String>;
}

impl WorkspaceBackend for ApiClient {
    async fn viewer(&self, token: &str, organization_id: Option<&str>) -> Option<Viewer> {
        ok_or_log(Self::viewer(self, token, organization_id).await, "viewer")
    }

    async fn organizations(&self, token: &str) -> Option<Vec<OrgSummary>> {
        ok_or_log(Self::organizations(self, token).await, "organizations")
    }

    async fn members(&self, token: &str, organization_id: &str) -> Option<Vec<Member>> {
        ok_or_log(Self::members(self, token, organization_id).await, "members")
    }

    async fn audit_events(
        &self,
        token: &str,
        organization_id: Option<&str>,
    ) -> Option<Vec<AuditEvent>> {
        ok_or_log(
            Self::audit_events(self, token, organization_id).await,
            "audit_events",
        )
    }

    async fn create_organization(&self, token: &str, name: &str) -> Option<OrgSummary> {
        ok_or_log(
            Self::create_organization(self, token, name).await,
            "create_organization",
        )
    }

    async fn create_invite(
        &self,
        token: &str,
        organization_id: &str,
        email: &str,
        role: &str,
    ) -> Option<InviteCreated> {
        ok_or_log(
            Self::create_invite(self, token, organization_id, email, role).await,
            "create_invite",
        )
    }

    async fn accept_invite(&self, token: &str, invite_token: &str) -> Option<AcceptedInvite> {
        ok_or_log(
            Self::accept_invite(self, token, invite_token).await,
            "accept_invite",
        )
    }

    async fn create_upload_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        filename: &str,
        content_type: &str,
    ) -> Option<UploadTicket> {
        ok_or_log(
            Self::create_upload_url(self, token, organization_id, filename, content_type).await,
            "create_upload_url",
        )
    }

    async fn upload_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        ticket: &UploadTicket,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> bool {
        ok_or_log(
            Self::upload_direct(
                self,
                token,
                organization_id,
                ticket,
                filename,
                content_type,
                bytes,
            )
            .await,
            "upload_direct",
        )
        .is_some()
    }

    async fn upload_presigned(&self, ticket: &UploadTicket, bytes: Vec<u8>) -> bool {
        ok_or_log(
            Self::upload_presigned(self, ticket, bytes).await,
            "upload_presigned",
        )
        .is_some()
    }

    async fn complete_upload(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
        size_bytes: u64,
    ) -> bool {
        ok_or_log(
            Self::complete_upload(self, token, organization_id, file_id, size_bytes).await,
            "complete_upload",
        )
        .is_some()
    }

    async fn download_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
    ) -> Option<DownloadTicket> {
        ok_or_log(
            Self::download_url(self, token, organization_id, file_id).await,
            "download_url",
        )
    }

    async fn fetch_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        url: &str,
    ) -> Option<Vec<u8>> {
        ok_or_log(
            Self::fetch_direct(self, token, organization_id, url).await,
            "fetch_direct",
        )
    }

    async fn checkout_session(
        &self,
        token: &str,
        organization_id: Option<&str>,
        plan_code: &str,
    ) -> Option<String> {
        ok_or_log(
            Self::checkout_session(self, token, organization_id, plan_code).await,
            "checkout_session",
        )
    }

    async fn portal_session(&self, token: &str, organization_id: Option<&str>) -> Option<String> {
        ok_or_log(
            Self::portal_session(self, token, organization_id).await,
            "portal_session",
        )
    }
}
