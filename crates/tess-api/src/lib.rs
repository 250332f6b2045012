//! # tess-api
//!
//! HTTP client for the Tessera backend API.
//!
//! Every operation maps to one `/api/v1/...` endpoint. Authenticated calls
//! carry `Authorization: Bearer <token>` plus `X-Organization-ID: <id>` when
//! an organization context is active. All responses are JSON; non-success
//! statuses surface as [`ApiError::Status`]. The collapse-to-`None` boundary
//! policy lives in `tess-sync`, not here.

pub mod error;
mod http;
pub mod transfer;
pub mod types;

pub use error::ApiError;

use serde::Deserialize;
use tess_core::{AppMeta, AuditEvent, DownloadTicket, Member, OrgSummary, UploadTicket, Viewer};

use crate::http::check_response;
use crate::types::{AcceptedInvite, InviteCreated};

/// HTTP client for the Tessera backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client against the given base URL (no trailing slash).
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("tessera/0.1")
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the auth header convention to a request builder.
    ///
    /// Direct-path transfers reuse this; the client decides those headers,
    /// unlike presigned transfers where the server-provided map rules.
    fn authed(
        &self,
        req: reqwest::RequestBuilder,
        token: &str,
        organization_id: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let req = req.header("Authorization", format!("Bearer {token}"));
        match organization_id {
            Some(id) => req.header("X-Organization-ID", id),
            None => req,
        }
    }

    /// `GET /api/v1/meta`: unauthenticated app/env/version/time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn meta(&self) -> Result<AppMeta, ApiError> {
        let resp = self.http.get(self.url("/api/v1/meta")).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `GET /api/v1/auth/me`: the caller's identity and standing in the
    /// active (or server-default) organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn viewer(
        &self,
        token: &str,
        organization_id: Option<&str>,
    ) -> Result<Viewer, ApiError> {
        let req = self.http.get(self.url("/api/v1/auth/me"));
        let resp = self.authed(req, token, organization_id).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `GET /api/v1/organizations`: all organizations the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn organizations(&self, token: &str) -> Result<Vec<OrgSummary>, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            organizations: Vec<OrgSummary>,
        }

        let req = self.http.get(self.url("/api/v1/organizations"));
        let resp = self.authed(req, token, None).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.organizations)
    }

    /// `POST /api/v1/organizations`: create an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn create_organization(
        &self,
        token: &str,
        name: &str,
    ) -> Result<OrgSummary, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            organization: OrgSummary,
        }

        let req = self
            .http
            .post(self.url("/api/v1/organizations"))
            .json(&serde_json::json!({ "name": name }));
        let resp = self.authed(req, token, None).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.organization)
    }

    /// `GET /api/v1/organizations/{id}/members`: members of one
    /// organization. Requires admin rank server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn members(
        &self,
        token: &str,
        organization_id: &str,
    ) -> Result<Vec<Member>, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            members: Vec<Member>,
        }

        let req = self
            .http
            .get(self.url(&format!("/api/v1/organizations/{organization_id}/members")));
        let resp = self.authed(req, token, Some(organization_id)).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.members)
    }

    /// `POST /api/v1/organizations/{id}/invites`: invite a user by email.
    /// Requires admin rank server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn create_invite(
        &self,
        token: &str,
        organization_id: &str,
        email: &str,
        role: &str,
    ) -> Result<InviteCreated, ApiError> {
        let req = self
            .http
            .post(self.url(&format!("/api/v1/organizations/{organization_id}/invites")))
            .json(&serde_json::json!({ "email": email, "role": role }));
        let resp = self.authed(req, token, Some(organization_id)).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `POST /api/v1/invites/accept`: redeem an invite token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn accept_invite(
        &self,
        token: &str,
        invite_token: &str,
    ) -> Result<AcceptedInvite, ApiError> {
        let req = self
            .http
            .post(self.url("/api/v1/invites/accept"))
            .json(&serde_json::json!({ "inviteToken": invite_token }));
        let resp = self.authed(req, token, None).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `GET /api/v1/audit/events`: recent audit events for the active
    /// organization context.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn audit_events(
        &self,
        token: &str,
        organization_id: Option<&str>,
    ) -> Result<Vec<AuditEvent>, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            events: Vec<AuditEvent>,
        }

        let req = self.http.get(self.url("/api/v1/audit/events"));
        let resp = self.authed(req, token, organization_id).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.events)
    }

    /// `POST /api/v1/files/upload-url`: open an upload session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn create_upload_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ApiError> {
        let req = self
            .http
            .post(self.url("/api/v1/files/upload-url"))
            .json(&serde_json::json!({ "filename": filename, "contentType": content_type }));
        let resp = self.authed(req, token, organization_id).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `POST /api/v1/files/{id}/complete`: confirm a presigned upload with
    /// the observed byte size.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    pub async fn complete_upload(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
        size_bytes: u64,
    ) -> Result<(), ApiError> {
        let req = self
            .http
            .post(self.url(&format!("/api/v1/files/{file_id}/complete")))
            .json(&serde_json::json!({ "sizeBytes": size_bytes }));
        let resp = self.authed(req, token, organization_id).send().await?;
        check_response(resp).await?;
        Ok(())
    }

    /// `GET /api/v1/files/{id}/download-url`: obtain a download ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn download_url(
        &self,
        token: &str,
        organization_id: Option<&str>,
        file_id: &str,
    ) -> Result<DownloadTicket, ApiError> {
        let req = self
            .http
            .get(self.url(&format!("/api/v1/files/{file_id}/download-url")));
        let resp = self.authed(req, token, organization_id).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// `POST /api/v1/billing/checkout-session`: start checkout for a plan.
    /// Returns the hosted checkout URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn checkout_session(
        &self,
        token: &str,
        organization_id: Option<&str>,
        plan_code: &str,
    ) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            url: String,
        }

        let req = self
            .http
            .post(self.url("/api/v1/billing/checkout-session"))
            .json(&serde_json::json!({ "planCode": plan_code }));
        let resp = self.authed(req, token, organization_id).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.url)
    }

    /// `POST /api/v1/billing/portal-session`: open a billing portal
    /// session. Returns the hosted portal URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// unparsable body.
    pub async fn portal_session(
        &self,
        token: &str,
        organization_id: Option<&str>,
    ) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            url: String,
        }

        let req = self.http.post(self.url("/api/v1/billing/portal-session"));
        let resp = self.authed(req, token, organization_id).send().await?;
        let envelope: Envelope = check_response(resp).await?.json().await?;
        Ok(envelope.url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/v1/meta"), "http://localhost:8080/api/v1/meta");
    }

    #[test]
    fn authed_sets_bearer_and_org_headers() {
        let client = ApiClient::new("http://localhost:8080");
        let req = client
            .authed(
                client.http.get("http://localhost:8080/api/v1/auth/me"),
                "tok_abc",
                Some("org_1"),
            )
            .build()
            .unwrap();
        assert_eq!(
            req.headers().get("Authorization").unwrap(),
            "Bearer tok_abc"
        );
        assert_eq!(req.headers().get("X-Organization-ID").unwrap(), "org_1");
    }

    #[test]
    fn authed_omits_org_header_without_context() {
        let client = ApiClient::new("http://localhost:8080");
        let req = client
            .authed(
                client.http.get("http://localhost:8080/api/v1/organizations"),
                "tok_abc",
                None,
            )
            .build()
            .unwrap();
        assert!(req.headers().get("X-Organization-ID").is_none());
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_meta_roundtrip() {
        let client = ApiClient::new("http://localhost:8080");
        let meta = client.meta().await.expect("backend running locally");
        println!("app={} env={} version={}", meta.app, meta.env, meta.version);
    }
}
